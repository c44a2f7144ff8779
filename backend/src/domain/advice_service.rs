//! # Advice Service
//!
//! Asks a language model for free-text financial advice grounded in the
//! current goals and planned expenses.
//!
//! The provider sits behind [`AdviceProvider`] so tests and other vendors can
//! be plugged in. [`GeminiAdviceProvider`] talks to the Gemini
//! `generateContent` endpoint over HTTP.
//!
//! `get_financial_advice` never fails: an empty reply and any error (missing
//! API key included) map to fixed fallback messages. There is no retry.

use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::models::expense::DomainExpense;
use crate::domain::models::goal::DomainGoal;
use crate::domain::summary_service;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const NO_ADVICE_FALLBACK: &str = "Sorry, I couldn't come up with any advice right now.";
pub const CONNECTION_ERROR_FALLBACK: &str =
    "Something went wrong while reaching the financial assistant. Please try again later.";

#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    #[error("Question cannot be empty")]
    EmptyQuestion,
    #[error("No API key configured for the advice provider")]
    MissingApiKey,
    #[error("Advice request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Advice provider returned {status}: {body}")]
    Provider { status: u16, body: String },
}

/// A language model able to answer one prompt
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Text of the reply; `Ok(None)` when the model produced nothing
    async fn generate(&self, prompt: &str) -> Result<Option<String>, AdviceError>;
}

// Gemini wire format

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if it has any
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Gemini `generateContent` over HTTP
pub struct GeminiAdviceProvider {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiAdviceProvider {
    pub fn new(endpoint: &str, model: &str, api_key: Option<String>, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl AdviceProvider for GeminiAdviceProvider {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, AdviceError> {
        let api_key = self.api_key.as_deref().ok_or(AdviceError::MissingApiKey)?;
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!("Requesting advice from model {}", self.model);
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdviceError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateContentResponse = response.json().await?;
        Ok(reply.text())
    }
}

/// Builds prompts from the planner snapshot and turns provider results into
/// a displayable answer
#[derive(Clone)]
pub struct AdviceService {
    provider: Arc<dyn AdviceProvider>,
}

impl AdviceService {
    pub fn new(provider: Arc<dyn AdviceProvider>) -> Self {
        Self { provider }
    }

    /// Trimmed question, rejected when blank
    pub fn validate_question(question: &str) -> Result<&str, AdviceError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AdviceError::EmptyQuestion);
        }
        Ok(question)
    }

    pub fn build_prompt(goals: &[DomainGoal], expenses: &[DomainExpense], question: &str) -> String {
        let mut expense_lines = String::new();
        for e in expenses {
            let _ = writeln!(
                expense_lines,
                "- Expense: {}, Amount: ${:.2}, Category: {}",
                e.title, e.amount, e.category
            );
        }
        if expense_lines.is_empty() {
            expense_lines.push_str("No expenses recorded yet.\n");
        }

        let mut goal_lines = String::new();
        for g in goals {
            let _ = writeln!(
                goal_lines,
                "- Goal: {}, Target: ${:.2}, Deadline: {}, Status: {}",
                g.title,
                g.amount,
                g.deadline.format("%Y-%m-%d"),
                g.status.as_str()
            );
        }
        if goal_lines.is_empty() {
            goal_lines.push_str("No goals recorded yet.\n");
        }

        let total = summary_service::total(expenses);

        format!(
            "You are a smart personal finance assistant called \"Pocket Buddy\".\n\
             \n\
             User context:\n\
             \n\
             PLANNED MONTHLY EXPENSES (Total: ${total:.2}):\n\
             {expense_lines}\n\
             FINANCIAL GOALS:\n\
             {goal_lines}\n\
             USER QUESTION:\n\
             \"{question}\"\n\
             \n\
             Please give a concise, motivating and practical answer. Use Markdown for lists or bold text.\n\
             Focus on how the user can reach their goals given their current expenses.\n"
        )
    }

    /// Single request to the provider, with fixed fallbacks
    pub async fn get_financial_advice(
        &self,
        goals: &[DomainGoal],
        expenses: &[DomainExpense],
        question: &str,
    ) -> String {
        let prompt = Self::build_prompt(goals, expenses, question);

        match self.provider.generate(&prompt).await {
            Ok(Some(answer)) => {
                info!("Received advice ({} chars)", answer.len());
                answer
            }
            Ok(None) => {
                warn!("Advice provider returned an empty reply");
                NO_ADVICE_FALLBACK.to_string()
            }
            Err(e) => {
                error!("Error calling advice provider: {}", e);
                CONNECTION_ERROR_FALLBACK.to_string()
            }
        }
    }
}
