//! # IO Layer
//!
//! Interfaces that expose the domain to the outside world. The only one is a
//! local JSON REST API consumed by the UI.

pub mod rest;
