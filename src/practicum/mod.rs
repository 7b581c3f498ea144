//! Homework review API access.
//!
//! The client only classifies transport and decoding failures; the shape of
//! the decoded payload is checked separately by [`validate_response`].

mod client;
mod response;

pub use client::PracticumClient;
pub use response::{current_date, validate_response};
