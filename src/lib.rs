//! Homework Notifier Library
//!
//! Polls the homework review API and reports status changes to a single
//! Telegram chat.
//!
//! This crate provides the core functionality for:
//! - Loading credentials and poll settings from the environment
//! - Fetching and validating review API responses
//! - Detecting homework status changes
//! - Delivering notifications via the Telegram Bot API

pub mod config;
pub mod error;
pub mod practicum;
pub mod scheduler;
pub mod telegram;
pub mod tracker;
