//! # Chess Coach Common Library
//!
//! Shared code for the chess coach crates including:
//! - Tutorial and step data model
//! - Insight request/response wire types
//! - Event types and the EventBus
//! - Configuration loading

pub mod config;
pub mod error;
pub mod events;
pub mod insight;
pub mod tutorial;

pub use error::{Error, Result};
pub use insight::{Insight, InsightRequest};
pub use tutorial::{Arrow, Difficulty, Step, Tutorial};
