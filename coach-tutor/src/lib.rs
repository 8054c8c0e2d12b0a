//! # Chess Coach Tutor Library (coach-tutor)
//!
//! Scripted chess tutorials with a live rules engine.
//!
//! **Purpose:** Walk a learner through catalog tutorials step by step,
//! keep the board consistent with each scripted move, and attach coach
//! insights fetched from the insight service.
//!
//! **Architecture:** A synchronous [`session::TutorialSession`] state machine
//! driven by the async [`controller::TutorController`], which schedules
//! insight fetches and discards stale responses.

pub mod catalog;
pub mod commands;
pub mod config;
pub mod controller;
pub mod cues;
pub mod error;
pub mod insight_client;
pub mod render;
pub mod rules;
pub mod session;

pub use catalog::Catalog;
pub use controller::TutorController;
pub use error::{Error, Result};
pub use insight_client::{HttpInsightClient, InsightSource};
pub use session::{SessionView, TutorialSession};
