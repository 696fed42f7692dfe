//! Core types, configuration, and error handling for the SkillLens action.
//!
//! This crate provides the shared foundation used by the pipeline and binary
//! crates:
//! - [`SkillLensError`] — unified error type using `thiserror`
//! - [`ActionConfig`] — configuration read from the Actions input convention
//! - [`RepoContext`] — repository identity and PR number from the trigger
//! - Shared types: [`FeedbackItem`], [`FeedbackKind`], [`Recommendation`],
//!   [`RecommendationRequest`]
//! - Runner surface: [`RunnerLog`], [`Outputs`]

mod config;
mod context;
mod error;
mod types;
mod workflow;

pub use config::{ActionConfig, DEFAULT_API_URL};
pub use context::RepoContext;
pub use error::{Result, SkillLensError};
pub use types::{Defaults, FeedbackItem, FeedbackKind, Recommendation, RecommendationRequest, RepoRef};
pub use workflow::{Outputs, RunnerLog};
