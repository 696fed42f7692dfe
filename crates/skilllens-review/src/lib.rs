//! Feedback pipeline for the SkillLens action.
//!
//! Provides the run orchestration: noise filtering, code-fence redaction,
//! concurrent feedback aggregation, the recommendation proxy client, and
//! the idempotent comment upsert.

pub mod action;
pub mod collect;
pub mod comment;
pub mod filter;
pub mod github;
pub mod proxy;
pub mod redact;
