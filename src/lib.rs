// ABOUTME: Library entry point for the pact-engine challenge derivation core
// ABOUTME: Pure computation of participant status and action availability from challenge snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pact Engine Contributors

#![deny(unsafe_code)]

//! # Pact Engine
//!
//! Derivation core for a social goal-tracking application. Users propose
//! shared "challenges", invite friends, and every participant either
//! sustains the activity for the target number of days or logs defeat.
//!
//! This crate is the pure computation layer between the real-time document
//! store and the rendering layer: given a snapshot of a challenge record,
//! the known user profiles, the current viewer, and an injected clock, it
//! produces the fully-derived view of challenge progress. It owns no
//! persistence, no transport, and no rendering.
//!
//! ## Design Principles
//!
//! - **Pure and synchronous**: every operation is a deterministic function
//!   of its inputs; no shared mutable state, no suspension points.
//! - **Snapshot-driven**: callers re-evaluate on every store update; each
//!   call allocates and returns fresh output.
//! - **Explicit clock**: `now` is always a parameter, never read ad hoc,
//!   so every derivation is reproducible in tests.
//! - **Signaled gaps**: a participant whose profile has not loaded yet is
//!   surfaced as such, never silently dropped.
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use chrono::{Duration, Utc};
//! use pact_engine::models::{ChallengeRecord, UserProfile};
//! use pact_engine::progress::ChallengeProgress;
//!
//! # fn main() -> pact_engine::errors::EngineResult<()> {
//! let started = Utc::now() - Duration::days(3);
//! let record = ChallengeRecord::new_draft(
//!     "30 days of running",
//!     "alice",
//!     &["bob".into()],
//!     30,
//!     Some(started),
//! )?;
//!
//! let mut profiles = HashMap::new();
//! profiles.insert("alice".into(), UserProfile::new("alice", "Alice A."));
//! profiles.insert("bob".into(), UserProfile::new("bob", "Bob B."));
//!
//! let progress = ChallengeProgress::evaluate(&record, &profiles, "alice", Utc::now())?;
//! assert_eq!(progress.participants.len(), 2);
//! assert!(progress.actions.accept);
//! # Ok(())
//! # }
//! ```

/// Application constants: validation limits and user-facing status text
pub mod constants;

/// Unified error handling with standard error codes
pub mod errors;

/// Core data models: user profiles and challenge records
pub mod models;

/// The challenge progress engine: status derivation, elapsed-time math,
/// and action availability
pub mod progress;
