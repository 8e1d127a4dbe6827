// ABOUTME: Core data models for the challenge derivation engine
// ABOUTME: Re-exports user profiles and challenge records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pact Engine Contributors

//! # Data Models
//!
//! Snapshot types the engine reads: user profiles owned by the profile
//! store and challenge records owned by the challenge store. The engine
//! never mutates either; all write paths live outside this crate.
//!
//! ## Design Principles
//!
//! - **Store Agnostic**: records carry epoch-millisecond timestamps on the
//!   wire, matching the document store, but are strongly typed in memory
//! - **Read Only**: models are inputs; derived output lives in [`crate::progress`]
//! - **Serializable**: all models round-trip through JSON

/// Challenge records and participant state
pub mod challenge;

/// User identity profiles and lookup helpers
pub mod user;

pub use challenge::{ChallengeKind, ChallengeRecord, ParticipantState};
pub use user::{Profiles, UserProfile};
