// ABOUTME: System-wide constants for the challenge derivation engine
// ABOUTME: Validation limits and the exact user-facing status strings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pact Engine Contributors

//! # Constants Module
//!
//! Validation limits applied when proposing a new challenge, and the
//! user-facing status strings the rendering layer displays verbatim.

/// Limits enforced when a new challenge is proposed
pub mod limits {
    /// Shortest allowed challenge duration
    pub const MIN_TARGET_DAYS: u32 = 1;

    /// Longest allowed challenge duration (one year)
    pub const MAX_TARGET_DAYS: u32 = 365;

    /// Upper bound on invited participants, owner included
    pub const MAX_PARTICIPANTS: usize = 32;

    /// Upper bound on challenge name length, in characters
    pub const MAX_NAME_LENGTH: usize = 120;
}

/// User-facing status strings, displayed verbatim by the rendering layer
pub mod status_text {
    /// Draft phase: participant has accepted the terms
    pub const ACCEPTED: &str = "Accepted";

    /// Draft phase: participant has not responded yet
    pub const WAITING_FOR_RESPONSE: &str = "Waiting for response";

    /// Live phase: participant accepted and is still in the game
    pub const ACTIVE: &str = "Active";

    /// Live phase: participant dropped out before the first full day
    pub const FAILED_FIRST_DAY: &str = "Failed on the first day";

    /// Live phase: participant completed the full duration
    pub const FINISHED: &str = "Finished";
}
