// ABOUTME: Action availability derivation for the current viewer of a challenge
// ABOUTME: Abandon/fail/accept/finish predicates, independent and UI-agnostic
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pact Engine Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::challenge::ChallengeRecord;
use crate::progress::{is_challenge_finished, ParticipantViewModel};

/// Which action affordances apply to the current viewer.
///
/// The four predicates are independent; the rendering layer shows one
/// affordance per true flag and wires it to the matching external
/// mutation. The engine only decides availability, it never performs the
/// writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AvailableActions {
    /// Leave (and for the last participant, delete) the challenge
    pub abandon: bool,
    /// Log defeat
    pub fail: bool,
    /// Accept the proposed terms
    pub accept: bool,
    /// Claim completion once the challenge clock has run out
    pub finish: bool,
}

impl AvailableActions {
    /// No affordances: non-participants and read-only views
    #[must_use]
    pub const fn none() -> Self {
        Self {
            abandon: false,
            fail: false,
            accept: false,
            finish: false,
        }
    }

    /// Whether any affordance is enabled
    #[must_use]
    pub const fn any(&self) -> bool {
        self.abandon || self.fail || self.accept || self.finish
    }

    /// Derive the affordances for the current viewer.
    ///
    /// A viewer who is not a participant gets none. Otherwise:
    /// - abandon: draft, or viewer finished, or viewer accepted and failed
    /// - fail: live, viewer accepted and neither failed nor finished
    /// - accept: viewer has not accepted yet
    /// - finish: live, viewer neither failed nor finished, and the
    ///   challenge clock has run out
    #[must_use]
    pub fn compute(
        record: &ChallengeRecord,
        current: Option<&ParticipantViewModel>,
        now: DateTime<Utc>,
    ) -> Self {
        let Some(current) = current else {
            return Self::none();
        };

        let has_failed = current.failed.is_some();
        let has_finished = current.finished.is_some();
        let clock_done = is_challenge_finished(record, now);

        Self {
            abandon: record.draft || has_finished || (current.accepted && has_failed),
            fail: current.accepted && !has_failed && !has_finished && !record.draft,
            accept: !current.accepted,
            finish: !record.draft && !has_finished && !has_failed && clock_done,
        }
    }
}
