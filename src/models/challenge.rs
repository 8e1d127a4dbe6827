// ABOUTME: Challenge records and per-participant accept/fail/finish state
// ABOUTME: ChallengeKind, ParticipantState, ChallengeRecord with lifecycle validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pact Engine Contributors

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::limits;
use crate::errors::{EngineError, EngineResult};

/// Kind of challenge being played
///
/// Only `Duration` semantics are implemented. `Elimination` (last man
/// standing) is modeled so records carrying it deserialize cleanly, but
/// the engine refuses to derive progress for it.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChallengeKind {
    /// Sustain the activity for the target number of days
    #[default]
    Duration,
    /// Last participant standing wins - recognized, not yet implemented
    Elimination,
}

impl Display for ChallengeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Duration => write!(f, "duration"),
            Self::Elimination => write!(f, "elimination"),
        }
    }
}

impl FromStr for ChallengeKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "duration" => Ok(Self::Duration),
            "elimination" => Ok(Self::Elimination),
            _ => Err(EngineError::invalid_input(format!(
                "Invalid challenge kind: {s}"
            ))),
        }
    }
}

impl ChallengeKind {
    /// Store string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::Elimination => "elimination",
        }
    }

    /// Whether the engine can derive progress for this kind
    #[must_use]
    pub const fn is_implemented(&self) -> bool {
        matches!(self, Self::Duration)
    }
}

/// Per-challenge, per-user accept/fail/finish state.
///
/// `failed` and `finished` are expected to be mutually exclusive while the
/// challenge is live, but the engine does not reject records where both
/// are set; display precedence handles that acknowledged edge case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantState {
    /// User id this state belongs to
    pub id: String,
    /// Whether the participant accepted the challenge terms
    #[serde(default)]
    pub accepted: bool,
    /// When the participant dropped out, if they did
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub failed: Option<DateTime<Utc>>,
    /// When the participant completed the duration, if they did
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub finished: Option<DateTime<Utc>>,
}

impl ParticipantState {
    /// Freshly invited participant: not accepted, not failed, not finished
    #[must_use]
    pub fn invited(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            accepted: false,
            failed: None,
            finished: None,
        }
    }

    /// Whether the participant is out of the game, either way
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.failed.is_some() || self.finished.is_some()
    }
}

/// A shared challenge as stored in the challenge document store.
///
/// Wire format matches the store documents: timestamps are epoch
/// milliseconds, participants live under `users`, the target under
/// `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    /// Unique challenge id
    pub id: String,
    /// Challenge name, editable while in draft
    pub name: String,
    /// Challenge kind discriminator
    #[serde(default)]
    pub kind: ChallengeKind,
    /// Whether the challenge is still a draft awaiting acceptance
    #[serde(default)]
    pub draft: bool,
    /// Start instant; must be present once the challenge leaves draft
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub started: Option<DateTime<Utc>>,
    /// Days required to complete the challenge
    #[serde(rename = "target")]
    pub target_days: u32,
    /// One entry per invited user, in invitation order
    #[serde(rename = "users")]
    pub participants: Vec<ParticipantState>,
}

impl ChallengeRecord {
    /// Propose a new draft challenge.
    ///
    /// Builds one participant entry per distinct invitee with the owner
    /// first, enforcing the creation-side limits: non-empty name, target
    /// within bounds, at least one invited friend, bounded participant
    /// count. The record starts in draft with nobody accepted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` or `ValueOutOfRange` when a limit is violated.
    pub fn new_draft(
        name: &str,
        owner_id: impl Into<String>,
        invitees: &[String],
        target_days: u32,
        started: Option<DateTime<Utc>>,
    ) -> EngineResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::invalid_input("challenge name is empty"));
        }
        if name.chars().count() > limits::MAX_NAME_LENGTH {
            return Err(EngineError::out_of_range("name length", name.chars().count()));
        }
        if !(limits::MIN_TARGET_DAYS..=limits::MAX_TARGET_DAYS).contains(&target_days) {
            return Err(EngineError::out_of_range("target_days", target_days));
        }

        let owner_id = owner_id.into();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(owner_id.as_str());
        let mut participants = vec![ParticipantState::invited(owner_id.clone())];
        for invitee in invitees {
            if seen.insert(invitee.as_str()) {
                participants.push(ParticipantState::invited(invitee.clone()));
            }
        }

        if participants.len() < 2 {
            return Err(EngineError::invalid_input(
                "a shared challenge needs at least one invited friend",
            ));
        }
        if participants.len() > limits::MAX_PARTICIPANTS {
            return Err(EngineError::out_of_range(
                "participant count",
                participants.len(),
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            kind: ChallengeKind::Duration,
            draft: true,
            started,
            target_days,
            participants,
        })
    }

    /// Check the record invariants the engine depends on.
    ///
    /// The target bound is checked on both sides: zero breaks the
    /// percentage math, and an absurdly large value would overflow the
    /// start-plus-target instant, so neither may reach the engine.
    ///
    /// # Errors
    ///
    /// - `ValueOutOfRange` when `target_days` is zero or exceeds
    ///   [`limits::MAX_TARGET_DAYS`]
    /// - `MissingRequiredField` when the record is live without a start time
    /// - `DuplicateParticipant` when a user id appears more than once
    pub fn validate(&self) -> EngineResult<()> {
        if !(limits::MIN_TARGET_DAYS..=limits::MAX_TARGET_DAYS).contains(&self.target_days) {
            return Err(
                EngineError::out_of_range("target_days", self.target_days)
                    .with_challenge_id(self.id.clone()),
            );
        }
        if !self.draft && self.started.is_none() {
            return Err(EngineError::missing_field("started").with_challenge_id(self.id.clone()));
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for participant in &self.participants {
            if !seen.insert(participant.id.as_str()) {
                return Err(EngineError::duplicate_participant(participant.id.clone())
                    .with_challenge_id(self.id.clone()));
            }
        }
        Ok(())
    }

    /// Whether every participant has accepted the terms
    #[must_use]
    pub fn all_accepted(&self) -> bool {
        self.participants.iter().all(|p| p.accepted)
    }

    /// The participant entry for the given user, if invited
    #[must_use]
    pub fn participant(&self, user_id: &str) -> Option<&ParticipantState> {
        self.participants.iter().find(|p| p.id == user_id)
    }

    /// Whether the challenge has left the draft phase
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !self.draft
    }
}
