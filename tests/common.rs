// ABOUTME: Shared fixtures for integration tests
// ABOUTME: Challenge record and profile builders with fixed, deterministic clocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pact Engine Contributors

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use pact_engine::models::{ChallengeKind, ChallengeRecord, ParticipantState, Profiles, UserProfile};
use tracing_subscriber::EnvFilter;

/// Install a test subscriber so engine warn/debug events surface under
/// `RUST_LOG`; idempotent, safe to call from every test
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fixed challenge start instant used across tests
pub fn start_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap()
}

/// Participant state with explicit accept/fail/finish fields
pub fn participant(
    id: &str,
    accepted: bool,
    failed: Option<DateTime<Utc>>,
    finished: Option<DateTime<Utc>>,
) -> ParticipantState {
    ParticipantState {
        id: id.into(),
        accepted,
        failed,
        finished,
    }
}

/// Live duration challenge with the given participants
pub fn live_record(target_days: u32, participants: Vec<ParticipantState>) -> ChallengeRecord {
    ChallengeRecord {
        id: "ch-1".into(),
        name: "Cold showers".into(),
        kind: ChallengeKind::Duration,
        draft: false,
        started: Some(start_instant()),
        target_days,
        participants,
    }
}

/// Draft duration challenge with the given participants
pub fn draft_record(target_days: u32, participants: Vec<ParticipantState>) -> ChallengeRecord {
    ChallengeRecord {
        draft: true,
        ..live_record(target_days, participants)
    }
}

/// Profile map with one entry per id, named "User <id>"
pub fn profiles_for(ids: &[&str]) -> Profiles {
    ids.iter()
        .map(|id| ((*id).to_owned(), UserProfile::new(*id, format!("User {id}"))))
        .collect()
}
