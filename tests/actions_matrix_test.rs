// ABOUTME: Parametrized tests for action availability derivation
// ABOUTME: Covers the full draft/accepted/settled matrix plus the clock-done axis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pact Engine Contributors

//! Action availability matrix: every combination of (draft, accepted,
//! failed/finished) for the current participant, with and without the
//! challenge clock having run out.

mod common;

use chrono::Duration;
use common::{draft_record, live_record, participant, profiles_for, start_instant};
use pact_engine::progress::{build_participant_view_models, AvailableActions, ChallengeProgress};

/// Settled-state axis of the matrix
#[derive(Debug, Clone, Copy)]
enum Settled {
    No,
    Failed,
    Finished,
}

/// Expected affordances in (abandon, fail, accept, finish) order
type Expected = (bool, bool, bool, bool);

fn run_case(draft: bool, accepted: bool, settled: Settled, clock_done: bool) -> AvailableActions {
    let started = start_instant();
    let (failed, finished) = match settled {
        Settled::No => (None, None),
        Settled::Failed => (Some(started + Duration::days(2)), None),
        Settled::Finished => (None, Some(started + Duration::days(10))),
    };
    let record = if draft {
        draft_record(10, vec![participant("me", accepted, failed, finished)])
    } else {
        live_record(10, vec![participant("me", accepted, failed, finished)])
    };
    let now = if clock_done {
        started + Duration::days(10)
    } else {
        started + Duration::days(5)
    };
    let profiles = profiles_for(&["me"]);

    let vms = build_participant_view_models(&record, &profiles, "me", now).unwrap();
    AvailableActions::compute(&record, Some(&vms[0]), now)
}

fn assert_case(
    draft: bool,
    accepted: bool,
    settled: Settled,
    clock_done: bool,
    expected: Expected,
) {
    let actions = run_case(draft, accepted, settled, clock_done);
    let got = (actions.abandon, actions.fail, actions.accept, actions.finish);
    assert_eq!(
        got, expected,
        "mismatch for draft={draft} accepted={accepted} settled={settled:?} clock_done={clock_done}"
    );
}

// ============================================================================
// Draft phase
// ============================================================================

#[test]
fn draft_matrix() {
    // (abandon, fail, accept, finish)
    assert_case(true, false, Settled::No, false, (true, false, true, false));
    assert_case(true, true, Settled::No, false, (true, false, false, false));
    // settled flags carry no live semantics while drafting, except that a
    // finished flag still enables abandon and failed+accepted does too
    assert_case(true, false, Settled::Failed, false, (true, false, true, false));
    assert_case(true, true, Settled::Finished, false, (true, false, false, false));
}

// ============================================================================
// Live phase, clock still running
// ============================================================================

#[test]
fn live_matrix_clock_running() {
    assert_case(false, true, Settled::No, false, (false, true, false, false));
    assert_case(false, false, Settled::No, false, (false, false, true, false));
    assert_case(false, true, Settled::Failed, false, (true, false, false, false));
    assert_case(false, false, Settled::Failed, false, (false, false, true, false));
    assert_case(false, true, Settled::Finished, false, (true, false, false, false));
    assert_case(false, false, Settled::Finished, false, (true, false, true, false));
}

// ============================================================================
// Live phase, clock has run out
// ============================================================================

#[test]
fn live_matrix_clock_done() {
    // finish opens for everyone not yet settled, alongside the other flags
    assert_case(false, true, Settled::No, true, (false, true, false, true));
    assert_case(false, false, Settled::No, true, (false, false, true, true));
    assert_case(false, true, Settled::Failed, true, (true, false, false, false));
    assert_case(false, true, Settled::Finished, true, (true, false, false, false));
}

// ============================================================================
// Viewer edge cases
// ============================================================================

#[test]
fn non_participant_gets_no_actions() {
    let started = start_instant();
    let now = started + Duration::days(5);
    let record = live_record(10, vec![participant("a", true, None, None)]);

    let actions = AvailableActions::compute(&record, None, now);
    assert_eq!(actions, AvailableActions::none());
    assert!(!actions.any());
}

#[test]
fn evaluate_wires_viewer_actions() {
    let started = start_instant();
    let now = started + Duration::days(5);
    let record = live_record(
        10,
        vec![
            participant("me", true, None, None),
            participant("other", true, None, None),
        ],
    );
    let profiles = profiles_for(&["me", "other"]);

    let progress = ChallengeProgress::evaluate(&record, &profiles, "me", now).unwrap();
    assert!(progress.actions.fail);
    assert!(!progress.actions.accept);
    assert!(!progress.actions.finish);

    // read-only view of somebody else's list: viewer not a participant
    let readonly = ChallengeProgress::evaluate(&record, &profiles, "stranger", now).unwrap();
    assert!(!readonly.actions.any());
}
