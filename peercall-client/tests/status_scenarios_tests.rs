/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Whole-call scenarios, asserting what a tile would actually render at
//! every step.

mod support;

use peercall_client::{
    CallRoster, ConnectionStatus, LinkConfig, MessageKey, SignalingState, TileIndicators,
};
use support::mock_link::MockPeerLink;
use web_time::Instant;

fn indicators(roster: &CallRoster, id: &str) -> TileIndicators {
    roster.indicators(id).unwrap()
}

#[test]
fn test_joining_participant_spins_until_first_connection() {
    let mut roster = CallRoster::default();
    let now = Instant::now();
    roster.link_established("alice", MockPeerLink::new("alice"), now);

    for state in ["new", "checking"] {
        roster.ice_state_changed("alice", state, now);
        let tile = indicators(&roster, "alice");
        assert!(tile.show_loading, "no spinner during {state}");
        assert!(tile.show_not_connected);
        assert_eq!(tile.message_key, MessageKey::None);
    }

    roster.ice_state_changed("alice", "connected", now);
    assert_eq!(
        indicators(&roster, "alice"),
        TileIndicators {
            message_key: MessageKey::None,
            show_loading: false,
            show_not_connected: false,
        }
    );
}

#[test]
fn test_transient_problems_recover_cleanly() {
    let mut roster = CallRoster::default();
    let now = Instant::now();
    roster.link_established("bob", MockPeerLink::new("bob"), now);
    roster.ice_state_changed("bob", "connected", now);

    roster.ice_state_changed("bob", "disconnected", now);
    let tile = indicators(&roster, "bob");
    assert_eq!(tile.message_key, MessageKey::Problems);
    assert!(tile.show_loading);
    assert!(tile.show_not_connected);

    roster.ice_state_changed("bob", "connected", now);
    let tile = indicators(&roster, "bob");
    assert_eq!(tile.message_key, MessageKey::None);
    assert!(!tile.show_loading);
    assert!(!tile.show_not_connected);
}

#[test]
fn test_never_connected_failure_gives_up_after_budget_then_recovers() {
    let mut roster = CallRoster::default();
    let now = Instant::now();
    let link = MockPeerLink::new("carol");
    roster.link_established("carol", link.clone(), now);

    for _ in 0..5 {
        roster.ice_state_changed("carol", "failed", now);
        let tile = indicators(&roster, "carol");
        assert_eq!(tile.message_key, MessageKey::NotEstablished);
        assert!(tile.show_loading, "spinner stops before the budget is spent");
        roster.ice_state_changed("carol", "checking", now);
    }
    assert_eq!(link.restart_count(), 5);

    roster.ice_state_changed("carol", "failed", now);
    let tile = indicators(&roster, "carol");
    assert_eq!(tile.message_key, MessageKey::NotEstablishedNoRetry);
    assert!(!tile.show_loading);
    assert!(tile.show_not_connected);

    // A connection arriving anyway, e.g. a remote-side restart, clears it.
    roster.ice_state_changed("carol", "connected", now);
    let tile = indicators(&roster, "carol");
    assert_eq!(tile.message_key, MessageKey::None);
    assert!(!tile.show_not_connected);
}

#[test]
fn test_in_place_ice_restart_keeps_the_lost_warning() {
    let mut roster = CallRoster::default();
    let now = Instant::now();
    let link = MockPeerLink::new("dave");
    roster.link_established("dave", link.clone(), now);
    roster.ice_state_changed("dave", "connected", now);
    roster.ice_state_changed("dave", "failed", now);
    assert_eq!(indicators(&roster, "dave").message_key, MessageKey::Lost);
    assert_eq!(link.restart_count(), 1);

    // The restart renegotiates on the same link; the warning holds through
    // the whole offer/answer/checking round.
    link.set_signaling(SignalingState::HaveLocalOffer);
    roster.signaling_state_changed("dave", "have-local-offer");
    assert_eq!(indicators(&roster, "dave").message_key, MessageKey::Lost);

    link.set_signaling(SignalingState::Stable);
    roster.signaling_state_changed("dave", "stable");
    assert_eq!(indicators(&roster, "dave").message_key, MessageKey::Lost);

    roster.ice_state_changed("dave", "checking", now);
    assert_eq!(indicators(&roster, "dave").message_key, MessageKey::Lost);
    assert!(indicators(&roster, "dave").show_loading);

    roster.ice_state_changed("dave", "connected", now);
    assert_eq!(indicators(&roster, "dave").message_key, MessageKey::None);
    assert!(!indicators(&roster, "dave").show_not_connected);
}

#[test]
fn test_legacy_escalation_follows_negotiation_state() {
    let config = LinkConfig {
        legacy_negotiation_escalation: true,
        ..LinkConfig::default()
    };
    let mut roster = CallRoster::new(config);
    let now = Instant::now();
    roster.link_established("erin", MockPeerLink::new("erin"), now);
    roster.ice_state_changed("erin", "connected", now);

    // Disconnect first, then the renegotiation offer.
    roster.ice_state_changed("erin", "disconnected", now);
    assert_eq!(
        roster.display("erin").unwrap().status,
        ConnectionStatus::Problems
    );
    roster.signaling_state_changed("erin", "have-remote-offer");
    assert_eq!(roster.display("erin").unwrap().status, ConnectionStatus::Lost);

    // Negotiation settling takes the escalation back.
    roster.signaling_state_changed("erin", "stable");
    assert_eq!(
        roster.display("erin").unwrap().status,
        ConnectionStatus::Problems
    );

    // Same outcome when the offer precedes the disconnect.
    roster.ice_state_changed("erin", "connected", now);
    roster.signaling_state_changed("erin", "have-local-offer");
    roster.ice_state_changed("erin", "disconnected", now);
    assert_eq!(roster.display("erin").unwrap().status, ConnectionStatus::Lost);
}
