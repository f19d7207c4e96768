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

//! Bridge between one raw peer link and the status engine.
//!
//! The adapter parses the state strings a [`PeerLink`] reports, collapses
//! duplicate notifications, and runs the two recovery policies that need a
//! clock: the disconnection grace period and the bounded ICE restart budget.
//! It keeps deadlines as plain state instead of scheduling callbacks; the
//! embedder drives time by calling [`LinkAdapter::tick`], and replacing an
//! adapter drops its pending deadline with it.

use std::rc::Rc;

use log::{debug, warn};
use web_time::Instant;

use crate::config::{DeploymentMode, LinkConfig};
use crate::connection::ice::{IceConnectionState, PeerConnectionState, SignalingState};
use crate::connection::peer_link::PeerLink;

/// Normalized notification handed to the status engine.
///
/// `IceState` and `SignalingState` mirror the link's own transitions;
/// `DisconnectedLong` and `FailedNoRestart` are synthesized by the adapter's
/// recovery policies and are only produced on direct (non-relayed) links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkEvent {
    IceState(IceConnectionState),
    SignalingState(SignalingState),
    DisconnectedLong,
    FailedNoRestart,
}

/// Per-link state normalizer and recovery policy.
pub struct LinkAdapter {
    link: Rc<dyn PeerLink>,
    config: LinkConfig,
    last_ice: Option<IceConnectionState>,
    last_signaling: Option<SignalingState>,
    disconnected_deadline: Option<Instant>,
    restart_attempts: u32,
}

impl LinkAdapter {
    pub fn new(link: Rc<dyn PeerLink>, config: LinkConfig) -> Self {
        Self {
            link,
            config,
            last_ice: None,
            last_signaling: None,
            disconnected_deadline: None,
            restart_attempts: 0,
        }
    }

    pub fn link(&self) -> &Rc<dyn PeerLink> {
        &self.link
    }

    /// Number of ICE restarts attempted on this link so far.
    pub fn restart_attempts(&self) -> u32 {
        self.restart_attempts
    }

    /// Read the link's current states once, at attach time.
    ///
    /// A link handed over mid-call may already be disconnected or failed,
    /// and some links never re-announce their current state. Priming seeds
    /// the duplicate filter and arms the disconnection grace deadline, but
    /// it never attempts a restart; restarts are reserved for transitions
    /// reported by the link itself.
    pub fn prime(&mut self, now: Instant) -> Vec<LinkEvent> {
        let mut ice = self.link.ice_connection_state();
        // Chromium reports some failures only on the aggregate connection
        // state while the ICE layer still says disconnected.
        if ice == IceConnectionState::Disconnected
            && self.link.connection_state() == PeerConnectionState::Failed
        {
            ice = IceConnectionState::Failed;
        }
        let signaling = self.link.signaling_state();
        self.last_ice = Some(ice);
        self.last_signaling = Some(signaling);
        if ice == IceConnectionState::Disconnected && self.config.mode == DeploymentMode::Direct {
            self.disconnected_deadline = Some(now + self.config.disconnected_grace);
        }
        vec![LinkEvent::IceState(ice), LinkEvent::SignalingState(signaling)]
    }

    /// Handle an `iceconnectionstatechange` notification.
    pub fn handle_ice_state_change(&mut self, raw: &str, now: Instant) -> Vec<LinkEvent> {
        match raw.parse::<IceConnectionState>() {
            Ok(state) => self.on_ice_transition(state, now),
            Err(err) => {
                warn!("{}: ignoring ICE state change: {err}", self.link.peer_id());
                Vec::new()
            }
        }
    }

    /// Handle a `signalingstatechange` notification.
    pub fn handle_signaling_state_change(&mut self, raw: &str) -> Vec<LinkEvent> {
        match raw.parse::<SignalingState>() {
            Ok(state) => self.on_signaling_transition(state),
            Err(err) => {
                warn!(
                    "{}: ignoring signaling state change: {err}",
                    self.link.peer_id()
                );
                Vec::new()
            }
        }
    }

    /// Handle a `connectionstatechange` notification.
    ///
    /// Only one combination matters: an aggregate failure while the ICE
    /// layer still reports disconnected, which Chromium produces instead of
    /// an ICE failure. It is promoted to one so the failure policy runs.
    pub fn handle_connection_state_change(&mut self, raw: &str, now: Instant) -> Vec<LinkEvent> {
        let state = match raw.parse::<PeerConnectionState>() {
            Ok(state) => state,
            Err(err) => {
                warn!(
                    "{}: ignoring connection state change: {err}",
                    self.link.peer_id()
                );
                return Vec::new();
            }
        };
        if state == PeerConnectionState::Failed
            && self.last_ice == Some(IceConnectionState::Disconnected)
        {
            return self.on_ice_transition(IceConnectionState::Failed, now);
        }
        Vec::new()
    }

    /// Advance the adapter's clock.
    ///
    /// Emits [`LinkEvent::DisconnectedLong`] once a disconnection has
    /// outlived its grace period, attempting one budgeted ICE restart on
    /// the way. Cheap to call at any cadence; does nothing while no
    /// deadline is armed.
    pub fn tick(&mut self, now: Instant) -> Vec<LinkEvent> {
        let Some(deadline) = self.disconnected_deadline else {
            return Vec::new();
        };
        if now < deadline {
            return Vec::new();
        }
        // An armed deadline implies the last ICE transition was to
        // Disconnected; any later transition would have cleared it.
        self.disconnected_deadline = None;
        debug!(
            "{}: still disconnected after {:?}",
            self.link.peer_id(),
            self.config.disconnected_grace
        );
        if self.restart_attempts < self.config.max_ice_restarts {
            self.try_ice_restart();
        }
        vec![LinkEvent::DisconnectedLong]
    }

    fn on_ice_transition(&mut self, state: IceConnectionState, now: Instant) -> Vec<LinkEvent> {
        if self.last_ice == Some(state) {
            return Vec::new();
        }
        self.last_ice = Some(state);
        self.disconnected_deadline = None;
        let mut events = vec![LinkEvent::IceState(state)];
        match state {
            IceConnectionState::Connected | IceConnectionState::Completed => {
                self.restart_attempts = 0;
            }
            IceConnectionState::Disconnected => {
                if self.config.mode == DeploymentMode::Direct {
                    self.disconnected_deadline = Some(now + self.config.disconnected_grace);
                }
            }
            IceConnectionState::Failed => {
                if self.config.mode == DeploymentMode::Direct {
                    if self.restart_attempts < self.config.max_ice_restarts {
                        self.try_ice_restart();
                    } else {
                        events.push(LinkEvent::FailedNoRestart);
                    }
                }
            }
            IceConnectionState::New | IceConnectionState::Checking | IceConnectionState::Closed => {}
        }
        events
    }

    fn on_signaling_transition(&mut self, state: SignalingState) -> Vec<LinkEvent> {
        if self.last_signaling == Some(state) {
            return Vec::new();
        }
        self.last_signaling = Some(state);
        vec![LinkEvent::SignalingState(state)]
    }

    /// Restart ICE if this side is allowed to: only the initiator restarts,
    /// and only from a stable signaling state. A skipped restart does not
    /// consume budget, so a link that is never eligible also never reports
    /// its budget as exhausted.
    fn try_ice_restart(&mut self) {
        if !self.link.is_initiator() || self.link.signaling_state() != SignalingState::Stable {
            return;
        }
        self.restart_attempts += 1;
        debug!(
            "{}: attempting ICE restart {}/{}",
            self.link.peer_id(),
            self.restart_attempts,
            self.config.max_ice_restarts
        );
        self.link.restart_ice();
    }
}
