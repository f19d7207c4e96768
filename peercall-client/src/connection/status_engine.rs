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

//! Per-participant reducer that owns the displayed connection severity.
//!
//! One [`ConnectionStatusEngine`] lives for as long as its participant is in
//! the call. The underlying link may be torn down and replaced many times;
//! the engine is re-attached, never recreated, so a participant who already
//! had trouble is not shown a falsely clean "connecting" state while a
//! brand-new link is merely negotiating.
//!
//! The engine is a plain single-threaded reducer: it never fails, accepts
//! events in any order, and a repeated event is a no-op the second time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::connection::ice::{IceConnectionState, SignalingState};
use crate::connection::link_adapter::LinkEvent;

/// Displayed connection quality for one participant, ordered by severity.
///
/// `Lost`/`LostNoRetry` are used once the participant has connected at least
/// once during this call; `NotEstablished`/`NotEstablishedNoRetry` are used
/// if it never has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionStatus {
    None,
    Problems,
    Lost,
    NotEstablished,
    LostNoRetry,
    NotEstablishedNoRetry,
}

impl ConnectionStatus {
    /// Position in the severity order. Between resets the displayed status
    /// never moves down; only a successful ICE connection resets it.
    pub fn severity(&self) -> u8 {
        match self {
            ConnectionStatus::None => 0,
            ConnectionStatus::Problems => 1,
            ConnectionStatus::Lost | ConnectionStatus::NotEstablished => 2,
            ConnectionStatus::LostNoRetry | ConnectionStatus::NotEstablishedNoRetry => 3,
        }
    }

    /// Whether automatic retries have been given up on.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ConnectionStatus::LostNoRetry | ConnectionStatus::NotEstablishedNoRetry
        )
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionStatus::None => "none",
            ConnectionStatus::Problems => "problems",
            ConnectionStatus::Lost => "lost",
            ConnectionStatus::NotEstablished => "not-established",
            ConnectionStatus::LostNoRetry => "lost-no-retry",
            ConnectionStatus::NotEstablishedNoRetry => "not-established-no-retry",
        };
        write!(f, "{s}")
    }
}

/// Read-only snapshot of an engine, consumed by the presentation mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDisplay {
    pub status: ConnectionStatus,
    pub ever_connected: bool,
    pub giving_up: bool,
    pub has_link: bool,
}

/// Per-participant connection-quality state machine.
#[derive(Debug, Clone)]
pub struct ConnectionStatusEngine {
    status: ConnectionStatus,
    ever_connected: bool,
    giving_up: bool,
    has_link: bool,
    last_ice: Option<IceConnectionState>,
    signaling: Option<SignalingState>,
    legacy_negotiation_escalation: bool,
}

impl Default for ConnectionStatusEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionStatusEngine {
    pub fn new() -> Self {
        Self {
            status: ConnectionStatus::None,
            ever_connected: false,
            giving_up: false,
            has_link: false,
            last_ice: None,
            signaling: None,
            legacy_negotiation_escalation: false,
        }
    }

    /// Reproduce the historical renegotiation escalation (see
    /// [`crate::config::LinkConfig::legacy_negotiation_escalation`]).
    pub fn set_legacy_negotiation_escalation(&mut self, enabled: bool) {
        self.legacy_negotiation_escalation = enabled;
    }

    /// Record that a link now backs this participant.
    ///
    /// `status`, `ever_connected` and `giving_up` persist across the
    /// hand-over; the new link's own events update them.
    pub fn attach_link(&mut self) {
        self.has_link = true;
    }

    /// Record that the participant has no remote media link, a distinct
    /// state from any connectivity problem. Nothing is displayed for a
    /// participant without a link.
    pub fn detach_link(&mut self) {
        self.has_link = false;
    }

    /// Dispatch one normalized link notification.
    pub fn on_link_event(&mut self, event: LinkEvent) {
        match event {
            LinkEvent::IceState(state) => self.on_ice_state(state),
            LinkEvent::SignalingState(state) => self.on_signaling_state(state),
            LinkEvent::DisconnectedLong => self.on_disconnected_long(),
            LinkEvent::FailedNoRestart => self.on_failed_no_restart(),
        }
    }

    pub fn on_ice_state(&mut self, state: IceConnectionState) {
        self.last_ice = Some(state);
        match state {
            IceConnectionState::Connected | IceConnectionState::Completed => {
                self.status = ConnectionStatus::None;
                self.ever_connected = true;
                self.giving_up = false;
            }
            IceConnectionState::Disconnected => {
                // Sticky: a transient disconnect neither downgrades a worse
                // status nor escalates past Problems on its own.
                if self.status == ConnectionStatus::None {
                    self.status = ConnectionStatus::Problems;
                }
            }
            IceConnectionState::Failed => {
                // A hard failure is a stronger signal than a disconnect and
                // always takes effect.
                self.status = if self.ever_connected {
                    ConnectionStatus::Lost
                } else {
                    ConnectionStatus::NotEstablished
                };
            }
            // Closed is handled by detaching the link, not here.
            IceConnectionState::New | IceConnectionState::Checking | IceConnectionState::Closed => {}
        }
    }

    /// Track the negotiation state. It never changes `status` by itself;
    /// it only feeds the legacy escalation and diagnostics.
    pub fn on_signaling_state(&mut self, state: SignalingState) {
        self.signaling = Some(state);
    }

    /// A long disconnection is displayed exactly like a plain disconnect;
    /// the event exists for embedder-owned call-quality reporting.
    pub fn on_disconnected_long(&mut self) {}

    /// Automatic retries for the current link are exhausted.
    pub fn on_failed_no_restart(&mut self) {
        self.status = if self.ever_connected {
            ConnectionStatus::LostNoRetry
        } else {
            ConnectionStatus::NotEstablishedNoRetry
        };
        self.giving_up = true;
    }

    /// Whether an offer is currently pending in either direction.
    pub fn is_negotiating(&self) -> bool {
        self.signaling.is_some_and(|s| s.is_negotiating())
    }

    /// Read-only snapshot for the presentation mapping.
    pub fn current_display(&self) -> LinkDisplay {
        LinkDisplay {
            status: self.effective_status(),
            ever_connected: self.ever_connected,
            giving_up: self.giving_up,
            has_link: self.has_link,
        }
    }

    /// The stored status, escalated per the legacy renegotiation rule when
    /// that rule is enabled.
    ///
    /// The escalation is computed at read time rather than folded into
    /// `status` so that it disappears again once negotiation settles, which
    /// is how the historical implementation behaved.
    fn effective_status(&self) -> ConnectionStatus {
        if !self.legacy_negotiation_escalation {
            return self.status;
        }
        if self.is_negotiating() && self.last_ice == Some(IceConnectionState::Disconnected) {
            let escalated = if self.ever_connected {
                ConnectionStatus::Lost
            } else {
                ConnectionStatus::NotEstablished
            };
            if escalated.severity() > self.status.severity() {
                return escalated;
            }
        }
        self.status
    }
}
