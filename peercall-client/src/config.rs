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

use web_time::Duration;

use crate::constants::{DISCONNECTED_GRACE_MS, MAX_ICE_RESTARTS};

/// Who owns reconnection and give-up policy for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    /// Every client pair negotiates directly; each client runs its own
    /// disconnection grace timer and ICE-restart budget.
    Direct,
    /// A backend media relay sits between participants and owns retry
    /// policy, so clients generate no timer-driven events of their own.
    Relayed,
}

/// Per-call configuration shared by every link adapter in a roster.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Deployment mode of the call.
    pub mode: DeploymentMode,
    /// How long ICE may stay `disconnected` before a long disconnection is
    /// reported (direct mode only).
    pub disconnected_grace: Duration,
    /// Automatic ICE restarts attempted before a link is given up on
    /// (direct mode only).
    pub max_ice_restarts: u32,
    /// Reproduce the historical escalation where an ICE `disconnected`
    /// observed during renegotiation is displayed as a lost connection.
    /// Off unless an embedder needs pixel-identical legacy behavior.
    pub legacy_negotiation_escalation: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            mode: DeploymentMode::Direct,
            disconnected_grace: Duration::from_millis(DISCONNECTED_GRACE_MS),
            max_ice_restarts: MAX_ICE_RESTARTS,
            legacy_negotiation_escalation: false,
        }
    }
}

impl LinkConfig {
    /// Configuration for a call relayed through a backend.
    pub fn relayed() -> Self {
        Self {
            mode: DeploymentMode::Relayed,
            ..Self::default()
        }
    }
}
