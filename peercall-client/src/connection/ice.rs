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

//! Closed enums for the transport's connectivity and negotiation states.
//!
//! The transport reports these as free-form strings; parsing them into
//! closed enums up front keeps every downstream `match` exhaustive, so a
//! transport growing a new state fails loudly at the adapter boundary
//! instead of silently doing nothing deep inside the reducer.

use std::fmt;
use std::str::FromStr;

use crate::error::StateParseError;

/// ICE connectivity state of a single peer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IceConnectionState {
    New,
    Checking,
    Connected,
    Completed,
    Disconnected,
    Failed,
    Closed,
}

impl IceConnectionState {
    /// Whether a media path is currently established.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected | Self::Completed)
    }
}

impl FromStr for IceConnectionState {
    type Err = StateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "checking" => Ok(Self::Checking),
            "connected" => Ok(Self::Connected),
            "completed" => Ok(Self::Completed),
            "disconnected" => Ok(Self::Disconnected),
            "failed" => Ok(Self::Failed),
            "closed" => Ok(Self::Closed),
            other => Err(StateParseError::UnknownIceState(other.to_string())),
        }
    }
}

impl fmt::Display for IceConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Checking => "checking",
            Self::Connected => "connected",
            Self::Completed => "completed",
            Self::Disconnected => "disconnected",
            Self::Failed => "failed",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

/// Offer/answer negotiation state of a single peer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalingState {
    Stable,
    HaveLocalOffer,
    HaveRemoteOffer,
    Closed,
}

impl SignalingState {
    /// Whether an offer is pending in either direction.
    pub fn is_negotiating(&self) -> bool {
        !matches!(self, Self::Stable | Self::Closed)
    }
}

impl FromStr for SignalingState {
    type Err = StateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stable" => Ok(Self::Stable),
            "have-local-offer" => Ok(Self::HaveLocalOffer),
            "have-remote-offer" => Ok(Self::HaveRemoteOffer),
            "closed" => Ok(Self::Closed),
            other => Err(StateParseError::UnknownSignalingState(other.to_string())),
        }
    }
}

impl fmt::Display for SignalingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Stable => "stable",
            Self::HaveLocalOffer => "have-local-offer",
            Self::HaveRemoteOffer => "have-remote-offer",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

/// Aggregated connection state of a peer link.
///
/// Only `Failed` matters to this crate: some Chromium versions leave ICE
/// stuck in `disconnected` after the connection has already failed, and the
/// aggregated state is the reliable signal then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerConnectionState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl FromStr for PeerConnectionState {
    type Err = StateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "connecting" => Ok(Self::Connecting),
            "connected" => Ok(Self::Connected),
            "disconnected" => Ok(Self::Disconnected),
            "failed" => Ok(Self::Failed),
            "closed" => Ok(Self::Closed),
            other => Err(StateParseError::UnknownPeerConnectionState(
                other.to_string(),
            )),
        }
    }
}

impl fmt::Display for PeerConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Failed => "failed",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}
