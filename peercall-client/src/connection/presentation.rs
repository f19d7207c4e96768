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

//! Pure mapping from a [`LinkDisplay`] snapshot to the indicators a video
//! tile renders. UI frameworks consume [`TileIndicators`] directly and keep
//! no connection logic of their own.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::connection::status_engine::{ConnectionStatus, LinkDisplay};

/// Stable identifier for the localized message a tile shows, one per
/// [`ConnectionStatus`]. Serialized in kebab-case so the identifiers double
/// as translation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKey {
    None,
    Problems,
    Lost,
    NotEstablished,
    LostNoRetry,
    NotEstablishedNoRetry,
}

impl From<ConnectionStatus> for MessageKey {
    fn from(status: ConnectionStatus) -> Self {
        match status {
            ConnectionStatus::None => MessageKey::None,
            ConnectionStatus::Problems => MessageKey::Problems,
            ConnectionStatus::Lost => MessageKey::Lost,
            ConnectionStatus::NotEstablished => MessageKey::NotEstablished,
            ConnectionStatus::LostNoRetry => MessageKey::LostNoRetry,
            ConnectionStatus::NotEstablishedNoRetry => MessageKey::NotEstablishedNoRetry,
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MessageKey::None => "none",
            MessageKey::Problems => "problems",
            MessageKey::Lost => "lost",
            MessageKey::NotEstablished => "not-established",
            MessageKey::LostNoRetry => "lost-no-retry",
            MessageKey::NotEstablishedNoRetry => "not-established-no-retry",
        };
        write!(f, "{s}")
    }
}

/// Everything a video tile needs to render connection quality.
///
/// `show_loading` and `show_not_connected` are not independent:
/// `show_loading` implies `show_not_connected`, and both are false for a
/// participant without a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileIndicators {
    pub message_key: MessageKey,
    pub show_loading: bool,
    pub show_not_connected: bool,
}

impl TileIndicators {
    /// Indicators for a participant with no remote media link. Such a
    /// participant shows neither a spinner nor a quality warning.
    pub fn hidden() -> Self {
        Self {
            message_key: MessageKey::None,
            show_loading: false,
            show_not_connected: false,
        }
    }
}

/// Map an engine snapshot to tile indicators.
///
/// The spinner keeps turning as long as the link is not cleanly connected
/// and retries are still possible; it stops, leaving only the warning, once
/// the link has given up.
pub fn present(display: &LinkDisplay) -> TileIndicators {
    if !display.has_link {
        return TileIndicators::hidden();
    }
    let show_not_connected = display.status != ConnectionStatus::None || !display.ever_connected;
    let show_loading = show_not_connected && !display.giving_up;
    TileIndicators {
        message_key: display.status.into(),
        show_loading,
        show_not_connected,
    }
}
