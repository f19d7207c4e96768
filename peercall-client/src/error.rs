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

use thiserror::Error;

/// Errors raised when normalizing raw transport state strings.
///
/// These never cross the adapter boundary: an unrecognized value is logged
/// and the notification is dropped, since a transport growing a new state
/// must not break status tracking for the whole call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateParseError {
    #[error("unknown ICE connection state: {0}")]
    UnknownIceState(String),

    #[error("unknown signaling state: {0}")]
    UnknownSignalingState(String),

    #[error("unknown peer connection state: {0}")]
    UnknownPeerConnectionState(String),
}
