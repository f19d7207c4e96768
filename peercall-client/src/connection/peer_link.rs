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

use crate::connection::ice::{IceConnectionState, PeerConnectionState, SignalingState};

/// One underlying real-time media transport for one remote participant.
///
/// This is the seam between the status machinery and whatever
/// peer-connection object the platform provides. The adapter only ever
/// reads current state or requests an ICE restart through it, so embedders
/// wrap their native transport once and tests substitute a scripted fake.
///
/// A link may be destroyed and replaced by a fresh one carrying the same
/// participant identity (reconnection, renegotiation after a server-side
/// ICE restart); the roster hands the replacement to the same engine.
pub trait PeerLink {
    /// Stable identifier of the remote participant slot this link serves.
    fn peer_id(&self) -> &str;

    /// Current ICE connectivity state reported by the transport.
    fn ice_connection_state(&self) -> IceConnectionState;

    /// Current aggregated connection state reported by the transport.
    fn connection_state(&self) -> PeerConnectionState;

    /// Current offer/answer negotiation state.
    fn signaling_state(&self) -> SignalingState;

    /// Whether the local side created the offer for this link. Only the
    /// offerer may trigger ICE restarts.
    fn is_initiator(&self) -> bool;

    /// Ask the transport to restart ICE candidate gathering.
    fn restart_ice(&self);
}
