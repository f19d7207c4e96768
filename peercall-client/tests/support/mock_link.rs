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

//! Scriptable [`PeerLink`] for driving a roster from tests.

use std::cell::Cell;
use std::rc::Rc;

use peercall_client::{IceConnectionState, PeerConnectionState, PeerLink, SignalingState};

pub struct MockPeerLink {
    peer_id: String,
    ice: Cell<IceConnectionState>,
    connection: Cell<PeerConnectionState>,
    signaling: Cell<SignalingState>,
    initiator: Cell<bool>,
    restarts: Cell<u32>,
}

impl MockPeerLink {
    /// A fresh link: `new`/`new`/`stable`, initiating side.
    pub fn new(peer_id: &str) -> Rc<Self> {
        Rc::new(Self {
            peer_id: peer_id.to_string(),
            ice: Cell::new(IceConnectionState::New),
            connection: Cell::new(PeerConnectionState::New),
            signaling: Cell::new(SignalingState::Stable),
            initiator: Cell::new(true),
            restarts: Cell::new(0),
        })
    }

    pub fn set_ice(&self, state: IceConnectionState) {
        self.ice.set(state);
    }

    pub fn set_connection(&self, state: PeerConnectionState) {
        self.connection.set(state);
    }

    pub fn set_signaling(&self, state: SignalingState) {
        self.signaling.set(state);
    }

    pub fn set_initiator(&self, initiator: bool) {
        self.initiator.set(initiator);
    }

    /// How many times the roster asked this link to restart ICE.
    pub fn restart_count(&self) -> u32 {
        self.restarts.get()
    }
}

impl PeerLink for MockPeerLink {
    fn peer_id(&self) -> &str {
        &self.peer_id
    }

    fn ice_connection_state(&self) -> IceConnectionState {
        self.ice.get()
    }

    fn connection_state(&self) -> PeerConnectionState {
        self.connection.get()
    }

    fn signaling_state(&self) -> SignalingState {
        self.signaling.get()
    }

    fn is_initiator(&self) -> bool {
        self.initiator.get()
    }

    fn restart_ice(&self) {
        self.restarts.set(self.restarts.get() + 1);
    }
}
