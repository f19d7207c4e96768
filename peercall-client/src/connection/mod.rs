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

//! Connection-quality tracking for a single peer link: raw state parsing,
//! the per-participant status engine, and the presentation mapping.

pub mod ice;
pub mod link_adapter;
pub mod peer_link;
pub mod presentation;
pub mod status_engine;

pub use ice::{IceConnectionState, PeerConnectionState, SignalingState};
pub use link_adapter::{LinkAdapter, LinkEvent};
pub use peer_link::PeerLink;
pub use presentation::{present, MessageKey, TileIndicators};
pub use status_engine::{ConnectionStatus, ConnectionStatusEngine, LinkDisplay};
