//! # peercall-client
//!
//! Connection-quality tracking for multi-party calls.
//!
//! A [`CallRoster`] holds one status engine per participant and maps every
//! participant's peer link to the indicators a video tile renders: which
//! message to show, whether to spin, whether to warn. Engines survive link
//! replacement, so a participant keeps their displayed history while ICE is
//! renegotiated underneath them.
//!
//! The crate is transport-agnostic. Embedders implement [`PeerLink`] over
//! whatever peer connection object they have and forward its state-change
//! notifications as the raw strings the platform reports:
//!
//! ```ignore
//! use peercall_client::{CallRoster, LinkConfig};
//! use web_time::Instant;
//!
//! let mut roster = CallRoster::new(LinkConfig::default());
//! roster.link_established("alice", alice_link, Instant::now());
//!
//! // Forward link notifications as they arrive.
//! roster.ice_state_changed("alice", "disconnected", Instant::now());
//!
//! // Drive the clock-based policies, e.g. once a second.
//! roster.tick(Instant::now());
//!
//! // Render.
//! if let Some(indicators) = roster.indicators("alice") {
//!     tile.set_spinner(indicators.show_loading);
//!     tile.set_warning(indicators.show_not_connected, indicators.message_key);
//! }
//! ```
//!
//! Status changes are also published as [`CallEvent`]s on a global bus
//! (see [`subscribe_call_events`]) and mirrored to the `peercall-diagnostics`
//! stream, so UI layers can re-render reactively instead of polling.

mod call_roster;
pub mod config;
pub mod connection;
pub mod constants;
mod error;
mod event_bus;
mod events;

pub use call_roster::CallRoster;
pub use config::{DeploymentMode, LinkConfig};
pub use connection::{
    present, ConnectionStatus, ConnectionStatusEngine, IceConnectionState, LinkAdapter,
    LinkDisplay, LinkEvent, MessageKey, PeerConnectionState, PeerLink, SignalingState,
    TileIndicators,
};
pub use error::StateParseError;
pub use event_bus::{emit_call_event, global_call_sender, subscribe_call_events};
pub use events::CallEvent;
