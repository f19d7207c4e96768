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

use crate::connection::status_engine::ConnectionStatus;

/// Events published on the global call event bus.
///
/// UI layers subscribe to re-render the affected tile; headless embedders
/// subscribe for call-quality reporting. Display state itself is pulled
/// from the roster, not carried on the bus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallEvent {
    // === Roster events ===
    /// A participant was added to the roster.
    ParticipantAdded(String),
    /// A participant left and its state was dropped.
    ParticipantRemoved(String),

    // === Link events ===
    /// A link now backs the participant's tile.
    LinkAttached(String),
    /// The participant's link was torn down without a replacement.
    LinkDetached(String),
    /// A direct link stayed disconnected for the whole grace period.
    DisconnectedLong { participant_id: String },

    // === Status events ===
    /// The participant's displayed status changed.
    StatusChanged {
        participant_id: String,
        status: ConnectionStatus,
    },
}
