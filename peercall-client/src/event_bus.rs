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

//! Global broadcast bus for [`CallEvent`]s.
//!
//! One process-wide channel decouples the roster from however many UI
//! surfaces happen to be listening. Publishing never blocks and never
//! fails: with no subscribers events are discarded, and a slow subscriber
//! loses the oldest events rather than stalling the call.
//!
//! ```ignore
//! let mut events = peercall_client::subscribe_call_events();
//! while let Ok(event) = events.recv().await {
//!     if let CallEvent::StatusChanged { participant_id, .. } = event {
//!         rerender_tile(&participant_id);
//!     }
//! }
//! ```

use async_broadcast::{broadcast, InactiveReceiver, Receiver, Sender};
use log::debug;
use once_cell::sync::Lazy;

use crate::events::CallEvent;

const EVENT_BUS_CAPACITY: usize = 256;

/// The held receiver is inactive so the channel stays open without anyone
/// subscribed, at no buffering cost.
static EVENT_BUS: Lazy<(Sender<CallEvent>, InactiveReceiver<CallEvent>)> = Lazy::new(|| {
    let (mut sender, receiver) = broadcast(EVENT_BUS_CAPACITY);
    sender.set_overflow(true);
    (sender, receiver.deactivate())
});

/// Sender half of the global bus, for embedders that publish their own
/// call-level events alongside the roster's.
pub fn global_call_sender() -> Sender<CallEvent> {
    EVENT_BUS.0.clone()
}

/// Subscribe to call events. Each receiver sees every event published
/// after it subscribed.
pub fn subscribe_call_events() -> Receiver<CallEvent> {
    EVENT_BUS.1.activate_cloned()
}

/// Publish an event, dropping it if nobody is listening.
pub fn emit_call_event(event: CallEvent) {
    if let Ok(Some(_)) = EVENT_BUS.0.try_broadcast(event) {
        debug!("call event bus full, dropped the oldest event");
    }
}
