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

//! Connection-quality state for every participant in one call.
//!
//! The roster owns a [`ConnectionStatusEngine`] per participant plus the
//! adapter for whichever link currently backs it. Engines outlive links:
//! tearing a link down and attaching a replacement keeps the participant's
//! displayed history, while the old adapter, and with it any pending
//! deadline, is dropped on the spot. Status changes and synthesized events
//! are published on the global call event bus and mirrored to the
//! diagnostics stream.
//!
//! All methods absorb bad input: unknown participants, stale links and
//! garbled state strings are logged and ignored.

use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info, warn};
use peercall_diagnostics::{global_sender, metric, now_ms, DiagEvent};
use web_time::Instant;

use crate::config::LinkConfig;
use crate::connection::link_adapter::{LinkAdapter, LinkEvent};
use crate::connection::peer_link::PeerLink;
use crate::connection::presentation::{present, TileIndicators};
use crate::connection::status_engine::{ConnectionStatusEngine, LinkDisplay};
use crate::event_bus::emit_call_event;
use crate::events::CallEvent;

struct ParticipantSlot {
    engine: ConnectionStatusEngine,
    adapter: Option<LinkAdapter>,
}

/// Per-call registry of participants and their connection quality.
pub struct CallRoster {
    participants: HashMap<String, ParticipantSlot>,
    config: LinkConfig,
}

impl Default for CallRoster {
    fn default() -> Self {
        Self::new(LinkConfig::default())
    }
}

impl CallRoster {
    pub fn new(config: LinkConfig) -> Self {
        Self {
            participants: HashMap::new(),
            config,
        }
    }

    /// Add a participant with no link yet. Adding an existing participant
    /// is a no-op.
    pub fn participant_joined(&mut self, participant_id: &str) {
        self.ensure_participant(participant_id);
    }

    /// Drop a participant and all of its state.
    pub fn participant_left(&mut self, participant_id: &str) {
        if self.participants.remove(participant_id).is_some() {
            debug!("{participant_id}: removed from roster");
            emit_call_event(CallEvent::ParticipantRemoved(participant_id.to_string()));
        } else {
            debug!("{participant_id}: leave for unknown participant");
        }
    }

    /// Attach a link to a participant, adding the participant first if the
    /// link arrived before the roster update.
    ///
    /// The link's current states are read once immediately, so a link that
    /// is already in trouble shows as such without waiting for it to
    /// re-announce itself.
    pub fn link_established(
        &mut self,
        participant_id: &str,
        link: Rc<dyn PeerLink>,
        now: Instant,
    ) {
        if link.peer_id() != participant_id {
            // Likely a stale link from a previous negotiation round; track
            // it anyway under the id the embedder routed it to.
            warn!(
                "{participant_id}: attaching a link that reports peer id {:?}",
                link.peer_id()
            );
        }
        self.ensure_participant(participant_id);
        let config = self.config.clone();
        if let Some(slot) = self.participants.get_mut(participant_id) {
            slot.engine.attach_link();
            let mut adapter = LinkAdapter::new(link, config);
            let events = adapter.prime(now);
            slot.adapter = Some(adapter);
            emit_call_event(CallEvent::LinkAttached(participant_id.to_string()));
            Self::apply_events(participant_id, &mut slot.engine, events);
        }
    }

    /// Swap a participant's link for a new one.
    ///
    /// The displayed history carries over to the replacement; the old
    /// adapter's pending grace deadline and restart budget do not.
    pub fn link_replaced(&mut self, participant_id: &str, link: Rc<dyn PeerLink>, now: Instant) {
        self.link_established(participant_id, link, now);
    }

    /// Detach a participant's link without a replacement. The participant
    /// stays in the roster and shows nothing until a new link is attached.
    pub fn link_cleared(&mut self, participant_id: &str) {
        if let Some(slot) = self.participants.get_mut(participant_id) {
            if slot.adapter.take().is_some() {
                slot.engine.detach_link();
                emit_call_event(CallEvent::LinkDetached(participant_id.to_string()));
            }
        }
    }

    /// Route an `iceconnectionstatechange` notification to a participant.
    pub fn ice_state_changed(&mut self, participant_id: &str, state: &str, now: Instant) {
        let Some(slot) = self.participants.get_mut(participant_id) else {
            debug!("{participant_id}: ICE state change for unknown participant");
            return;
        };
        let events = match slot.adapter.as_mut() {
            Some(adapter) => adapter.handle_ice_state_change(state, now),
            None => {
                debug!("{participant_id}: ICE state change without a link");
                return;
            }
        };
        Self::apply_events(participant_id, &mut slot.engine, events);
    }

    /// Route a `signalingstatechange` notification to a participant.
    pub fn signaling_state_changed(&mut self, participant_id: &str, state: &str) {
        let Some(slot) = self.participants.get_mut(participant_id) else {
            debug!("{participant_id}: signaling state change for unknown participant");
            return;
        };
        let events = match slot.adapter.as_mut() {
            Some(adapter) => adapter.handle_signaling_state_change(state),
            None => return,
        };
        Self::apply_events(participant_id, &mut slot.engine, events);
    }

    /// Route a `connectionstatechange` notification to a participant.
    pub fn connection_state_changed(&mut self, participant_id: &str, state: &str, now: Instant) {
        let Some(slot) = self.participants.get_mut(participant_id) else {
            debug!("{participant_id}: connection state change for unknown participant");
            return;
        };
        let events = match slot.adapter.as_mut() {
            Some(adapter) => adapter.handle_connection_state_change(state, now),
            None => return,
        };
        Self::apply_events(participant_id, &mut slot.engine, events);
    }

    /// Advance every participant's clock-driven policy.
    ///
    /// The embedder calls this at whatever cadence suits it; once a second
    /// is plenty for a five second grace period.
    pub fn tick(&mut self, now: Instant) {
        for (participant_id, slot) in self.participants.iter_mut() {
            if let Some(adapter) = slot.adapter.as_mut() {
                let events = adapter.tick(now);
                if !events.is_empty() {
                    Self::apply_events(participant_id, &mut slot.engine, events);
                }
            }
        }
    }

    /// Raw display snapshot for one participant, or `None` if unknown.
    pub fn display(&self, participant_id: &str) -> Option<LinkDisplay> {
        self.participants
            .get(participant_id)
            .map(|slot| slot.engine.current_display())
    }

    /// Render-ready indicators for one participant, or `None` if unknown.
    pub fn indicators(&self, participant_id: &str) -> Option<TileIndicators> {
        self.display(participant_id)
            .map(|display| present(&display))
    }

    /// Number of participants currently showing a connection warning.
    pub fn problem_count(&self) -> usize {
        self.participants
            .values()
            .filter(|slot| present(&slot.engine.current_display()).show_not_connected)
            .count()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn participant_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.participants.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn ensure_participant(&mut self, participant_id: &str) {
        if self.participants.contains_key(participant_id) {
            return;
        }
        debug!("{participant_id}: added to roster");
        let mut engine = ConnectionStatusEngine::new();
        engine.set_legacy_negotiation_escalation(self.config.legacy_negotiation_escalation);
        self.participants.insert(
            participant_id.to_string(),
            ParticipantSlot {
                engine,
                adapter: None,
            },
        );
        emit_call_event(CallEvent::ParticipantAdded(participant_id.to_string()));
    }

    /// Feed adapter events to the participant's engine, publishing bus and
    /// diagnostics updates for anything a subscriber could observe.
    fn apply_events(
        participant_id: &str,
        engine: &mut ConnectionStatusEngine,
        events: Vec<LinkEvent>,
    ) {
        for event in events {
            let before = engine.current_display().status;
            engine.on_link_event(event);
            if event == LinkEvent::DisconnectedLong {
                emit_call_event(CallEvent::DisconnectedLong {
                    participant_id: participant_id.to_string(),
                });
            }
            let after = engine.current_display();
            if after.status != before {
                info!(
                    "{participant_id}: connection status {before} -> {}",
                    after.status
                );
                emit_call_event(CallEvent::StatusChanged {
                    participant_id: participant_id.to_string(),
                    status: after.status,
                });
                Self::publish_status_metrics(participant_id, &after);
            }
        }
    }

    fn publish_status_metrics(participant_id: &str, display: &LinkDisplay) {
        let _ = global_sender().send(DiagEvent {
            subsystem: "connection",
            participant_id: Some(participant_id.to_string()),
            ts_ms: now_ms(),
            metrics: vec![
                metric!("status", display.status.to_string()),
                metric!("ever_connected", display.ever_connected),
                metric!("giving_up", display.giving_up),
            ],
        });
    }
}
