use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{game::GameStateResponse, sse::ServerEvent},
    state::{
        SseHub,
        listeners::Subscription,
        orchestrator::{GameSnapshot, RoundOrchestrator},
    },
};

/// Event name carrying a full [`GameStateResponse`].
pub const EVENT_GAME_STATE: &str = "game.state";

/// Push every snapshot published by `orchestrator` onto `hub`.
pub fn forward_game_snapshots(orchestrator: &RoundOrchestrator, hub: SseHub) -> Subscription {
    orchestrator.subscribe(move |snapshot: &GameSnapshot| {
        broadcast_game_state(&hub, snapshot);
    })
}

/// Broadcast one game snapshot to the SSE subscribers.
pub fn broadcast_game_state(hub: &SseHub, snapshot: &GameSnapshot) {
    if let Some(event) = game_state_event(snapshot) {
        hub.broadcast(event);
    }
}

/// Serialise a snapshot into the `game.state` event.
pub fn game_state_event(snapshot: &GameSnapshot) -> Option<ServerEvent> {
    let payload = GameStateResponse::from(snapshot.clone());
    to_event(EVENT_GAME_STATE, &payload)
}

fn to_event(event: &str, payload: &impl Serialize) -> Option<ServerEvent> {
    match ServerEvent::json(Some(event.to_string()), payload) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(event, error = %err, "failed to serialize SSE payload");
            None
        }
    }
}
