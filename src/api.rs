use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::{Html, Response},
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

use crate::assets::SpriteInstruction;
use crate::hotbar::HotbarSlot;
use crate::message::{Cue, Effect, PlayerCommand};
use crate::room::Room;
use crate::save;
use crate::window::DetailWindow;

pub type SharedState = Arc<Mutex<Room>>;
pub type Tx = broadcast::Sender<String>;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PlayerView {
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub sprite: SpriteInstruction,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpawnerView {
    pub object_id: String,
    pub sprite: SpriteInstruction,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StationView {
    pub kind: String,  // "cauldron" or "furnace"
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub contents: Vec<String>,  // item ids already fed in
}

/// Client-facing rendering of an Effect. Save requests are handled
/// server-side and never serialized.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameEvent {
    pub kind: String,  // "toast" or "cue"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cue: Option<Cue>,
}

impl GameEvent {
    fn from_effect(effect: &Effect) -> Option<Self> {
        match effect {
            Effect::Toast(text) => Some(GameEvent {
                kind: "toast".to_string(),
                text: Some(text.clone()),
                cue: None,
            }),
            Effect::Cue(cue) => Some(GameEvent {
                kind: "cue".to_string(),
                text: None,
                cue: Some(*cue),
            }),
            Effect::Save => None,
        }
    }
}

/// One full frame for the client: everything it needs to redraw from
/// scratch, plus the events produced by the command that triggered it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GameUpdate {
    pub player: PlayerView,
    pub spawners: Vec<SpawnerView>,
    pub stations: Vec<StationView>,
    pub hotbar: Vec<HotbarSlot>,
    pub window: Option<DetailWindow>,
    pub images: HashMap<String, String>,  // image key -> url
    pub events: Vec<GameEvent>,
}

pub fn room_to_update(room: &Room) -> GameUpdate {
    let spawners: Vec<SpawnerView> = room
        .spawners
        .iter()
        .filter_map(|spawner| {
            spawner.sprite(&room.player).map(|sprite| SpawnerView {
                object_id: spawner.object_id().to_string(),
                sprite,
            })
        })
        .collect();

    let mut stations = Vec::new();
    if let Some(cauldron) = &room.cauldron {
        stations.push(StationView {
            kind: "cauldron".to_string(),
            x: cauldron.x,
            y: cauldron.y,
            image: cauldron.image.clone(),
            contents: cauldron.contents.clone(),
        });
    }
    if let Some(furnace) = &room.furnace {
        stations.push(StationView {
            kind: "furnace".to_string(),
            x: furnace.x,
            y: furnace.y,
            image: furnace.image.clone(),
            contents: furnace.contents.clone(),
        });
    }

    GameUpdate {
        player: PlayerView {
            x: room.player.x,
            y: room.player.y,
            target_x: room.player.target_x(),
            sprite: room.player.sprite(&room.catalog),
        },
        spawners,
        stations,
        hotbar: room.player.hotbar.slots().to_vec(),
        window: room.window.clone(),
        images: room.catalog.urls(),
        events: Vec::new(),
    }
}

/// Turn a mutation's effects into client events, performing the save
/// here if one was requested.
pub fn dispatch_effects(room: &Room, effects: Vec<Effect>) -> Vec<GameEvent> {
    let wants_save = effects.iter().any(|e| matches!(e, Effect::Save));
    if wants_save {
        if let Err(err) = save::write(save::SAVE_PATH, &room.to_save()) {
            log::error!("could not write {}: {err}", save::SAVE_PATH);
        }
    }
    effects.iter().filter_map(GameEvent::from_effect).collect()
}

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../client/index.html"))
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    axum::extract::State((state, tx)): axum::extract::State<(SharedState, Tx)>,
) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state, tx))
}

async fn handle_socket(socket: WebSocket, state: SharedState, tx: Tx) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = tx.subscribe();

    // Every connection views and controls the one avatar.
    let initial_state = {
        let room = state.lock().unwrap();
        serde_json::to_string(&room_to_update(&room)).unwrap()
    };
    let _ = sender.send(Message::Text(initial_state)).await;

    // Forward broadcast updates to this client.
    let mut send_task = tokio::spawn(async move {
        while let Ok(msg) = rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Apply commands from this client and broadcast the result.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(Message::Text(text))) = receiver.next().await {
            match serde_json::from_str::<PlayerCommand>(&text) {
                Ok(cmd) => {
                    let update = {
                        let mut room = state.lock().unwrap();
                        let effects = room.handle_command(&cmd);
                        let events = dispatch_effects(&room, effects);
                        let mut update = room_to_update(&room);
                        update.events = events;
                        serde_json::to_string(&update).unwrap()
                    };
                    let _ = tx.send(update);
                }
                Err(err) => {
                    log::warn!("discarding malformed command: {err}");
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };
}
