use anyhow::Context;
use axum::{routing::get, Router};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

mod api;
mod assets;
mod config;
mod hotbar;
mod item;
mod message;
mod player;
mod room;
mod save;
mod spawner;
mod window;

use api::SharedState;
use assets::ImageCatalog;
use config::GameConfig;
use item::ItemRegistry;
use player::Player;
use room::{Cauldron, Furnace, Room};
use spawner::PuzzleObjectSpawner;

const CONFIG_PATH: &str = "game_config.toml";
const FRAME_MILLIS: u64 = 50;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = match GameConfig::load(CONFIG_PATH) {
        Ok(cfg) => {
            log::info!("loaded game config from {CONFIG_PATH}");
            cfg
        }
        Err(e) => {
            log::warn!("could not load {CONFIG_PATH}: {e}. Using defaults.");
            let default_config = config::create_default_config();
            let _ = default_config.save(CONFIG_PATH);
            default_config
        }
    };

    let room = match build_room(&config) {
        Ok(room) => room,
        Err(e) => {
            log::error!("could not set up the game: {e:#}");
            std::process::exit(1);
        }
    };

    let state: SharedState = Arc::new(Mutex::new(room));
    let (tx, _rx) = broadcast::channel(100);

    // Frame driver: walk the avatar toward its target and broadcast
    // whenever something actually moved.
    {
        let state = state.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let dt = FRAME_MILLIS as f64 / 1000.0;
            let mut interval = tokio::time::interval(Duration::from_millis(FRAME_MILLIS));
            loop {
                interval.tick().await;
                let update = {
                    let mut room = state.lock().unwrap();
                    if room.tick(dt) {
                        Some(serde_json::to_string(&api::room_to_update(&room)).unwrap())
                    } else {
                        None
                    }
                };
                if let Some(update) = update {
                    let _ = tx.send(update);
                }
            }
        });
    }

    let app = Router::new()
        .route("/", get(api::index))
        .route("/ws", get(api::websocket_handler))
        .nest_service("/assets", ServeDir::new("assets"))
        .with_state((state, tx));

    let listener = match tokio::net::TcpListener::bind("0.0.0.0:3000").await {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            log::error!("port 3000 is already in use; stop the existing server first");
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("failed to bind to port 3000: {e}");
            std::process::exit(1);
        }
    };
    log::info!("server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}

/// Assemble the room: restore the save-game when one exists, otherwise
/// place everything fresh from config. An id in the save that the
/// registry does not know aborts the load.
fn build_room(config: &GameConfig) -> anyhow::Result<Room> {
    let registry = ItemRegistry::load_from_config(config);
    let catalog = ImageCatalog::load_from_config(config);

    let (player, spawners) = match save::load(save::SAVE_PATH)
        .with_context(|| format!("reading {}", save::SAVE_PATH))?
    {
        Some(savefile) => {
            log::info!("restoring save-game from {}", save::SAVE_PATH);
            let player = Player::from_data(&savefile.player, &registry)?;
            let spawners = savefile
                .spawners
                .iter()
                .map(|data| PuzzleObjectSpawner::from_data(data, &registry, &catalog))
                .collect::<Result<Vec<_>, _>>()?;
            (player, spawners)
        }
        None => {
            let spawn = config
                .player_spawn
                .as_ref()
                .map(|p| (p.x, p.y))
                .unwrap_or((0.0, 0.0));
            let player = Player::new(spawn.0, spawn.1);
            let spawners = config
                .spawners
                .iter()
                .map(|s| {
                    registry
                        .require_puzzle_object(&s.puzzle_object)
                        .map(|def| PuzzleObjectSpawner::new(s.x, s.y, def, &catalog))
                })
                .collect::<Result<Vec<_>, _>>()?;
            (player, spawners)
        }
    };

    let mut room = Room::new(registry, catalog, player);
    room.spawners = spawners;
    room.cauldron = config.cauldron.as_ref().map(|c| {
        let mut cauldron = Cauldron::new(c.x, c.y, c.accepts.clone());
        cauldron.image = c.image.clone();
        cauldron
    });
    room.furnace = config.furnace.as_ref().map(|f| {
        let mut furnace = Furnace::new(f.x, f.y, f.accepts.clone());
        furnace.image = f.image.clone();
        furnace
    });
    Ok(room)
}
