//! Floorplan VR: declarative floorplans as walkable 3D rooms
//!
//! - Stacked floors described as data (slabs and walls)
//! - Per-kind generators turn each entry into a textured box
//! - Texture tiling follows the physical size of every surface
//! - Top-down view with two pointer controllers

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod compiler;
mod config;
mod error;
mod generator;
mod material;
mod shell;
mod world;

use std::sync::OnceLock;
use log::{error, info, warn};
use macroquad::prelude::*;
use app::SceneBuildContext;
use config::{load_config_if_present, ViewerConfig, CONFIG_FILE};
use world::create_demo_floorplan;

/// Config read once at startup, before the window and the logger exist.
/// A broken file is kept as its error message so it can be logged later.
static STARTUP_CONFIG: OnceLock<Result<ViewerConfig, String>> = OnceLock::new();

fn startup_config() -> &'static Result<ViewerConfig, String> {
    STARTUP_CONFIG.get_or_init(|| match load_config_if_present(CONFIG_FILE) {
        Ok(config) => Ok(config.unwrap_or_default()),
        Err(e) => Err(format!("Ignoring {}: {}", CONFIG_FILE, e)),
    })
}

fn window_conf() -> Conf {
    let config = startup_config().clone().unwrap_or_default();
    Conf {
        window_title: format!("{} v{}", config.window_title, VERSION),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, config_problem) = match startup_config() {
        Ok(config) => (config.clone(), None),
        Err(problem) => (ViewerConfig::default(), Some(problem)),
    };

    // RUST_LOG, when set, overrides the configured level
    env_logger::Builder::new()
        .filter_level(config.level_filter())
        .parse_default_env()
        .init();

    info!("=== Floorplan VR v{} ===", VERSION);
    if let Some(problem) = config_problem {
        warn!("{}", problem);
    }

    let mut ctx = match SceneBuildContext::build(&create_demo_floorplan(), config) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Failed to build scene: {}", e);
            return;
        }
    };
    info!(
        "Scene ready: {} floors, {} solids, {:.2} high",
        ctx.stats.floors, ctx.stats.solids, ctx.stats.top_height
    );

    ctx.load_textures().await;

    loop {
        ctx.tick();
        next_frame().await;
    }
}
