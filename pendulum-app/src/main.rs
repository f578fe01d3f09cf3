//! Desktop viewer for the double pendulum.
//!
//! Usage: `double-pendulum [preset]`
//!
//! Presets are read from `$PENDULUM_PRESETS` (default `presets/`). Logging
//! follows `RUST_LOG`, defaulting to `info`.

mod controls;
mod surface;

use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pendulum_core::config::{PresetLoader, SimulationConfig};
use pendulum_core::render::DrawSurface;
use pendulum_core::simulation::Simulation;

use crate::controls::{event_for, Action};
use crate::surface::MacroquadSurface;

const BINDINGS: [(KeyCode, Action); 14] = [
    (KeyCode::R, Action::Reset),
    (KeyCode::T, Action::ToggleTrail),
    (KeyCode::LeftBracket, Action::DampingDown),
    (KeyCode::RightBracket, Action::DampingUp),
    (KeyCode::Minus, Action::GravityDown),
    (KeyCode::Equal, Action::GravityUp),
    (KeyCode::Key1, Action::Mass1Down),
    (KeyCode::Key2, Action::Mass1Up),
    (KeyCode::Key3, Action::Mass2Down),
    (KeyCode::Key4, Action::Mass2Up),
    (KeyCode::Key5, Action::Length1Down),
    (KeyCode::Key6, Action::Length1Up),
    (KeyCode::Key7, Action::Length2Down),
    (KeyCode::Key8, Action::Length2Up),
];

fn window_conf() -> Conf {
    Conf {
        window_title: "Double Pendulum".to_owned(),
        window_width: 1200,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

fn load_config() -> SimulationConfig {
    let Some(name) = std::env::args().nth(1) else {
        return SimulationConfig::default();
    };
    let base = std::env::var("PENDULUM_PRESETS").unwrap_or_else(|_| "presets".to_string());

    match PresetLoader::new(&base).load(&name) {
        Ok(config) => {
            info!(preset = %name, "using preset");
            config
        }
        Err(err) => {
            error!(preset = %name, %err, "could not load preset, using defaults");
            SimulationConfig::default()
        }
    }
}

fn draw_hud(sim: &Simulation) {
    let p = sim.params();
    let line = format!(
        "m1 {:.1}  m2 {:.1}  l1 {:.0}  l2 {:.0}  g {:.2}  d {:.2}  |  t {:.1}s  E {:.1}  |  [R]eset [T]rail [ ] damping - = gravity",
        p.m1,
        p.m2,
        p.l1,
        p.l2,
        p.g,
        p.d,
        sim.elapsed(),
        sim.energy()
    );
    draw_text(&line, 12.0, 24.0, 20.0, LIGHTGRAY);
    draw_text(
        "[1 2] m1  [3 4] m2  [5 6] l1  [7 8] l2",
        12.0,
        48.0,
        20.0,
        LIGHTGRAY,
    );
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config();
    let mut sim = Simulation::from_config(&config);
    let mut surface = MacroquadSurface::new(screen_width() as f64, screen_height() as f64);

    info!(params = ?sim.params(), stepping = ?sim.stepping(), "starting simulation");

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let size = (screen_width() as f64, screen_height() as f64);
        if size != surface.size() {
            surface.resize(size.0, size.1);
        }

        for (key, action) in BINDINGS {
            if is_key_pressed(key) {
                let event = event_for(action, sim.params());
                sim.apply(event);
            }
        }

        sim.frame(&mut surface);
        draw_hud(&sim);

        next_frame().await;
    }

    info!(ticks = sim.ticks(), "exiting");
}
