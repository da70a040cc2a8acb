//! Pinyin typing game core crate.
//!
//! A prompt (one Hanzi or a short word) is shown and the player types its
//! toneless pinyin before the three-minute clock runs out. Gameplay rules live
//! in plain Rust (`session`, `menu`, `vocab`) and are testable natively; the
//! `ui` module is the thin web-sys shell that renders them and drives the
//! timers in the browser.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod cue;
pub mod logging;
pub mod menu;
pub mod rng;
pub mod session;
pub mod timer;
pub mod ui;
pub mod vocab;

pub use config::{ExpiredInput, GameConfig};
pub use session::{Feedback, InputOutcome, PendingAdvance, Phase, Session, SessionState, TickOutcome};
pub use vocab::{BEGINNER_CHARS, INTERMEDIATE_CHARS, Mode, VocabEntry};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);
}

/// Mount the menu with the built-in settings.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    ui::mount(GameConfig::default())
}

/// Mount the menu with settings overridden by a JSON document, e.g.
/// `{"time_budget_secs": 60, "expired_input": "accept"}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json).map_err(|e| {
        log::warn!("rejected game config: {}", e);
        JsValue::from_str(&e.to_string())
    })?;
    ui::mount(config)
}
