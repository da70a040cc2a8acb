//! Gameplay tunables. Defaults are the compiled-in constants; with the
//! `serde_json` feature a page can override any subset of them.

pub const TIME_BUDGET_SECS: u32 = 180;
pub const CORRECT_REWARD: u32 = 10;
pub const ADVANCE_DELAY_MS: u32 = 500;
pub const TICK_MS: u32 = 1000;

pub const CORRECT_SOUND: &str = "/sounds/correct.mp3";
pub const INCORRECT_SOUND: &str = "/sounds/incorrect.mp3";

/// What happens to typing once the countdown has reached zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExpiredInput {
    /// Input is ignored and the field disabled.
    #[default]
    Lock,
    /// Play continues without a clock (scores still count).
    Accept,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub time_budget_secs: u32,
    pub reward: u32,
    pub advance_delay_ms: u32,
    pub tick_ms: u32,
    /// Whether the skip button also clears a half-typed answer.
    pub clear_input_on_skip: bool,
    pub expired_input: ExpiredInput,
    pub correct_sound: String,
    pub incorrect_sound: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: TIME_BUDGET_SECS,
            reward: CORRECT_REWARD,
            advance_delay_ms: ADVANCE_DELAY_MS,
            tick_ms: TICK_MS,
            clear_input_on_skip: true,
            expired_input: ExpiredInput::Lock,
            correct_sound: CORRECT_SOUND.to_string(),
            incorrect_sound: INCORRECT_SOUND.to_string(),
        }
    }
}

#[cfg(feature = "serde_json")]
impl GameConfig {
    /// Parse a (possibly partial) JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        use serde::de::Error as _;
        let cfg: GameConfig = serde_json::from_str(json)?;
        if cfg.tick_ms == 0 {
            return Err(serde_json::Error::custom("tick_ms must be positive"));
        }
        if cfg.time_budget_secs == 0 {
            return Err(serde_json::Error::custom("time_budget_secs must be positive"));
        }
        Ok(cfg)
    }
}
