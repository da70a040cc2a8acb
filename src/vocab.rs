//! Fixed vocabulary sets, one per game mode.
//!
//! Transcriptions are toneless lowercase pinyin: what a player can type on a
//! plain keyboard without an IME.

/// A displayable prompt and the pinyin the player must type for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VocabEntry {
    pub text: &'static str,
    pub transcription: &'static str,
}

const fn entry(text: &'static str, transcription: &'static str) -> VocabEntry {
    VocabEntry { text, transcription }
}

/// Single characters for the beginner mode.
pub const BEGINNER_CHARS: &[VocabEntry] = &[
    entry("我", "wo"), entry("你", "ni"), entry("好", "hao"), entry("爱", "ai"), entry("妈", "ma"),
    entry("爸", "ba"), entry("天", "tian"), entry("地", "di"), entry("人", "ren"), entry("大", "da"),
];

/// Common two-character words for the intermediate mode.
pub const INTERMEDIATE_CHARS: &[VocabEntry] = &[
    entry("学习", "xuexi"), entry("快乐", "kuaile"), entry("朋友", "pengyou"),
    entry("家庭", "jiating"), entry("生活", "shenghuo"),
];

/// Difficulty level chosen from the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    Beginner,
    Intermediate,
}

impl Mode {
    /// Menu order.
    pub const ALL: [Mode; 2] = [Mode::Beginner, Mode::Intermediate];

    pub fn key(self) -> &'static str {
        match self {
            Mode::Beginner => "beginner",
            Mode::Intermediate => "intermediate",
        }
    }

    pub fn parse(s: &str) -> Option<Mode> {
        let s = s.trim();
        Mode::ALL.into_iter().find(|m| m.key().eq_ignore_ascii_case(s))
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Beginner => "初级模式",
            Mode::Intermediate => "中级模式",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Mode::Beginner => "适合初学者，简单汉字练习",
            Mode::Intermediate => "进阶练习，常用词组",
        }
    }

    pub fn entries(self) -> &'static [VocabEntry] {
        entries(self)
    }
}

pub fn entries(mode: Mode) -> &'static [VocabEntry] {
    match mode {
        Mode::Beginner => BEGINNER_CHARS,
        Mode::Intermediate => INTERMEDIATE_CHARS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_keys() {
        for m in Mode::ALL {
            assert_eq!(Mode::parse(m.key()), Some(m));
        }
        assert_eq!(Mode::parse("  Beginner "), Some(Mode::Beginner));
        assert_eq!(Mode::parse("expert"), None);
    }

    #[test]
    fn entries_follow_mode() {
        assert_eq!(entries(Mode::Beginner).len(), 10);
        assert_eq!(Mode::Intermediate.entries().len(), 5);
        assert_eq!(Mode::Intermediate.entries()[0], entry("学习", "xuexi"));
    }
}
