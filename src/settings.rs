//! Game settings and preferences
//!
//! Persisted as a small `KEY = value` text file:
//!
//! ```text
//! WINNING_SCORE = 10
//! AI_DIFFICULTY = 'Normal'
//! ```
//!
//! A missing or unreadable file silently falls back to defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WINNING_SCORE: u32 = 10;
pub const MIN_WINNING_SCORE: u32 = 1;
pub const MAX_WINNING_SCORE: u32 = 99;

const KEY_WINNING_SCORE: &str = "WINNING_SCORE";
const KEY_AI_DIFFICULTY: &str = "AI_DIFFICULTY";

/// AI difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Extreme => "Extreme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "extreme" => Some(Difficulty::Extreme),
            _ => None,
        }
    }

    /// Per-frame chance that the AI starts a miss episode
    pub fn miss_chance(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.15,
            Difficulty::Normal => 0.05,
            Difficulty::Hard => 0.01,
            Difficulty::Extreme => 0.001,
        }
    }

    /// Next level, wrapping around
    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|d| d == self).unwrap_or(1);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous level, wrapping around
    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|d| d == self).unwrap_or(1);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Errors from reading or writing the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Match settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Points needed to win a match (1..=99)
    pub winning_score: u32,
    pub ai_difficulty: Difficulty,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            winning_score: DEFAULT_WINNING_SCORE,
            ai_difficulty: Difficulty::Normal,
        }
    }
}

impl Settings {
    pub fn new(winning_score: i64, ai_difficulty: Difficulty) -> Self {
        Self {
            winning_score: sanitize_winning_score(winning_score),
            ai_difficulty,
        }
    }

    /// Miss chance for the configured difficulty
    pub fn miss_chance(&self) -> f64 {
        self.ai_difficulty.miss_chance()
    }

    /// Parse the `KEY = value` format strictly
    ///
    /// Blank lines, `#` comments and unknown keys are skipped. Missing keys
    /// keep their defaults; out-of-range values are repaired.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line_no = index + 1;
            let Some((key, value)) = line.split_once('=') else {
                return Err(SettingsError::Parse {
                    line: line_no,
                    reason: format!("expected KEY = value, got {line:?}"),
                });
            };
            let value = unquote(strip_comment(value).trim());

            match key.trim() {
                KEY_WINNING_SCORE => {
                    let score: i64 = value.parse().map_err(|_| SettingsError::Parse {
                        line: line_no,
                        reason: format!("winning score {value:?} is not an integer"),
                    })?;
                    settings.winning_score = sanitize_winning_score(score);
                }
                KEY_AI_DIFFICULTY => {
                    settings.ai_difficulty = Difficulty::from_str(value).unwrap_or_else(|| {
                        log::warn!("Unknown AI difficulty {value:?}, using Normal");
                        Difficulty::Normal
                    });
                }
                other => log::debug!("Ignoring unknown settings key {other:?}"),
            }
        }

        Ok(settings)
    }

    /// Serialize to the `KEY = value` format
    pub fn to_config_string(&self) -> String {
        format!(
            "{KEY_WINNING_SCORE} = {}\n{KEY_AI_DIFFICULTY} = '{}'\n",
            self.winning_score,
            self.ai_difficulty.as_str()
        )
    }

    /// Load settings from `path`, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No settings file at {}, using defaults", path.display());
            return Self::default();
        }

        match fs::read_to_string(path)
            .map_err(SettingsError::from)
            .and_then(|text| Self::parse(&text))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path`
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        fs::write(path, self.to_config_string())?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Clamp into range; non-positive values mean "use the default"
pub(crate) fn sanitize_winning_score(score: i64) -> u32 {
    if score < MIN_WINNING_SCORE as i64 {
        DEFAULT_WINNING_SCORE
    } else {
        score.min(MAX_WINNING_SCORE as i64) as u32
    }
}

/// Drop a trailing `# comment` that sits outside quotes
fn strip_comment(value: &str) -> &str {
    let mut quote = None;
    for (i, c) in value.char_indices() {
        match (c, quote) {
            ('\'' | '"', None) => quote = Some(c),
            (c, Some(open)) if c == open => quote = None,
            ('#', None) => return &value[..i],
            _ => {}
        }
    }
    value
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
