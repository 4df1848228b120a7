//! Title and settings menus
//!
//! Both menus are driven by edge-triggered actions: Up/Down move the
//! highlight (wrapping), Confirm or Fire activates, `Pick(i)` activates the
//! clicked entry directly.

use crate::input::{InputAction, InputFrame};
use crate::render::MenuView;
use crate::settings::{Difficulty, MAX_WINNING_SCORE, MIN_WINNING_SCORE, Settings};

/// Title menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleChoice {
    Start,
    Settings,
    Exit,
}

impl TitleChoice {
    const ALL: [TitleChoice; 3] = [TitleChoice::Start, TitleChoice::Settings, TitleChoice::Exit];

    fn label(self) -> &'static str {
        match self {
            TitleChoice::Start => "Start",
            TitleChoice::Settings => "Settings",
            TitleChoice::Exit => "Exit",
        }
    }
}

fn wrap(index: usize, delta: isize, len: usize) -> usize {
    (index as isize + delta).rem_euclid(len as isize) as usize
}

#[derive(Debug, Clone, Default)]
pub struct TitleMenu {
    selected: usize,
}

impl TitleMenu {
    pub fn selected(&self) -> TitleChoice {
        TitleChoice::ALL[self.selected]
    }

    /// Apply this frame's actions; returns the activated entry, if any
    pub fn handle(&mut self, input: &InputFrame) -> Option<TitleChoice> {
        for action in &input.actions {
            match action {
                InputAction::Up => self.selected = wrap(self.selected, -1, TitleChoice::ALL.len()),
                InputAction::Down => self.selected = wrap(self.selected, 1, TitleChoice::ALL.len()),
                InputAction::Confirm | InputAction::Fire => return Some(self.selected()),
                InputAction::Pick(i) if *i < TitleChoice::ALL.len() => {
                    self.selected = *i;
                    return Some(self.selected());
                }
                _ => {}
            }
        }
        None
    }

    pub fn view(&self) -> MenuView {
        MenuView {
            title: "Pong",
            items: TitleChoice::ALL.iter().map(|c| c.label().to_string()).collect(),
            selected: self.selected,
            hint: None,
        }
    }
}

/// Settings menu rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsRow {
    PointsToWin,
    AiDifficulty,
    Back,
}

const SETTINGS_ROWS: [SettingsRow; 3] = [
    SettingsRow::PointsToWin,
    SettingsRow::AiDifficulty,
    SettingsRow::Back,
];

/// Edits a copy of the settings; changes only land when Back is chosen
#[derive(Debug, Clone)]
pub struct SettingsMenu {
    selected: usize,
    points: u32,
    difficulty: Difficulty,
}

impl SettingsMenu {
    pub fn new(settings: &Settings) -> Self {
        Self {
            selected: 0,
            points: settings.winning_score,
            difficulty: settings.ai_difficulty,
        }
    }

    /// Apply this frame's actions; returns the edited settings on Back
    pub fn handle(&mut self, input: &InputFrame) -> Option<Settings> {
        for action in &input.actions {
            let row = SETTINGS_ROWS[self.selected];
            match (action, row) {
                (InputAction::Up, _) => self.selected = wrap(self.selected, -1, SETTINGS_ROWS.len()),
                (InputAction::Down, _) => self.selected = wrap(self.selected, 1, SETTINGS_ROWS.len()),
                (InputAction::Left, SettingsRow::PointsToWin) => {
                    self.points = self.points.saturating_sub(1).max(MIN_WINNING_SCORE);
                }
                (InputAction::Right, SettingsRow::PointsToWin) => {
                    self.points = (self.points + 1).min(MAX_WINNING_SCORE);
                }
                (InputAction::Left, SettingsRow::AiDifficulty) => {
                    self.difficulty = self.difficulty.prev();
                }
                (InputAction::Right, SettingsRow::AiDifficulty) => {
                    self.difficulty = self.difficulty.next();
                }
                (InputAction::Confirm | InputAction::Fire, SettingsRow::Back) => {
                    return Some(self.settings());
                }
                (InputAction::Pick(i), _) if SETTINGS_ROWS.get(*i) == Some(&SettingsRow::Back) => {
                    self.selected = *i;
                    return Some(self.settings());
                }
                _ => {}
            }
        }
        None
    }

    /// Settings as currently edited
    pub fn settings(&self) -> Settings {
        Settings::new(self.points as i64, self.difficulty)
    }

    pub fn view(&self) -> MenuView {
        let items = SETTINGS_ROWS
            .iter()
            .map(|row| match row {
                SettingsRow::PointsToWin => format!("Points to Win: {}", self.points),
                SettingsRow::AiDifficulty => format!("AI Difficulty: {}", self.difficulty.as_str()),
                SettingsRow::Back => "Back".to_string(),
            })
            .collect();
        MenuView {
            title: "Settings",
            items,
            selected: self.selected,
            hint: Some("Use arrows to change, Enter to select"),
        }
    }
}
