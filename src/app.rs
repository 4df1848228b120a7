//! Screen flow: splash, title menu, settings, match, end screen
//!
//! `App::update` is called once per displayed frame with the wall-clock
//! delta and the frame's input, and returns what to draw.

use std::path::PathBuf;

use crate::audio::AudioSink;
use crate::consts::*;
use crate::game::{Game, MatchPhase, MatchSummary};
use crate::input::{InputAction, InputFrame};
use crate::menu::{SettingsMenu, TitleChoice, TitleMenu};
use crate::render::View;
use crate::settings::Settings;
use crate::sim::Side;

const SPLASH_TEXT: &str = "An Adam Production";
const CONTINUE_PROMPT: &str = "Press SPACE to continue";

/// Current screen
#[derive(Debug, Clone)]
pub enum Screen {
    Splash { elapsed: f32 },
    Title(TitleMenu),
    Settings(SettingsMenu),
    Match(Box<Game>),
    EndScreen { winner: Side },
    /// Application should close
    Exited,
}

/// Top-level application state
#[derive(Debug)]
pub struct App {
    screen: Screen,
    settings: Settings,
    /// Where settings are persisted; `None` keeps them in memory only
    settings_path: Option<PathBuf>,
    /// Fixed seed for every match (tests, reproducible runs)
    seed: Option<u64>,
    matches_played: u32,
    last_summary: Option<MatchSummary>,
}

impl App {
    pub fn new(settings: Settings, settings_path: Option<PathBuf>) -> Self {
        Self {
            screen: Screen::Splash { elapsed: 0.0 },
            settings,
            settings_path,
            seed: None,
            matches_played: 0,
            last_summary: None,
        }
    }

    /// Seed every match with `seed`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn matches_played(&self) -> u32 {
        self.matches_played
    }

    /// Result of the most recently finished match
    pub fn last_summary(&self) -> Option<&MatchSummary> {
        self.last_summary.as_ref()
    }

    pub fn is_exited(&self) -> bool {
        matches!(self.screen, Screen::Exited)
    }

    /// The running match, if any
    pub fn current_match(&self) -> Option<&Game> {
        match &self.screen {
            Screen::Match(game) => Some(game),
            _ => None,
        }
    }

    pub fn current_match_mut(&mut self) -> Option<&mut Game> {
        match &mut self.screen {
            Screen::Match(game) => Some(game),
            _ => None,
        }
    }

    /// Advance by `dt` seconds and return the view to draw
    pub fn update(&mut self, dt: f32, input: &InputFrame, audio: &mut dyn AudioSink) -> View {
        if input.quit_requested() && !matches!(self.screen, Screen::Match(_)) {
            log::info!("Quit requested");
            self.screen = Screen::Exited;
        }

        let next = match &mut self.screen {
            Screen::Splash { elapsed } => {
                *elapsed += dt;
                (*elapsed >= frames_to_secs(SPLASH_FRAMES)).then(|| Screen::Title(TitleMenu::default()))
            }
            Screen::Title(menu) => match menu.handle(input) {
                Some(TitleChoice::Start) => Some(Screen::Match(Box::new(self.new_match(audio)))),
                Some(TitleChoice::Settings) => Some(Screen::Settings(SettingsMenu::new(&self.settings))),
                Some(TitleChoice::Exit) => Some(Screen::Exited),
                None => None,
            },
            Screen::Settings(menu) => menu.handle(input).map(|edited| {
                self.commit_settings(edited);
                Screen::Title(TitleMenu::default())
            }),
            Screen::Match(game) => {
                game.advance(dt, input, audio);
                if game.is_finished() {
                    self.last_summary = Some(game.summary());
                }
                match game.phase() {
                    MatchPhase::MatchOver { winner } => Some(Screen::EndScreen { winner }),
                    MatchPhase::Aborted => Some(Screen::Exited),
                    _ => None,
                }
            }
            Screen::EndScreen { .. } => input
                .pressed(InputAction::Fire)
                .then(|| Screen::Title(TitleMenu::default())),
            Screen::Exited => None,
        };

        if let Some(screen) = next {
            self.screen = screen;
        }
        self.view()
    }

    fn new_match(&mut self, audio: &mut dyn AudioSink) -> Game {
        self.matches_played += 1;
        let mut game = match self.seed {
            Some(seed) => Game::with_seed(self.settings, seed),
            None => Game::new(self.settings),
        };
        game.start(audio);
        game
    }

    fn commit_settings(&mut self, edited: Settings) {
        self.settings = edited;
        if let Some(path) = &self.settings_path {
            if let Err(e) = self.settings.save(path) {
                log::warn!("Could not save settings: {}", e);
            }
        }
    }

    /// What the current screen shows
    pub fn view(&self) -> View {
        match &self.screen {
            Screen::Splash { .. } => View::Splash { text: SPLASH_TEXT },
            Screen::Title(menu) => View::Menu(menu.view()),
            Screen::Settings(menu) => View::Menu(menu.view()),
            Screen::Match(game) => View::Match(game.view()),
            Screen::EndScreen { winner } => View::EndScreen {
                headline: format!("{} Wins!", winner.label()),
                prompt: CONTINUE_PROMPT,
            },
            Screen::Exited => View::Blank,
        }
    }
}
