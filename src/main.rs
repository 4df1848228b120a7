//! Missile Pong entry point
//!
//! Native builds have no window: this runner plays a match headless, with a
//! simple autopilot standing in for the human player, and reports the result
//! as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use missile_pong::audio::LogSink;
use missile_pong::consts::*;
use missile_pong::input::{InputAction, InputFrame};
use missile_pong::render::{Renderer, View};
use missile_pong::settings::{Difficulty, Settings};
use missile_pong::sim::GameState;
use missile_pong::{App, Screen};

#[derive(Debug, Parser)]
#[command(name = "missile-pong", about = "Headless Missile Pong match runner")]
struct Args {
    /// Settings file (`WINNING_SCORE = n`, `AI_DIFFICULTY = 'Level'`)
    #[arg(long, default_value = "pong_settings.cfg")]
    settings: PathBuf,
    /// Override the winning score
    #[arg(long)]
    winning_score: Option<i64>,
    /// Override the AI difficulty (Easy, Normal, Hard, Extreme)
    #[arg(long)]
    difficulty: Option<String>,
    /// Write the effective settings back to the settings file
    #[arg(long)]
    save: bool,
    /// Seed the match RNG for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Give up after this many frames
    #[arg(long, default_value_t = 60 * 60 * 30)]
    max_frames: u64,
    /// Print a JSON render frame every N frames (0 = never)
    #[arg(long, default_value_t = 0)]
    trace_every: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Missile Pong (native, headless) starting...");

    let mut settings = Settings::load(&args.settings);
    if let Some(score) = args.winning_score {
        settings = Settings::new(score, settings.ai_difficulty);
    }
    if let Some(name) = &args.difficulty {
        let Some(difficulty) = Difficulty::from_str(name) else {
            bail!("unknown difficulty {name:?} (expected Easy, Normal, Hard or Extreme)");
        };
        settings.ai_difficulty = difficulty;
    }
    if args.save {
        settings
            .save(&args.settings)
            .with_context(|| format!("saving settings to {}", args.settings.display()))?;
    }

    let mut app = App::new(settings, None);
    if let Some(seed) = args.seed {
        app = app.with_seed(seed);
    }
    let mut audio = LogSink::default();
    let mut trace = JsonTrace {
        every: args.trace_every,
        frames: 0,
    };

    // Skip the splash and pick Start
    while matches!(app.screen(), Screen::Splash { .. }) {
        app.update(SIM_DT, &InputFrame::default(), &mut audio);
    }
    app.update(SIM_DT, &InputFrame::with_actions([InputAction::Confirm]), &mut audio);

    let mut frames = 0u64;
    while app.current_match().is_some() && frames < args.max_frames {
        let input = app
            .current_match()
            .map(|game| autopilot(game.state()))
            .unwrap_or_default();
        let view = app.update(SIM_DT, &input, &mut audio);
        trace.draw(&view);
        frames += 1;
    }

    let summary = match app.current_match() {
        Some(game) => {
            log::warn!("Stopped after {} frames without a winner", frames);
            Some(game.summary())
        }
        None => {
            if let View::EndScreen { headline, .. } = app.view() {
                println!("{headline}");
            }
            app.last_summary().cloned()
        }
    };
    if let Some(summary) = summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    log::info!("{} audio cues played", audio.played);

    Ok(())
}

/// Prints every `every`th match frame as a JSON line
struct JsonTrace {
    every: u64,
    frames: u64,
}

impl Renderer for JsonTrace {
    fn draw(&mut self, view: &View) {
        let View::Match(frame) = view else {
            return;
        };
        self.frames += 1;
        if self.every == 0 || self.frames % self.every != 0 {
            return;
        }
        match serde_json::to_string(frame) {
            Ok(line) => println!("{line}"),
            Err(e) => log::warn!("Could not serialize frame: {}", e),
        }
    }
}

/// Track the ball vertically and fire whenever the star lines up
fn autopilot(state: &GameState) -> InputFrame {
    let paddle = state.player.rect();
    let target = match &state.star {
        Some(star) if state.ball.vel.x > 0 => star.rect.center_y(),
        _ => state.ball.rect().center_y(),
    };

    let mut input = InputFrame::default();
    input.held.up = target < paddle.center_y() - PADDLE_SPEED;
    input.held.down = target > paddle.center_y() + PADDLE_SPEED;

    let aligned_with_star = state
        .star
        .as_ref()
        .is_some_and(|star| (star.rect.center_y() - paddle.center_y()).abs() < STAR_SIZE);
    let aligned_with_ai = (state.ai_paddle.rect().center_y() - paddle.center_y()).abs() < PADDLE_HEIGHT / 2;
    if aligned_with_star || aligned_with_ai {
        input.actions.push(InputAction::Fire);
    }
    input
}
