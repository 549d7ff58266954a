//! Mirror Cannon headless runner
//!
//! Drives the simulation at a fixed frame interval and hands every frame to a
//! presenter. The autopilot plays unless `--manual` is given.
//!
//! # Usage
//!
//! ```bash
//! mirror-cannon --seed 42
//! mirror-cannon --config settings.json --frame-ms 16 --max-frames 10000
//! RUST_LOG=debug mirror-cannon --seed 7
//! ```

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use mirror_cannon::Settings;
use mirror_cannon::autopilot;
use mirror_cannon::input::{InputAction, InputEvent, InputHandler, key_press};
use mirror_cannon::renderer::{LogPresenter, MeshLibrary, Presenter, build_frame};
use mirror_cannon::sim::{GameState, TickInput, TickStatus, tick};

#[derive(Parser)]
#[command(name = "mirror-cannon")]
#[command(author, version, about = "Shoot falling blocks with a mirror-bouncing cannon")]
struct Args {
    /// Settings file (JSON); defaults apply when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated milliseconds per frame
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Play from the keyboard: keys typed on stdin (a/d aim, s/f move,
    /// n/m speed, space fires, q quits), one line at a time
    #[arg(long)]
    manual: bool,
}

/// How a frame ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ticked(TickStatus),
    Quit,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    presenter: LogPresenter,
    input: InputHandler,
    autopilot: bool,
}

impl Game {
    fn new(state: GameState, autopilot: bool) -> Self {
        Self {
            input: InputHandler::new(state.rules.max_speed),
            state,
            presenter: LogPresenter::default(),
            autopilot,
        }
    }

    /// Apply pending input, then advance and present one frame
    fn frame(&mut self, elapsed_ms: u64, events: &[InputEvent]) -> Result<Outcome> {
        let mut fire = false;
        for event in events {
            match self.input.handle(event, &mut self.state.controls) {
                InputAction::Fire => fire = true,
                InputAction::Quit => return Ok(Outcome::Quit),
                InputAction::None => {}
            }
        }

        let mut input = if self.autopilot {
            autopilot::drive(&mut self.state)
        } else {
            TickInput::default()
        };
        input.fire |= fire;

        let status = tick(&mut self.state, &input, elapsed_ms).inspect_err(|e| {
            log::error!("simulation failed at tick {}: {e}", self.state.time_ticks);
        })?;

        self.presenter.present(&build_frame(&self.state));
        Ok(Outcome::Ticked(status))
    }
}

/// Forward typed characters from stdin; the channel closes with stdin
fn stdin_keys() -> mpsc::Receiver<char> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            for key in line.chars() {
                if tx.send(key).is_err() {
                    return;
                }
            }
        }
    });
    rx
}

fn report(score: i32, line: &str) {
    println!("{score}");
    println!("{line}");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let seed = settings.resolved_seed();

    log::info!("Mirror Cannon starting...");
    let state = GameState::with_rules(seed, settings.rules()).context("invalid rules")?;
    log::info!("Game initialized with seed: {seed}");

    let meshes = MeshLibrary::new();
    log::info!("Loaded {} mesh vertices", meshes.total_vertices());

    let mut game = Game::new(state, !args.manual);
    let keys = args.manual.then(stdin_keys);
    if keys.is_some() {
        log::info!("Manual mode: type keys and press enter");
    }

    loop {
        if let Some(max) = args.max_frames
            && game.presenter.frames >= max
        {
            log::info!("Stopped after {max} frames");
            report(game.state.score, "STOPPED");
            return Ok(());
        }

        let events: Vec<InputEvent> = keys
            .iter()
            .flat_map(|rx| rx.try_iter())
            .flat_map(key_press)
            .collect();

        match game.frame(args.frame_ms, &events)? {
            Outcome::Ticked(TickStatus::Running) => {}
            Outcome::Ticked(TickStatus::GameOver { score }) => {
                log::info!("Game over at tick {}", game.state.time_ticks);
                report(score, "GAME OVER");
                return Ok(());
            }
            Outcome::Ticked(TickStatus::Won { score }) => {
                log::info!("Game won at tick {}", game.state.time_ticks);
                report(score, "YOU WON");
                return Ok(());
            }
            Outcome::Quit => {
                log::info!("Quit at tick {}", game.state.time_ticks);
                report(game.state.score, "QUIT");
                return Ok(());
            }
        }

        // A human is playing: run in real time
        if keys.is_some() {
            std::thread::sleep(Duration::from_millis(args.frame_ms));
        }
    }
}
