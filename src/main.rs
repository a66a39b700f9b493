//! Snowfall entry point
//!
//! Headless terminal front end: runs the session on the arcade physics
//! substrate with a fixed timestep, then drives the high-score window and the
//! end-of-run menu on stdin/stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use snowfall::consts::*;
use snowfall::controls;
use snowfall::highscores::{HighScoreService, HighScores};
use snowfall::hud::ScoreLabel;
use snowfall::settings::{Difficulty, Settings};
use snowfall::sim::{
    ArcadePhysics, MENU_TITLE, MenuItem, MenuOutcome, SessionPhase, TickInput, World,
    answer_exit_prompt, high_score_window_closed, request_exit, select_menu_item, tick,
};

/// Catch the snowflakes, dodge the rug racks
#[derive(Debug, Parser)]
#[command(name = "snowfall", version, about)]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// High score file (JSON)
    #[arg(long, default_value = "snowfall_scores.json")]
    scores: PathBuf,
    /// Difficulty preset: easy, normal or hard
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,
    /// Quit after this many ticks of a single run
    #[arg(long, default_value_t = 60 * 100)]
    max_ticks: u64,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn prompt(question: &str) -> Option<String> {
    print!("{question}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Terminal stand-in for the high-score window
struct TerminalScores {
    board: HighScores,
    path: PathBuf,
}

impl TerminalScores {
    fn open(path: PathBuf) -> Self {
        Self {
            board: HighScores::load(&path),
            path,
        }
    }

    fn print_board(&self) {
        println!("\n=== Best scores ===");
        if self.board.is_empty() {
            println!("  (none yet)");
        }
        for (i, entry) in self.board.entries.iter().enumerate() {
            println!("{:>3}. {:<16} {:>5}", i + 1, entry.name, entry.score);
        }
    }
}

impl HighScoreService for TerminalScores {
    fn enter_and_show(&mut self, score: u32) {
        if let Some(rank) = self.board.potential_rank(score) {
            println!("\nYou caught {score} snowflakes - rank #{rank}!");
            let name = prompt("Your name: ")
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Anonymous".to_string());
            self.board.add_score(&name, score, unix_now());
            if let Err(e) = self.board.save(&self.path) {
                log::warn!("Could not save high scores to {}: {e}", self.path.display());
            }
        } else {
            println!("\nYou caught {score} snowflakes.");
        }
        self.show();
    }

    fn show(&mut self) {
        self.print_board();
    }
}

/// Fixed-timestep driver state
struct Game {
    world: World,
    physics: ArcadePhysics,
    scores: TerminalScores,
    label: ScoreLabel,
    accumulator: f32,
    input: TickInput,
    max_ticks: u64,
}

impl Game {
    /// Run simulation ticks for one frame of `dt` seconds
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(
                &mut self.world,
                &input,
                SIM_DT,
                &mut self.physics,
                &mut self.scores,
            );
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.exit = false;
        }

        if self.label.refresh(&self.world.score) {
            log::debug!("HUD score: {}", self.label.text());
        }

        if self.world.is_running() && self.world.time_ticks >= self.max_ticks {
            log::info!("Tick limit reached, leaving the run");
            println!("\nTime's up! You caught {} snowflakes.", self.world.score.value());
            request_exit(&mut self.world);
            answer_exit_prompt(&mut self.world, true);
        }
    }

    /// Ask about quitting; returns true when the game should shut down
    fn confirm_exit(&mut self) -> bool {
        let answer = prompt("Quit the game? [y/N] ").unwrap_or_else(|| "y".to_string());
        answer_exit_prompt(&mut self.world, answer.eq_ignore_ascii_case("y"))
    }

    /// Menu loop after the high-score window closes
    fn run_menu(&mut self) {
        loop {
            println!("\n{MENU_TITLE}");
            for (i, item) in MenuItem::ALL.iter().enumerate() {
                println!("  {i}) {}", item.label());
            }
            let Some(choice) = prompt("> ") else {
                // Closed stdin acts like the back gesture
                request_exit(&mut self.world);
                if self.confirm_exit() {
                    return;
                }
                continue;
            };
            let Ok(index) = choice.parse::<usize>() else {
                println!("Pick 0, 1 or 2.");
                continue;
            };
            match select_menu_item(&mut self.world, index, &mut self.scores) {
                MenuOutcome::NewGame | MenuOutcome::Quit => return,
                MenuOutcome::ScoresShown | MenuOutcome::Ignored => {}
            }
        }
    }

    fn run(&mut self) {
        let frame = 1.0 / 60.0;
        while !self.world.terminated {
            if self.world.exit_prompt {
                if self.confirm_exit() {
                    break;
                }
                continue;
            }
            match self.world.phase {
                SessionPhase::Active => self.update(frame),
                SessionPhase::Ended => {
                    let _ = prompt("\n(press Enter to close the score window) ");
                    high_score_window_closed(&mut self.world);
                }
                SessionPhase::MenuOpen => self.run_menu(),
            }
        }
        log::info!("Snowfall exiting");
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut settings = args
        .config
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();
    if let Some(preset) = args.difficulty {
        settings.apply_preset(preset);
    }

    let seed = args.seed.unwrap_or_else(unix_now);
    log::info!(
        "Snowfall starting (seed {seed}, difficulty {})",
        settings.difficulty.as_str()
    );

    println!("Controls:");
    for line in controls::help_lines() {
        println!("  {line}");
    }

    let scores = TerminalScores::open(args.scores);
    if let Some(best) = scores.board.top_score() {
        println!("Best so far: {best}");
    }

    let world = World::new(seed, settings);
    let racks: Vec<_> = world.hazards.iter().map(|h| h.sprite.asset_name()).collect();
    log::debug!("Scene: {} among {racks:?}", world.player.sprite.asset_name());

    let label = ScoreLabel::new(&world.level);
    let mut game = Game {
        world,
        physics: ArcadePhysics,
        scores,
        label,
        accumulator: 0.0,
        // No keyboard in the terminal front end: the autopilot plays
        input: TickInput {
            idle_mode: true,
            ..Default::default()
        },
        max_ticks: args.max_ticks,
    };

    game.run();
}
