//! Session state machine
//!
//! Active → Ended (hazard hit, high-score window up) → MenuOpen (window
//! closed) → Active again on "New game". Quitting is not a state: it sets
//! `World::terminated` and the front end shuts down.

use super::build::build;
use super::state::{SessionPhase, World};
use crate::highscores::HighScoreService;

/// Title of the end-of-run menu
pub const MENU_TITLE: &str = "You got stuck!";

/// End-of-run menu options, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    NewGame,
    BestScores,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::NewGame, MenuItem::BestScores, MenuItem::Quit];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::NewGame => "New game",
            MenuItem::BestScores => "Best scores",
            MenuItem::Quit => "Quit",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Result of picking a menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// World rebuilt, new run active
    NewGame,
    /// Leaderboard shown, menu still open
    ScoresShown,
    /// Quit chosen, world terminated
    Quit,
    /// Menu not open or index out of range
    Ignored,
}

/// Active → Ended. Freezes the run, stops its timers and hands the score to
/// the high-score flow. Returns false (and does nothing) unless Active.
pub fn end_session<S: HighScoreService + ?Sized>(world: &mut World, scores: &mut S) -> bool {
    if world.phase != SessionPhase::Active {
        return false;
    }

    world.phase = SessionPhase::Ended;
    if let Some(handle) = world.spawn_timer.take() {
        world.timers.stop(handle);
    }
    if let Some(handle) = world.correction_job.take() {
        world.timers.stop(handle);
    }

    let score = world.score.value();
    world.final_score = Some(score);
    log::info!("Run over after {} ticks, score {}", world.time_ticks, score);

    scores.enter_and_show(score);
    true
}

/// Ended → MenuOpen when the high-score window closes.
/// Returns the menu entries to present, or None if no menu should open.
pub fn high_score_window_closed(world: &mut World) -> Option<&'static [MenuItem]> {
    if world.phase != SessionPhase::Ended {
        return None;
    }
    world.phase = SessionPhase::MenuOpen;
    log::debug!("Menu opened");
    Some(&MenuItem::ALL[..])
}

/// Handle `item_selected(index)` from the menu
pub fn select_menu_item<S: HighScoreService + ?Sized>(
    world: &mut World,
    index: usize,
    scores: &mut S,
) -> MenuOutcome {
    if world.phase != SessionPhase::MenuOpen {
        log::warn!("Menu selection {index} while {:?}; ignored", world.phase);
        return MenuOutcome::Ignored;
    }
    let Some(item) = MenuItem::from_index(index) else {
        log::warn!("Unknown menu index {index}; ignored");
        return MenuOutcome::Ignored;
    };

    log::info!("Menu: {}", item.label());
    match item {
        MenuItem::NewGame => {
            build(world);
            MenuOutcome::NewGame
        }
        MenuItem::BestScores => {
            scores.show();
            MenuOutcome::ScoresShown
        }
        MenuItem::Quit => {
            world.terminated = true;
            MenuOutcome::Quit
        }
    }
}

/// Escape / platform back: put up the exit confirmation (freezes the tick)
pub fn request_exit(world: &mut World) {
    if world.terminated || world.exit_prompt {
        return;
    }
    world.exit_prompt = true;
    log::debug!("Exit confirmation requested");
}

/// Answer the exit confirmation. Returns true if the game is now terminated.
pub fn answer_exit_prompt(world: &mut World, confirm: bool) -> bool {
    if !world.exit_prompt {
        return world.terminated;
    }
    world.exit_prompt = false;
    if confirm {
        world.terminated = true;
        log::info!("Exit confirmed");
    }
    world.terminated
}
