//! Key bindings
//!
//! Movement keys are level-triggered: the action repeats every tick the key is
//! held. The exit gesture fires once per press.

use crate::sim::TickInput;

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Left,
    Right,
    Escape,
    /// Platform back gesture (phones)
    Back,
}

/// What a bound key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Jump,
    WalkRight,
    WalkLeft,
    Exit,
}

/// When a binding fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Every tick while held
    Held,
    /// Once, on the press edge
    Pressed,
}

/// A single key binding with its help text
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub key: Key,
    pub trigger: Trigger,
    pub action: Action,
    pub help: &'static str,
}

/// Default bindings
pub const BINDINGS: &[Binding] = &[
    Binding {
        key: Key::Up,
        trigger: Trigger::Held,
        action: Action::Jump,
        help: "Jump",
    },
    Binding {
        key: Key::Right,
        trigger: Trigger::Held,
        action: Action::WalkRight,
        help: "Walk right",
    },
    Binding {
        key: Key::Left,
        trigger: Trigger::Held,
        action: Action::WalkLeft,
        help: "Walk left",
    },
    Binding {
        key: Key::Escape,
        trigger: Trigger::Pressed,
        action: Action::Exit,
        help: "Quit game",
    },
    Binding {
        key: Key::Back,
        trigger: Trigger::Pressed,
        action: Action::Exit,
        help: "Quit game",
    },
];

/// Build one tick's input from the keys currently held and the keys pressed this frame
pub fn tick_input(held: &[Key], pressed: &[Key]) -> TickInput {
    let mut input = TickInput::default();
    for binding in BINDINGS {
        let active = match binding.trigger {
            Trigger::Held => held.contains(&binding.key),
            Trigger::Pressed => pressed.contains(&binding.key),
        };
        if !active {
            continue;
        }
        match binding.action {
            Action::Jump => input.jump = true,
            Action::WalkRight => input.walk_right = true,
            Action::WalkLeft => input.walk_left = true,
            Action::Exit => input.exit = true,
        }
    }
    input
}

/// Help lines, one per distinct action
pub fn help_lines() -> Vec<String> {
    BINDINGS
        .iter()
        .map(|b| format!("{:<8} {}", format!("{:?}", b.key), b.help))
        .collect()
}
