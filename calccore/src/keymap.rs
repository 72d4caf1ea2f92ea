//! Keyboard input to calculator actions
//!
//! Digits and symbols are read from text events so that layout and numpad
//! differences are handled by the platform. Enter and the clearing keys
//! have no text and are read from key events.
//!
//! Shift on its own toggles the sign. egui reports Shift only as a
//! modifier, so a tap is detected across frames: Shift went down and came
//! back up with no other key or text in between. Typing `*` or `%` with
//! Shift therefore never flips the sign.

use egui::{Event, InputState, Key};

use crate::engine::{Action, Operator};

pub fn action_for_char(c: char) -> Option<Action> {
    let action = match c {
        '0'..='9' => Action::Digit(c as u8 - b'0'),
        '+' => Action::Operator(Operator::Add),
        '-' => Action::Operator(Operator::Subtract),
        '*' | '×' => Action::Operator(Operator::Multiply),
        '/' | '÷' => Action::Operator(Operator::Divide),
        '.' | ',' => Action::DecimalPoint,
        '%' => Action::Percent,
        '=' => Action::Evaluate,
        _ => return None,
    };
    Some(action)
}

pub fn action_for_key(key: Key) -> Option<Action> {
    match key {
        Key::Enter => Some(Action::Evaluate),
        Key::Backspace | Key::Delete | Key::Escape => Some(Action::Clear),
        _ => None,
    }
}

/// Map one frame's worth of events, in order.
pub fn actions_for_events(events: &[Event]) -> Vec<Action> {
    let mut actions = Vec::new();
    for event in events {
        match event {
            Event::Text(text) => actions.extend(text.chars().filter_map(action_for_char)),
            Event::Key { key, pressed: true, .. } => actions.extend(action_for_key(*key)),
            _ => {}
        }
    }
    actions
}

/// Detects a lone press and release of Shift across frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShiftTap {
    held: bool,
    clean: bool,
}

impl ShiftTap {
    /// Feed the Shift state for one frame. `other_input` is whether any
    /// other key, text or click arrived in the same frame. Returns `true`
    /// on the frame Shift is released after a clean tap.
    pub fn observe(&mut self, shift_down: bool, other_input: bool) -> bool {
        let tapped = match (self.held, shift_down) {
            (false, true) => {
                self.clean = !other_input;
                false
            }
            (true, true) => {
                if other_input {
                    self.clean = false;
                }
                false
            }
            (true, false) => self.clean && !other_input,
            (false, false) => false,
        };
        self.held = shift_down;
        tapped
    }
}

/// Per-window keyboard reader. Keep one in the app and call
/// [`Keymap::read`] once per frame.
#[derive(Debug, Default)]
pub struct Keymap {
    shift: ShiftTap,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&mut self, input: &InputState) -> Vec<Action> {
        let mut actions = actions_for_events(&input.events);
        let other_input = input
            .events
            .iter()
            .any(|e| matches!(e, Event::Key { .. } | Event::Text(_)))
            || input.pointer.any_pressed();
        if self.shift.observe(input.modifiers.shift, other_input) {
            actions.push(Action::ToggleSign);
        }
        actions
    }
}
