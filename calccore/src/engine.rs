//! Calculator engine
//!
//! A small state machine over the display string. The view never touches
//! the fields directly: it sends an [`Action`] through
//! [`CalculatorState::apply`] and reads back [`CalculatorState::display`]
//! and [`CalculatorState::operator_text`].
//!
//! There are two states, normal and error. Error is entered on a division
//! by zero or a result that is not finite, and only [`Action::Clear`]
//! leaves it.

use thiserror::Error;

use crate::format::{format_result, parse_display};

/// Default cap on how long the display may grow through digit entry.
pub const MAX_DIGITS: usize = 15;

/// Smallest usable cap: room for a fresh `"0."`.
pub const MIN_DIGITS: usize = 2;

/// Text shown while in error mode.
pub const ERROR_MARKER: &str = "Error";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("result out of range")]
    Overflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Apply the operator to `lhs` and `rhs`.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        let result = match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::Overflow)
        }
    }

    /// Symbol shown in the operator field and on the buttons.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }
}

/// One user intent, from a button or a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Digit(u8),
    Operator(Operator),
    DecimalPoint,
    ToggleSign,
    Percent,
    Clear,
    Evaluate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    display: String,
    pending_operand: String,
    pending_operator: Option<Operator>,
    replace_on_next_digit: bool,
    is_error: bool,
    max_digits: usize,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::with_max_digits(MAX_DIGITS)
    }

    /// A fresh state whose display is capped at `max_digits` characters.
    /// Caps below [`MIN_DIGITS`] are raised to it.
    pub fn with_max_digits(max_digits: usize) -> Self {
        Self {
            display: "0".to_string(),
            pending_operand: String::new(),
            pending_operator: None,
            replace_on_next_digit: false,
            is_error: false,
            max_digits: max_digits.max(MIN_DIGITS),
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Symbol of the pending operator, or `""` when none is pending.
    pub fn operator_text(&self) -> &str {
        self.pending_operator.map(Operator::symbol).unwrap_or("")
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn max_digits(&self) -> usize {
        self.max_digits
    }

    /// Route an action to its operation.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Digit(d) => self.enter_digit(d),
            Action::Operator(op) => self.select_operator(op),
            Action::DecimalPoint => self.enter_decimal_point(),
            Action::ToggleSign => self.toggle_sign(),
            Action::Percent => self.to_percent(),
            Action::Clear => self.clear(),
            Action::Evaluate => self.evaluate(),
        }
    }

    /// Enter a digit. Replacing the display always fits; only appending
    /// is held to the cap, so a long result never blocks the next number.
    pub fn enter_digit(&mut self, d: u8) {
        if self.is_error || d > 9 {
            return;
        }
        let digit = char::from(b'0' + d);
        if self.replace_on_next_digit || self.display == "0" {
            self.display = digit.to_string();
            self.replace_on_next_digit = false;
        } else if self.display.len() < self.max_digits {
            self.display.push(digit);
        }
    }

    /// Add a decimal point. After an operator or a result this starts a
    /// fresh `"0."` operand instead of extending the old value.
    pub fn enter_decimal_point(&mut self) {
        if self.is_error {
            return;
        }
        if self.replace_on_next_digit {
            self.display = "0.".to_string();
            self.replace_on_next_digit = false;
        } else if self.display.len() < self.max_digits && !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Select an operator, first evaluating any operation already pending
    /// so that `3 + 4 ×` shows `7` before the multiply starts.
    pub fn select_operator(&mut self, op: Operator) {
        if self.is_error {
            return;
        }
        self.evaluate();
        if self.is_error {
            return;
        }
        self.pending_operand = self.display.clone();
        self.pending_operator = Some(op);
        self.replace_on_next_digit = true;
    }

    pub fn evaluate(&mut self) {
        if self.is_error {
            return;
        }
        let Some(op) = self.pending_operator else {
            return;
        };
        let lhs = parse_display(&self.pending_operand);
        let rhs = parse_display(&self.display);
        match op.apply(lhs, rhs) {
            Ok(result) => {
                self.display = format_result(result);
                self.pending_operator = None;
                self.pending_operand.clear();
                self.replace_on_next_digit = true;
            }
            Err(err) => self.enter_error(err),
        }
    }

    /// Reset to the startup state. Always permitted.
    pub fn clear(&mut self) {
        *self = Self::with_max_digits(self.max_digits);
    }

    /// Flip the sign of the display. `"0"` has no sign and is left alone.
    /// The sign is not held to the cap, so a full display may show one
    /// extra character.
    pub fn toggle_sign(&mut self) {
        if self.is_error || self.display == "0" {
            return;
        }
        if let Some(stripped) = self.display.strip_prefix('-') {
            self.display = stripped.to_string();
        } else {
            self.display.insert(0, '-');
        }
    }

    pub fn to_percent(&mut self) {
        if self.is_error {
            return;
        }
        if self.display != "0" {
            self.display = format_result(parse_display(&self.display) / 100.0);
        }
        self.replace_on_next_digit = true;
    }

    fn enter_error(&mut self, err: CalcError) {
        tracing::warn!(error = %err, operand = %self.pending_operand, display = %self.display, "entering error mode");
        self.display = ERROR_MARKER.to_string();
        self.pending_operator = None;
        self.pending_operand.clear();
        self.is_error = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn digits(state: &mut CalculatorState, ds: &[u8]) {
        for &d in ds {
            state.enter_digit(d);
        }
    }

    #[test]
    fn test_starts_at_zero() {
        let state = CalculatorState::new();
        assert_eq!(state.display(), "0");
        assert_eq!(state.operator_text(), "");
        assert!(!state.is_error());
    }

    #[test]
    fn test_leading_zero_replaced() {
        let mut state = CalculatorState::new();
        digits(&mut state, &[0, 0, 7, 0]);
        assert_eq!(state.display(), "70");
    }

    #[test]
    fn test_digit_out_of_range_ignored() {
        let mut state = CalculatorState::new();
        state.enter_digit(12);
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_digit_cap() {
        let mut state = CalculatorState::with_max_digits(4);
        digits(&mut state, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(state.display(), "1234");
        state.enter_decimal_point();
        assert_eq!(state.display(), "1234");
    }

    #[test]
    fn test_cap_has_room_for_fresh_decimal() {
        let mut state = CalculatorState::with_max_digits(1);
        assert_eq!(state.max_digits(), MIN_DIGITS);
        state.enter_digit(5);
        state.select_operator(Operator::Add);
        state.enter_decimal_point();
        assert_eq!(state.display(), "0.");
        assert!(state.display().len() <= state.max_digits());
    }

    #[test]
    fn test_digit_after_long_result_replaces() {
        let mut state = CalculatorState::with_max_digits(3);
        digits(&mut state, &[9, 9, 9]);
        state.select_operator(Operator::Multiply);
        digits(&mut state, &[9, 9, 9]);
        state.evaluate();
        assert_eq!(state.display(), "998001");
        state.enter_digit(4);
        assert_eq!(state.display(), "4");
        digits(&mut state, &[2, 7, 1]);
        assert_eq!(state.display(), "427");
    }

    #[test]
    fn test_sign_on_full_display() {
        let mut state = CalculatorState::new();
        digits(&mut state, &[9; 20]);
        assert_eq!(state.display().len(), MAX_DIGITS);
        state.toggle_sign();
        assert_eq!(state.display().len(), MAX_DIGITS + 1);
        assert!(state.display().starts_with('-'));
        state.enter_digit(1);
        assert_eq!(state.display().len(), MAX_DIGITS + 1);
        state.toggle_sign();
        assert_eq!(state.display(), "9".repeat(MAX_DIGITS));
    }

    #[test]
    fn test_decimal_point_once() {
        let mut state = CalculatorState::new();
        state.enter_digit(3);
        state.enter_decimal_point();
        state.enter_decimal_point();
        state.enter_digit(1);
        state.enter_decimal_point();
        assert_eq!(state.display(), "3.1");
    }

    #[test]
    fn test_decimal_point_on_zero() {
        let mut state = CalculatorState::new();
        state.enter_decimal_point();
        state.enter_digit(5);
        assert_eq!(state.display(), "0.5");
    }

    #[test]
    fn test_decimal_point_after_operator_starts_fresh() {
        let mut state = CalculatorState::new();
        state.enter_digit(3);
        state.select_operator(Operator::Add);
        state.enter_decimal_point();
        state.enter_digit(5);
        assert_eq!(state.display(), "0.5");
        state.evaluate();
        assert_eq!(state.display(), "3.5");
    }

    #[test]
    fn test_evaluate_without_operator_is_noop() {
        let mut state = CalculatorState::new();
        digits(&mut state, &[4, 2]);
        state.evaluate();
        assert_eq!(state.display(), "42");
        state.enter_digit(1);
        assert_eq!(state.display(), "421");
    }

    #[test]
    fn test_basic_operations() {
        let cases = [
            (Operator::Add, "10"),
            (Operator::Subtract, "6"),
            (Operator::Multiply, "16"),
            (Operator::Divide, "4"),
        ];
        for (op, expected) in cases {
            let mut state = CalculatorState::new();
            state.enter_digit(8);
            state.select_operator(op);
            assert_eq!(state.operator_text(), op.symbol());
            assert_eq!(state.pending_operator(), Some(op));
            state.enter_digit(2);
            state.evaluate();
            assert_eq!(state.display(), expected, "{:?}", op);
            assert_eq!(state.operator_text(), "");
        }
    }

    #[test]
    fn test_fractional_result() {
        let mut state = CalculatorState::new();
        state.enter_digit(1);
        state.select_operator(Operator::Divide);
        state.enter_digit(3);
        state.evaluate();
        assert_eq!(state.display(), "0.33333");
    }

    #[test]
    fn test_chaining() {
        let mut state = CalculatorState::new();
        state.clear();
        state.enter_digit(3);
        state.select_operator(Operator::Add);
        state.enter_digit(4);
        state.select_operator(Operator::Multiply);
        assert_eq!(state.display(), "7");
        assert_eq!(state.operator_text(), "×");
        state.enter_digit(2);
        state.evaluate();
        assert_eq!(state.display(), "14");
    }

    #[test]
    fn test_digit_after_result_replaces() {
        let mut state = CalculatorState::new();
        state.enter_digit(2);
        state.select_operator(Operator::Add);
        state.enter_digit(2);
        state.evaluate();
        state.enter_digit(9);
        assert_eq!(state.display(), "9");
    }

    #[test]
    fn test_divide_by_zero() {
        let mut state = CalculatorState::new();
        state.enter_digit(5);
        state.select_operator(Operator::Divide);
        state.enter_digit(0);
        state.evaluate();
        assert!(state.is_error());
        assert_eq!(state.display(), ERROR_MARKER);
        assert_eq!(state.operator_text(), "");

        state.enter_digit(3);
        state.enter_decimal_point();
        state.toggle_sign();
        state.to_percent();
        state.select_operator(Operator::Add);
        state.evaluate();
        assert_eq!(state.display(), ERROR_MARKER);
        assert!(state.is_error());

        state.clear();
        assert!(!state.is_error());
        assert_eq!(state.display(), "0");
        state.enter_digit(3);
        assert_eq!(state.display(), "3");
    }

    #[test]
    fn test_divide_by_zero_while_chaining() {
        let mut state = CalculatorState::new();
        state.enter_digit(1);
        state.select_operator(Operator::Divide);
        state.enter_digit(0);
        state.select_operator(Operator::Add);
        assert!(state.is_error());
        assert_eq!(state.operator_text(), "");
    }

    #[test]
    fn test_overflow_enters_error() {
        assert_eq!(Operator::Multiply.apply(f64::MAX, 10.0), Err(CalcError::Overflow));
        assert_eq!(Operator::Divide.apply(1.0, 0.0), Err(CalcError::DivisionByZero));
        assert_eq!(Operator::Subtract.apply(1.0, 3.0), Ok(-2.0));
    }

    #[test]
    fn test_clear_keeps_cap() {
        let mut state = CalculatorState::with_max_digits(3);
        state.enter_digit(1);
        state.select_operator(Operator::Add);
        state.clear();
        assert_eq!(state, CalculatorState::with_max_digits(3));
    }

    #[test]
    fn test_toggle_sign() {
        let mut state = CalculatorState::new();
        digits(&mut state, &[1, 2]);
        state.toggle_sign();
        assert_eq!(state.display(), "-12");
        state.toggle_sign();
        assert_eq!(state.display(), "12");
    }

    #[test]
    fn test_toggle_sign_on_zero() {
        let mut state = CalculatorState::new();
        state.toggle_sign();
        assert_eq!(state.display(), "0");
        state.toggle_sign();
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_negative_operand() {
        let mut state = CalculatorState::new();
        state.enter_digit(6);
        state.toggle_sign();
        state.select_operator(Operator::Multiply);
        state.enter_digit(2);
        state.evaluate();
        assert_eq!(state.display(), "-12");
    }

    #[test]
    fn test_percent() {
        let mut state = CalculatorState::new();
        digits(&mut state, &[5, 0]);
        state.to_percent();
        assert_eq!(state.display(), "0.5");
        state.enter_digit(7);
        assert_eq!(state.display(), "7");
    }

    #[test]
    fn test_percent_on_zero() {
        let mut state = CalculatorState::new();
        state.to_percent();
        assert_eq!(state.display(), "0");
    }

    #[test]
    fn test_apply_routes_actions() {
        let mut state = CalculatorState::new();
        for action in [
            Action::Digit(9),
            Action::Operator(Operator::Subtract),
            Action::Digit(4),
            Action::Evaluate,
            Action::ToggleSign,
        ] {
            state.apply(action);
        }
        assert_eq!(state.display(), "-5");
        state.apply(Action::Clear);
        assert_eq!(state.display(), "0");
    }

    proptest! {
        #[test]
        fn prop_digits_concatenate(ds in prop::collection::vec(0u8..10, 1..=MAX_DIGITS)) {
            let mut state = CalculatorState::new();
            state.enter_digit(8);
            state.select_operator(Operator::Add);
            digits(&mut state, &ds);

            let joined: String = ds.iter().map(|d| char::from(b'0' + d)).collect();
            let trimmed = joined.trim_start_matches('0');
            let expected = if trimmed.is_empty() { "0" } else { trimmed };
            prop_assert_eq!(state.display(), expected);
        }

        #[test]
        fn prop_entry_never_exceeds_cap(
            cap in 1usize..20,
            keys in prop::collection::vec(prop_oneof![
                (0u8..10).prop_map(Action::Digit),
                Just(Action::DecimalPoint),
                Just(Action::Operator(Operator::Add)),
                Just(Action::Operator(Operator::Multiply)),
                Just(Action::Operator(Operator::Divide)),
                Just(Action::Evaluate),
                Just(Action::Percent),
                Just(Action::ToggleSign),
            ], 0..80),
        ) {
            let mut state = CalculatorState::with_max_digits(cap);
            for key in keys {
                let before = state.display().to_string();
                state.apply(key);
                if matches!(key, Action::Digit(_) | Action::DecimalPoint) {
                    prop_assert!(
                        state.display().len() <= state.max_digits() || state.display() == before,
                        "{:?} grew {:?} to {:?}", key, before, state.display()
                    );
                }
                prop_assert!(state.display().matches('.').count() <= 1);
            }
        }

        #[test]
        fn prop_toggle_sign_twice_restores(ds in prop::collection::vec(0u8..10, 0..10), point in any::<bool>()) {
            let mut state = CalculatorState::new();
            digits(&mut state, &ds);
            if point {
                state.enter_decimal_point();
            }
            let before = state.display().to_string();
            state.toggle_sign();
            state.toggle_sign();
            prop_assert_eq!(state.display(), before);
        }
    }
}
