//! calccore — engine, theme and settings for the slow computer calculator

pub mod config;
pub mod engine;
pub mod format;
pub mod keymap;
pub mod logging;
pub mod theme;
pub mod widgets;

pub use config::Settings;
pub use engine::{Action, CalcError, CalculatorState, Operator};
pub use theme::{CalcTheme, Palette};
