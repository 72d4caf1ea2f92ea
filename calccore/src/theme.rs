//! Calculator theme
//!
//! Two palettes: the classic dark calculator (charcoal digits, orange
//! operators, light grey functions) and the slowOS black-and-white look
//! for e-ink screens.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use serde::{Deserialize, Serialize};

/// Only two colors exist on the slow computer.
pub struct SlowColors;

impl SlowColors {
    pub const WHITE: Color32 = Color32::from_rgb(255, 255, 255);
    pub const BLACK: Color32 = Color32::from_rgb(0, 0, 0);
    /// Pressed-button fill; the one grey the slow palette allows.
    pub const PRESSED: Color32 = Color32::from_rgb(160, 160, 160);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Dark,
    Slow,
}

/// Which group a button belongs to. Each group has its own colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Digits and the decimal point.
    Digit,
    /// The four operators and equals.
    Operation,
    /// Clear, sign and percent.
    Misc,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonColors {
    pub fill: Color32,
    pub pressed: Color32,
    pub text: Color32,
    pub stroke: Stroke,
}

impl Palette {
    pub fn background(self) -> Color32 {
        match self {
            Palette::Dark => Color32::from_rgb(21, 21, 21),
            Palette::Slow => SlowColors::WHITE,
        }
    }

    /// Fill and text colors for the result and operator fields.
    pub fn field(self) -> (Color32, Color32) {
        (SlowColors::WHITE, SlowColors::BLACK)
    }

    pub fn field_stroke(self) -> Stroke {
        match self {
            Palette::Dark => Stroke::NONE,
            Palette::Slow => Stroke::new(1.0, SlowColors::BLACK),
        }
    }

    pub fn button(self, kind: ButtonKind) -> ButtonColors {
        match self {
            Palette::Dark => {
                let (fill, pressed, text) = match kind {
                    ButtonKind::Digit => (
                        Color32::from_rgb(60, 60, 60),
                        Color32::from_rgb(89, 89, 89),
                        SlowColors::WHITE,
                    ),
                    ButtonKind::Operation => (
                        Color32::from_rgb(200, 95, 38),
                        Color32::from_rgb(228, 125, 72),
                        SlowColors::WHITE,
                    ),
                    ButtonKind::Misc => (
                        Color32::from_rgb(172, 172, 172),
                        Color32::from_rgb(209, 209, 209),
                        SlowColors::BLACK,
                    ),
                };
                ButtonColors { fill, pressed, text, stroke: Stroke::NONE }
            }
            Palette::Slow => ButtonColors {
                fill: SlowColors::WHITE,
                pressed: SlowColors::PRESSED,
                text: SlowColors::BLACK,
                stroke: Stroke::new(1.0, SlowColors::BLACK),
            },
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Palette::Dark => "dark",
            Palette::Slow => "slow",
        }
    }
}

/// Theme configuration for the calculator window
pub struct CalcTheme {
    pub palette: Palette,
    pub font_size: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for CalcTheme {
    fn default() -> Self {
        Self {
            palette: Palette::Dark,
            font_size: 21.0,
            window_padding: 12.0,
            item_spacing: 12.0,
        }
    }
}

impl CalcTheme {
    pub fn new(palette: Palette, font_size: f32) -> Self {
        Self {
            palette,
            font_size,
            ..Self::default()
        }
    }

    /// Font used on buttons and in the display fields.
    pub fn font(&self) -> FontId {
        FontId::proportional(self.font_size)
    }

    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        let menu_size = (self.font_size * 0.66).max(11.0);
        style.text_styles = [
            (TextStyle::Small, FontId::new(menu_size * 0.85, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(menu_size, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(menu_size, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(menu_size, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = match self.palette {
            Palette::Dark => Visuals::dark(),
            Palette::Slow => Visuals::light(),
        };
        let background = self.palette.background();
        visuals.window_fill = background;
        visuals.panel_fill = background;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;

        if self.palette == Palette::Slow {
            visuals.faint_bg_color = SlowColors::WHITE;
            visuals.extreme_bg_color = SlowColors::WHITE;
            visuals.window_stroke = Stroke::new(1.0, SlowColors::BLACK);

            let bw = |ws: &mut egui::style::WidgetVisuals| {
                ws.bg_fill = SlowColors::WHITE;
                ws.weak_bg_fill = SlowColors::WHITE;
                ws.bg_stroke = Stroke::new(1.0, SlowColors::BLACK);
                ws.fg_stroke = Stroke::new(1.0, SlowColors::BLACK);
                ws.rounding = Rounding::ZERO;
            };
            bw(&mut visuals.widgets.noninteractive);
            bw(&mut visuals.widgets.inactive);
            bw(&mut visuals.widgets.hovered);
            bw(&mut visuals.widgets.active);
            bw(&mut visuals.widgets.open);

            visuals.window_shadow = egui::epaint::Shadow::NONE;
            visuals.popup_shadow = egui::epaint::Shadow::NONE;
            visuals.selection.bg_fill = SlowColors::PRESSED;
            visuals.selection.stroke = Stroke::new(1.0, SlowColors::BLACK);
        }

        style.visuals = visuals;
        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }
}
