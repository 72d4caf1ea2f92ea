//! Calculator widgets: flat colored buttons and read-only display fields

use egui::{Align, Align2, FontId, Response, Sense, Stroke, Ui, Vec2, Widget};

use crate::theme::{ButtonColors, Palette};

/// A flat button that fills with a lighter color while held.
pub struct CalcButton<'a> {
    label: &'a str,
    colors: ButtonColors,
    size: Vec2,
    font: FontId,
    align: Align,
}

impl<'a> CalcButton<'a> {
    pub fn new(label: &'a str, colors: ButtonColors, size: Vec2, font: FontId) -> Self {
        Self {
            label,
            colors,
            size,
            font,
            align: Align::Center,
        }
    }

    /// Left-align the label. Used for the double-width zero.
    pub fn align_left(mut self) -> Self {
        self.align = Align::Min;
        self
    }
}

impl<'a> Widget for CalcButton<'a> {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(self.size, Sense::click());
        if ui.is_rect_visible(rect) {
            let fill = if response.is_pointer_button_down_on() {
                self.colors.pressed
            } else {
                self.colors.fill
            };
            let painter = ui.painter();
            painter.rect_filled(rect, 0.0, fill);
            if self.colors.stroke != Stroke::NONE {
                painter.rect_stroke(rect, 0.0, self.colors.stroke);
            }
            let (pos, anchor) = match self.align {
                Align::Min => (
                    rect.left_center() + egui::vec2(rect.height() * 0.4, 0.0),
                    Align2::LEFT_CENTER,
                ),
                _ => (rect.center(), Align2::CENTER_CENTER),
            };
            painter.text(pos, anchor, self.label, self.font, self.colors.text);
        }
        response
    }
}

/// Read-only text field. Text that would not fit is drawn in a smaller
/// font rather than clipped.
pub fn display_field(ui: &mut Ui, text: &str, size: Vec2, font: FontId, palette: Palette, align: Align) {
    let (fill, text_color) = palette.field();
    egui::Frame::none()
        .fill(fill)
        .stroke(palette.field_stroke())
        .inner_margin(egui::Margin::symmetric(FIELD_MARGIN, 4.0))
        .show(ui, |ui| {
            let inner = size - egui::vec2(FIELD_MARGIN * 2.0, 8.0);
            ui.set_min_size(inner);
            ui.set_max_size(inner);
            let font = FontId::new(fitted_font_size(text, inner.x, font.size), font.family);
            let layout = match align {
                Align::Min => egui::Layout::left_to_right(Align::Center),
                Align::Center => egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                Align::Max => egui::Layout::right_to_left(Align::Center),
            };
            ui.with_layout(layout, |ui| {
                ui.label(egui::RichText::new(text).font(font).color(text_color));
            });
        });
}

const FIELD_MARGIN: f32 = 10.0;

/// Rough glyph width as a share of the font size for digits.
const GLYPH_WIDTH: f32 = 0.6;

/// Largest font size, up to `preferred`, at which `text` fits in `width`.
pub fn fitted_font_size(text: &str, width: f32, preferred: f32) -> f32 {
    let chars = text.chars().count().max(1) as f32;
    let fits = width / (chars * GLYPH_WIDTH);
    preferred.min(fits).max(8.0)
}
