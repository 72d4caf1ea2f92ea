//! Calculator application
//!
//! The window owns the engine state. Every click and mapped key goes
//! through [`CalculatorApp::dispatch`]; rendering just reads the display
//! and operator text back each frame.

use std::path::PathBuf;

use calccore::config::Settings;
use calccore::engine::{Action, CalculatorState, Operator};
use calccore::keymap::Keymap;
use calccore::theme::{ButtonKind, CalcTheme, Palette};
use calccore::widgets::{display_field, CalcButton};
use egui::{Align, Context, Vec2};

const BUTTON_SIZE: Vec2 = Vec2::new(80.0, 60.0);
const GAP: f32 = 15.0;
const MARGIN: f32 = 12.0;
const MENU_HEIGHT: f32 = 26.0;
const COLUMNS: usize = 4;

struct Cell {
    label: &'static str,
    action: Action,
    kind: ButtonKind,
    span: usize,
}

const fn cell(label: &'static str, action: Action, kind: ButtonKind) -> Cell {
    Cell { label, action, kind, span: 1 }
}

const fn digit(label: &'static str, d: u8) -> Cell {
    cell(label, Action::Digit(d), ButtonKind::Digit)
}

const fn op(label: &'static str, op: Operator) -> Cell {
    cell(label, Action::Operator(op), ButtonKind::Operation)
}

const ROWS: [&[Cell]; 5] = [
    &[
        cell("C", Action::Clear, ButtonKind::Misc),
        cell("+/-", Action::ToggleSign, ButtonKind::Misc),
        cell("%", Action::Percent, ButtonKind::Misc),
        op("÷", Operator::Divide),
    ],
    &[digit("7", 7), digit("8", 8), digit("9", 9), op("×", Operator::Multiply)],
    &[digit("4", 4), digit("5", 5), digit("6", 6), op("-", Operator::Subtract)],
    &[digit("1", 1), digit("2", 2), digit("3", 3), op("+", Operator::Add)],
    &[
        Cell { label: "0", action: Action::Digit(0), kind: ButtonKind::Digit, span: 2 },
        cell(".", Action::DecimalPoint, ButtonKind::Digit),
        cell("=", Action::Evaluate, ButtonKind::Operation),
    ],
];

fn span_width(span: usize) -> f32 {
    BUTTON_SIZE.x * span as f32 + GAP * (span.saturating_sub(1)) as f32
}

/// Inner window size that fits the fields, the grid and the menu bar.
pub fn window_size() -> [f32; 2] {
    let rows = ROWS.len() as f32 + 1.0;
    [
        span_width(COLUMNS) + MARGIN * 2.0,
        MENU_HEIGHT + BUTTON_SIZE.y * rows + GAP * (rows - 1.0) + MARGIN * 2.0,
    ]
}

pub struct CalculatorApp {
    state: CalculatorState,
    keymap: Keymap,
    theme: CalcTheme,
    settings: Settings,
    settings_path: PathBuf,
    show_about: bool,
}

impl CalculatorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings, settings_path: PathBuf) -> Self {
        let theme = CalcTheme::new(settings.palette, settings.font_size);
        theme.apply(&cc.egui_ctx);
        Self {
            state: CalculatorState::with_max_digits(settings.max_digits),
            keymap: Keymap::new(),
            theme,
            settings,
            settings_path,
            show_about: false,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.state.apply(action);
        tracing::debug!(
            ?action,
            display = self.state.display(),
            operator = self.state.operator_text(),
            "applied"
        );
    }

    fn copy_display(&self, ctx: &Context) {
        let text = self.state.display().to_string();
        ctx.output_mut(|o| o.copied_text = text);
    }

    fn set_palette(&mut self, palette: Palette, ctx: &Context) {
        if self.theme.palette == palette {
            return;
        }
        self.theme.palette = palette;
        self.theme.apply(ctx);
        self.settings.palette = palette;
        self.save_settings();
    }

    fn save_settings(&self) {
        if let Err(e) = self.settings.save(&self.settings_path) {
            tracing::warn!(path = %self.settings_path.display(), error = %e, "could not save settings");
        }
    }

    fn handle_keys(&mut self, ctx: &Context) {
        let (actions, copy) = ctx.input(|i| {
            let copy = i.events.iter().any(|e| matches!(e, egui::Event::Copy));
            (self.keymap.read(i), copy)
        });
        for action in actions {
            self.dispatch(action);
        }
        if copy {
            self.copy_display(ctx);
        }
    }

    fn render_fields(&self, ui: &mut egui::Ui) {
        let font = self.theme.font();
        let palette = self.theme.palette;
        ui.horizontal(|ui| {
            if self.settings.show_operator {
                let width = span_width(COLUMNS - 1);
                display_field(ui, self.state.display(), egui::vec2(width, BUTTON_SIZE.y), font.clone(), palette, Align::Max);
                display_field(ui, self.state.operator_text(), BUTTON_SIZE, font, palette, Align::Center);
            } else {
                let width = span_width(COLUMNS);
                display_field(ui, self.state.display(), egui::vec2(width, BUTTON_SIZE.y), font, palette, Align::Max);
            }
        });
    }

    fn render_buttons(&mut self, ui: &mut egui::Ui) {
        let font = self.theme.font();
        let palette = self.theme.palette;
        let mut clicked = None;
        for row in ROWS {
            ui.horizontal(|ui| {
                for cell in row {
                    let size = egui::vec2(span_width(cell.span), BUTTON_SIZE.y);
                    let mut button = CalcButton::new(cell.label, palette.button(cell.kind), size, font.clone());
                    if cell.span > 1 {
                        button = button.align_left();
                    }
                    if ui.add(button).clicked() {
                        clicked = Some(cell.action);
                    }
                }
            });
        }
        if let Some(action) = clicked {
            self.dispatch(action);
        }
    }
}

impl eframe::App for CalculatorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("edit", |ui| {
                    if ui.button("copy").clicked() {
                        self.copy_display(ui.ctx());
                        ui.close_menu();
                    }
                    if ui.button("clear").clicked() {
                        self.dispatch(Action::Clear);
                        ui.close_menu();
                    }
                });
                ui.menu_button("view", |ui| {
                    if ui.checkbox(&mut self.settings.show_operator, "operator field").changed() {
                        self.save_settings();
                        ui.close_menu();
                    }
                    ui.separator();
                    for palette in [Palette::Dark, Palette::Slow] {
                        if ui.selectable_label(self.theme.palette == palette, palette.label()).clicked() {
                            let ctx = ui.ctx().clone();
                            self.set_palette(palette, &ctx);
                            ui.close_menu();
                        }
                    }
                });
                ui.menu_button("help", |ui| {
                    if ui.button("about").clicked() {
                        self.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.palette.background())
                    .inner_margin(egui::Margin::same(MARGIN)),
            )
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing = egui::vec2(GAP, GAP);
                self.render_fields(ui);
                self.render_buttons(ui);
            });

        if self.show_about {
            egui::Window::new("about calculator")
                .collapsible(false)
                .resizable(false)
                .default_width(240.0)
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("calculator");
                        ui.label(concat!("version ", env!("CARGO_PKG_VERSION")));
                    });
                    ui.add_space(4.0);
                    ui.separator();
                    ui.label("keys: 0-9 + - * / . % Enter");
                    ui.label("Backspace / Delete / Esc: clear");
                    ui.label("Shift: change sign");
                    ui.label(format!("up to {} digits", self.state.max_digits()));
                    ui.vertical_centered(|ui| {
                        if ui.button("ok").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}
