use anyhow::Context as _;
use eframe::egui;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::mpsc;

use shapedit::color;
use shapedit::icons::{ToolButton, ToolIcons, ICON_SIZE};
use shapedit::input;
use shapedit::{BoundedShape, Canvas, ToolSettings};

const CANVAS_SIZE: egui::Vec2 = egui::vec2(500.0, 1000.0);
const ICON_DIR: &str = "icons";

// ── App ─────────────────────────────────────────────────────────────────────

struct SketchApp {
    settings: ToolSettings,
    canvas: Canvas,
    icons: Option<ToolIcons>,

    // picker state, unmultiplied RGBA in 0..=1
    stroke_picker: [f32; 4],
    fill_picker: [f32; 4],

    /// Receives the settings when the window is closed.
    on_close: mpsc::Sender<ToolSettings>,
    closed: bool,
}

impl SketchApp {
    fn new(settings: ToolSettings, on_close: mpsc::Sender<ToolSettings>) -> Self {
        Self {
            stroke_picker: color::unpack_rgba(settings.stroke_color_rgba),
            fill_picker: color::unpack_rgba(settings.fill_color_rgba),
            settings,
            canvas: Canvas::new(),
            icons: None,
            on_close,
            closed: false,
        }
    }

    fn ensure_icons(&mut self, ctx: &egui::Context) {
        if self.icons.is_none() {
            self.icons = Some(ToolIcons::load(ctx, &PathBuf::from(ICON_DIR)));
        }
    }

    fn on_tool_button(&mut self, button: ToolButton) {
        match button {
            ToolButton::Shape(kind) => match BoundedShape::from_kind(kind) {
                Ok(mut shape) => {
                    shape.apply_settings(&self.settings);
                    debug!("Created {kind:?} with {:?}", shape.primitive().paint());
                    self.canvas.add(shape);
                }
                Err(err) => warn!("Could not create {kind:?}: {err}"),
            },
            ToolButton::Clear => {
                debug!("Cleared {} shapes", self.canvas.len());
                self.canvas.clear();
            }
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .color_edit_button_rgba_unmultiplied(&mut self.fill_picker)
                .on_hover_text("Fill color")
                .changed()
            {
                self.settings.fill_color_rgba = color::pack_rgba(self.fill_picker);
                debug!("fill_color_rgba = {:#010x}", self.settings.fill_color_rgba);
            }
            if ui
                .color_edit_button_rgba_unmultiplied(&mut self.stroke_picker)
                .on_hover_text("Stroke color")
                .changed()
            {
                self.settings.stroke_color_rgba = color::pack_rgba(self.stroke_picker);
                debug!("stroke_color_rgba = {:#010x}", self.settings.stroke_color_rgba);
            }
            if ui
                .add(
                    egui::DragValue::new(&mut self.settings.line_width)
                        .range(0.1..=20.0)
                        .speed(0.1)
                        .fixed_decimals(1),
                )
                .on_hover_text("Line width")
                .changed()
            {
                debug!("line_width = {}", self.settings.line_width);
            }

            ui.separator();

            let mut clicked = None;
            if let Some(icons) = &self.icons {
                for (button, texture) in icons.iter() {
                    let sized = egui::load::SizedTexture::from_handle(texture);
                    let img = egui::Image::from_texture(sized)
                        .fit_to_exact_size(egui::Vec2::splat(ICON_SIZE as f32));
                    if ui
                        .add(egui::Button::image(img))
                        .on_hover_text(button.caption())
                        .clicked()
                    {
                        clicked = Some(*button);
                    }
                }
            }
            if let Some(button) = clicked {
                self.on_tool_button(button);
            }
        });
    }

    fn canvas_view(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::both()
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let (response, painter) =
                    ui.allocate_painter(CANVAS_SIZE, egui::Sense::click_and_drag());
                let canvas_rect = response.rect;
                painter.rect_filled(canvas_rect, 0.0, egui::Color32::WHITE);

                let press_area = if response.hovered() {
                    canvas_rect.intersect(ui.clip_rect())
                } else {
                    egui::Rect::NOTHING
                };
                let events =
                    ui.input(|i| input::pointer_events(&i.events, canvas_rect.min, press_area));
                for event in events {
                    if self.canvas.dispatch(event) {
                        ui.ctx().request_repaint();
                    }
                }

                self.canvas.paint(&painter, canvas_rect.min.to_vec2());
            });
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for SketchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_icons(ctx);

        if ctx.input(|i| i.viewport().close_requested()) && !self.closed {
            self.closed = true;
            if self.on_close.send(self.settings).is_err() {
                warn!("Settings receiver is gone; settings will not be saved");
            }
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas_view(ui);
        });
    }
}

// ── Main ────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config_path = ToolSettings::config_path()?;
    let settings = ToolSettings::load(&config_path)
        .with_context(|| format!("Failed to load settings from {}", config_path.display()))?;
    settings.log_values();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 580.0])
            .with_title("shapedit"),
        ..Default::default()
    };

    let (tx, rx) = mpsc::channel();
    eframe::run_native(
        "shapedit",
        options,
        Box::new(move |_cc| Ok(Box::new(SketchApp::new(settings, tx)))),
    )
    .map_err(|err| anyhow::anyhow!("Failed to run eframe: {err}"))?;

    match rx.try_recv() {
        Ok(settings) => {
            settings.log_values();
            settings
                .save(&config_path)
                .with_context(|| format!("Failed to save settings to {}", config_path.display()))?;
        }
        Err(_) => info!("Window closed without a close request; settings not saved"),
    }

    Ok(())
}
