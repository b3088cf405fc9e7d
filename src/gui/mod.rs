use crate::session::{parse_true_label, prepare_predict_payload, Session, SessionEvent};
use crate::settings::{Settings, SETTINGS_FILE};
use crate::sketch::{Brush, SketchSurface};
use chrono::Local;
use eframe::egui::{self, Color32, RichText};
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use std::io::Write as _;
use std::time::{Duration, Instant};

pub const TOAST_LOG_FILE: &str = "toast.log";

const RESULT_GREEN: Color32 = Color32::from_rgb(46, 204, 113);

fn append_toast_log(msg: &str) {
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(TOAST_LOG_FILE)
    {
        let _ = writeln!(file, "{} - {}", Local::now().to_rfc3339(), msg);
    }
}

fn push_toast(toasts: &mut Toasts, toast: Toast) {
    append_toast_log(toast.text.text());
    toasts.add(toast);
}

/// Main application window: the drawing canvas on top, the prediction result
/// and feedback controls underneath. Owns the sketch surface and the session
/// handed over at startup.
pub struct SketchpadApp {
    surface: SketchSurface,
    session: Session,
    settings: Settings,
    toasts: Toasts,
    canvas_tex: Option<egui::TextureHandle>,
    tex_revision: Option<u64>,
    feedback_input: String,
    feedback_error: Option<String>,
    canvas_error: Option<String>,
}

impl SketchpadApp {
    pub fn new(settings: Settings, session: Session) -> Self {
        let (width, height) = settings.canvas_size;
        let brush = Brush {
            width: settings.brush_width,
            ..Default::default()
        };
        Self {
            surface: SketchSurface::new(width, height, brush),
            session,
            settings,
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
            canvas_tex: None,
            tex_revision: None,
            feedback_input: String::new(),
            feedback_error: None,
            canvas_error: None,
        }
    }

    fn add_toast(&mut self, kind: ToastKind, text: String) {
        if !self.settings.enable_toasts {
            return;
        }
        push_toast(
            &mut self.toasts,
            Toast {
                text: text.into(),
                kind,
                options: ToastOptions::default()
                    .duration_in_seconds(self.settings.toast_duration as f64),
            },
        );
    }

    fn on_predict(&mut self) {
        match prepare_predict_payload(&self.surface) {
            Ok(payload) => {
                self.canvas_error = None;
                self.session.predict(payload);
            }
            Err(message) => self.canvas_error = Some(message),
        }
    }

    fn on_submit_feedback(&mut self) {
        match parse_true_label(&self.feedback_input) {
            Err(message) => self.feedback_error = Some(message),
            Ok(label) => match self.session.submit_feedback(label) {
                Err(message) => self.feedback_error = Some(message),
                Ok(()) => {
                    self.feedback_error = None;
                    self.feedback_input.clear();
                }
            },
        }
    }

    fn canvas_ui(&mut self, ui: &mut egui::Ui) {
        let raster_size = egui::vec2(
            self.surface.raster().width() as f32,
            self.surface.raster().height() as f32,
        );
        let (response, painter) = ui.allocate_painter(raster_size, egui::Sense::drag());
        let rect = response.rect;
        painter.rect_filled(rect, 2.0, Color32::BLACK);

        if self.tex_revision != Some(self.surface.revision()) {
            let raster = self.surface.raster();
            let image = egui::ColorImage::from_rgba_unmultiplied(
                [raster.width() as usize, raster.height() as usize],
                raster.pixels(),
            );
            match &mut self.canvas_tex {
                Some(tex) => tex.set(image, egui::TextureOptions::NEAREST),
                None => {
                    self.canvas_tex = Some(ui.ctx().load_texture(
                        "sketch_canvas",
                        image,
                        egui::TextureOptions::NEAREST,
                    ));
                }
            }
            self.tex_revision = Some(self.surface.revision());
        }
        if let Some(tex) = &self.canvas_tex {
            painter.image(
                tex.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }

        // Pointer and touch both arrive through the same interact position,
        // already relative to the window; subtracting the canvas origin gives
        // surface-local coordinates.
        let to_surface = |pos: egui::Pos2| (pos.x - rect.min.x, pos.y - rect.min.y);
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                // A fresh stroke invalidates the displayed prediction.
                self.session.clear_result();
                self.canvas_error = None;
                self.surface.begin_stroke(to_surface(pos));
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.surface.extend_stroke(to_surface(pos));
            }
        }
        if response.drag_stopped() {
            self.surface.end_stroke();
        }
    }

    fn toolbar_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.surface.can_undo(), egui::Button::new("Undo"))
                .clicked()
            {
                self.surface.undo();
            }
            if ui
                .add_enabled(self.surface.can_redo(), egui::Button::new("Redo"))
                .clicked()
            {
                self.surface.redo();
            }
            if ui.button("Clear").clicked() {
                self.surface.clear();
                self.session.clear_result();
                self.canvas_error = None;
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if self.session.is_predicting() {
                    "Predicting…"
                } else {
                    "Predict"
                };
                if ui
                    .add_enabled(!self.session.is_predicting(), egui::Button::new(label))
                    .clicked()
                {
                    self.on_predict();
                }
            });
        });
        if let Some(error) = self.canvas_error.clone() {
            ui.colored_label(Color32::LIGHT_RED, error);
        }
    }

    fn prediction_ui(&mut self, ui: &mut egui::Ui) {
        if let Some(error) = self.session.error().map(str::to_owned) {
            ui.colored_label(Color32::LIGHT_RED, error);
        }
        if let Some(message) = self.session.success_message().map(str::to_owned) {
            ui.colored_label(RESULT_GREEN, message);
        }

        let Some(prediction) = self.session.result().copied() else {
            return;
        };
        ui.separator();
        ui.label("Prediction");
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(prediction.predicted_digit.to_string())
                    .size(48.0)
                    .strong(),
            );
            ui.colored_label(RESULT_GREEN, format!("{:.1}%", prediction.confidence));
        });

        ui.horizontal(|ui| {
            ui.label("Enter true label:");
            ui.add(
                egui::TextEdit::singleline(&mut self.feedback_input)
                    .desired_width(60.0)
                    .hint_text("Type here"),
            );
            if ui
                .add_enabled(
                    !self.session.is_submitting_feedback(),
                    egui::Button::new("Submit Feedback"),
                )
                .clicked()
            {
                self.on_submit_feedback();
            }
        });
        if let Some(error) = self.feedback_error.clone() {
            ui.colored_label(Color32::LIGHT_RED, error);
        }
    }
}

impl eframe::App for SketchpadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut toast_queue: Vec<(ToastKind, String)> = Vec::new();
        self.session.pump(|event| match event {
            SessionEvent::PredictFinished(Err(message)) => {
                toast_queue.push((ToastKind::Error, message.clone()));
            }
            SessionEvent::FeedbackFinished(Ok(())) => {
                toast_queue.push((
                    ToastKind::Success,
                    crate::session::FEEDBACK_SUCCESS_MESSAGE.to_string(),
                ));
            }
            SessionEvent::FeedbackFinished(Err(message)) => {
                toast_queue.push((ToastKind::Error, message.clone()));
            }
            SessionEvent::PredictFinished(Ok(_)) => {}
        });
        for (kind, text) in toast_queue {
            self.add_toast(kind, text);
        }
        self.session.expire_messages(Instant::now());

        // Keep painting while a call is in flight or a timed message is
        // waiting to expire, so state changes show without input events.
        if self.session.is_predicting()
            || self.session.is_submitting_feedback()
            || self.session.has_pending_expiry()
        {
            ctx.request_repaint_after(Duration::from_millis(200));
        }

        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.settings.window_size = Some((rect.width() as i32, rect.height() as i32));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("MNIST Digit Recognizer");
            });
            ui.label("Draw a digit (0-9) below and click Predict. You can also provide feedback on the prediction.");
            ui.add_space(8.0);
            self.canvas_ui(ui);
            ui.add_space(4.0);
            self.toolbar_ui(ui);
            ui.add_space(4.0);
            self.prediction_ui(ui);
        });

        if self.settings.enable_toasts {
            self.toasts.show(ctx);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.settings.save(SETTINGS_FILE) {
            tracing::warn!("failed to save settings on exit: {err:#}");
        }
    }
}
