use std::path::{Path, PathBuf};

use eframe::egui;

use crate::config::Settings;
use crate::error::{AnnotateError, Result};
use crate::image_source::LoadedImage;
use crate::input::{Action, Direction, InputEvent, Key, Session, ZoomDirection};
use crate::serializer;

// ── Colors ──────────────────────────────────────────────────────────────────

const CROSS_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 0, 255);
const HIGHLIGHT_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 255, 0);
const LABEL_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const HIGHLIGHT_RADIUS: f32 = 5.0;

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "tif", "tiff", "gif", "webp", "tga", "pnm",
];

// ── Platform input mapping ──────────────────────────────────────────────────

/// Keyboard key to annotation event. Zoom keys are delivered on every platform.
pub fn map_key(key: egui::Key) -> Option<InputEvent> {
    use egui::Key as K;
    let event = match key {
        K::Backspace | K::Delete => InputEvent::Key(Key::Delete),
        K::A | K::ArrowLeft => InputEvent::Key(Key::Nudge(Direction::Left)),
        K::D | K::ArrowRight => InputEvent::Key(Key::Nudge(Direction::Right)),
        K::W | K::ArrowUp => InputEvent::Key(Key::Nudge(Direction::Up)),
        K::S | K::ArrowDown => InputEvent::Key(Key::Nudge(Direction::Down)),
        K::E => InputEvent::Zoom(ZoomDirection::In),
        K::Q => InputEvent::Zoom(ZoomDirection::Out),
        _ => return None,
    };
    Some(event)
}

/// One zoom step per frame in the direction of the wheel.
pub fn map_scroll(delta_y: f32) -> Option<InputEvent> {
    if delta_y > 0.0 {
        Some(InputEvent::Zoom(ZoomDirection::In))
    } else if delta_y < 0.0 {
        Some(InputEvent::Zoom(ZoomDirection::Out))
    } else {
        None
    }
}

/// The two diagonals of an "X" marker centred on `center`.
pub fn cross_segments(center: egui::Pos2, half: f32) -> [[egui::Pos2; 2]; 2] {
    let d = egui::vec2(half, half);
    let e = egui::vec2(half, -half);
    [[center - d, center + d], [center - e, center + e]]
}

// ── App ─────────────────────────────────────────────────────────────────────

pub struct MarkerApp {
    session: Session,
    image: Option<LoadedImage>,
    texture: Option<egui::TextureHandle>,

    // pan (middle mouse button)
    pan: egui::Vec2,
    panning: bool,

    // primary button went down on the image
    pressed_on_image: bool,
}

impl MarkerApp {
    pub fn new(settings: &Settings) -> Self {
        Self {
            session: Session::new(settings.threshold, settings.show_index),
            image: None,
            texture: None,
            pan: egui::Vec2::ZERO,
            panning: false,
            pressed_on_image: false,
        }
    }

    /// Open `image` and then import `points`, reporting failures like the buttons do.
    pub fn with_startup_files(mut self, image: Option<&Path>, points: Option<&Path>) -> Self {
        if let Some(path) = image {
            let result = self.open_image(path);
            self.report(result);
        }
        if let Some(path) = points {
            let result = self.import_points(path);
            self.report(result);
        }
        self
    }

    fn open_image(&mut self, path: &Path) -> Result<()> {
        match LoadedImage::open(path) {
            Ok(img) => {
                self.session.load_image(img.width, img.height);
                self.image = Some(img);
                self.texture = None;
                self.pan = egui::Vec2::ZERO;
                Ok(())
            }
            Err(e) => {
                // close the image view, keep the points as they are
                self.image = None;
                self.texture = None;
                Err(e)
            }
        }
    }

    fn import_points(&mut self, path: &Path) -> Result<()> {
        let points = serializer::read_points(path)?;
        self.session.import_points(points);
        Ok(())
    }

    fn save_points(&mut self, path: Option<PathBuf>) -> Result<()> {
        let mut path = path.ok_or(AnnotateError::NoDestinationChosen)?;
        if path.extension().is_none() {
            path.set_extension(serializer::POINTS_EXTENSION);
        }
        serializer::write_points(&path, self.session.store())?;
        Ok(())
    }

    fn select_image(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file();
        let Some(path) = picked else {
            log::debug!("Image selection cancelled");
            return;
        };
        let result = self.open_image(&path);
        self.report(result);
    }

    fn read_txt(&mut self) {
        let picked = rfd::FileDialog::new()
            .add_filter("text files", &[serializer::POINTS_EXTENSION])
            .pick_file();
        let Some(path) = picked else {
            log::debug!("Points import cancelled");
            return;
        };
        let result = self.import_points(&path);
        self.report(result);
    }

    fn save(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("text files", &[serializer::POINTS_EXTENSION]);
        if let Some(img) = &self.image {
            let stem = img.path.file_stem().unwrap_or_default().to_string_lossy();
            dialog = dialog.set_file_name(format!("{}.{}", stem, serializer::POINTS_EXTENSION));
        }
        let result = self.save_points(dialog.save_file());
        self.report(result);
    }

    fn report(&self, result: Result<()>) {
        if let Err(e) = result {
            log::warn!("{}", e);
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Warning)
                .set_title("Warning")
                .set_description(e.to_string())
                .set_buttons(rfd::MessageButtons::Ok)
                .show();
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        if let Some(ref img) = self.image {
            let size = [img.width as usize, img.height as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &img.rgba);
            self.texture = Some(ctx.load_texture(
                "image",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    fn image_rect_on_screen(&self, canvas_rect: egui::Rect) -> Option<egui::Rect> {
        let (w, h) = self.session.viewport()?.view_size();
        Some(egui::Rect::from_min_size(
            canvas_rect.min + self.pan,
            egui::vec2(w as f32, h as f32),
        ))
    }

    fn draw_points(&self, painter: &egui::Painter, image_rect: egui::Rect) {
        let Some(viewport) = self.session.viewport() else {
            return;
        };
        let (view_w, _) = viewport.view_size();
        let half = (view_w / 80) as f32;
        let stroke = egui::Stroke::new(1.0, CROSS_COLOR);
        let to_screen = |p| {
            let (x, y) = viewport.to_pixel(p);
            image_rect.min + egui::vec2(x as f32, y as f32)
        };

        for (i, point) in self.session.store().active_points() {
            let center = to_screen(point);
            for segment in cross_segments(center, half) {
                painter.line_segment(segment, stroke);
            }
            if self.session.show_index() {
                painter.text(
                    center,
                    egui::Align2::LEFT_BOTTOM,
                    (i + 1).to_string(),
                    egui::FontId::proportional((half * 1.5).max(10.0)),
                    LABEL_COLOR,
                );
            }
        }

        if let Some(index) = self.session.highlight() {
            if let Some(point) = self.session.store().get(index) {
                painter.circle_stroke(
                    to_screen(point),
                    HIGHLIGHT_RADIUS,
                    egui::Stroke::new(1.0, HIGHLIGHT_COLOR),
                );
            }
        }
    }

    fn dispatch(&mut self, event: InputEvent) -> Action {
        let action = self.session.handle(event);
        match action {
            Action::Created(i) => log::debug!("Created point {}", i + 1),
            Action::Selected(i) => log::debug!("Selected point {}", i + 1),
            Action::Deleted(i) => log::debug!("Deleted point {}", i + 1),
            Action::Deselected => log::debug!("Selection cleared"),
            Action::Zoomed(scale) => log::debug!("Zoom {:.0}%", scale * 100.0),
            Action::Moved(_) | Action::Nudged(_) | Action::Ignored => {}
        }
        action
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        // a focused widget such as the slider owns the arrow keys
        if ctx.memory(|m| m.focused().is_some()) {
            return;
        }
        let (events, escape) = ctx.input(|i| {
            let events: Vec<InputEvent> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => map_key(*key),
                    _ => None,
                })
                .collect();
            (events, i.key_pressed(egui::Key::Escape))
        });
        if escape {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        if self.image.is_none() {
            return;
        }
        for event in events {
            self.dispatch(event);
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .button("Select Image")
                .on_hover_text("Click to open an image")
                .clicked()
            {
                self.select_image();
            }
            if ui
                .button("Read Txt")
                .on_hover_text("Load a previously saved txt file to current image")
                .clicked()
            {
                self.read_txt();
            }
            if ui.button("Save").on_hover_text("Save to txt file").clicked() {
                self.save();
            }
            ui.separator();
            if ui.button("Show/Hide Index").clicked() {
                self.session.toggle_index();
            }
            if ui.button("Clear All Points").clicked() {
                self.session.clear_points();
                log::info!("Cleared all points");
            }
            ui.separator();
            ui.label("Max click distance:");
            let mut threshold = self.session.threshold();
            let slider = ui
                .add(
                    egui::Slider::new(&mut threshold, 0.0..=crate::selection::MAX_THRESHOLD)
                        .fixed_decimals(4),
                )
                .on_hover_text("Adjust smaller if you want to click two close points");
            if slider.changed() {
                self.session.set_threshold(threshold);
            }
            ui.separator();
            if let (Some(img), Some(viewport)) = (&self.image, self.session.viewport()) {
                ui.label(format!(
                    "{} ({}x{})  Zoom: {:.0}%  Points: {}",
                    img.file_name(),
                    img.width,
                    img.height,
                    viewport.scale() * 100.0,
                    self.session.store().active_count()
                ));
            } else {
                ui.label(format!(
                    "No image  Points: {}",
                    self.session.store().active_count()
                ));
            }
        });
    }

    fn canvas(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        painter.rect_filled(canvas_rect, 0.0, egui::Color32::from_gray(49));

        let (Some(tex), Some(image_rect)) = (
            self.texture.as_ref().map(|t| t.id()),
            self.image_rect_on_screen(canvas_rect),
        ) else {
            return;
        };

        painter.image(
            tex,
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
        self.draw_points(&painter.with_clip_rect(canvas_rect), image_rect);

        // Handle pan (middle mouse button)
        let middle_down = ctx.input(|i| i.pointer.middle_down());
        if middle_down {
            let delta = ctx.input(|i| i.pointer.delta());
            self.pan += delta;
            self.panning = true;
        } else {
            self.panning = false;
        }

        // Handle zoom (scroll wheel)
        if response.hovered() {
            if let Some(event) = map_scroll(ctx.input(|i| i.raw_scroll_delta.y)) {
                self.dispatch(event);
            }
        }

        if self.panning {
            return;
        }

        let (pressed, held, released, moved, pointer) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_down(),
                i.pointer.primary_released(),
                i.pointer.delta() != egui::Vec2::ZERO,
                i.pointer.latest_pos(),
            )
        });

        if pressed {
            self.pressed_on_image = false;
            if let Some(pos) = response.hover_pos().filter(|p| image_rect.contains(*p)) {
                let rel = pos - image_rect.min;
                self.pressed_on_image = true;
                self.dispatch(InputEvent::PrimaryPressed {
                    x: rel.x as f64,
                    y: rel.y as f64,
                });
            }
        } else if self.pressed_on_image && held && moved {
            // every move counts, including those under egui's drag threshold
            if let Some(pos) = pointer {
                let rel = pos - image_rect.min;
                self.dispatch(InputEvent::PrimaryDragged {
                    x: rel.x as f64,
                    y: rel.y as f64,
                });
            }
        }

        if released {
            self.pressed_on_image = false;
        }
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for MarkerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_texture(ctx);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.toolbar(ui);
        });

        // the toolbar may have swapped the image
        self.ensure_texture(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ctx, ui);
        });

        self.handle_keyboard(ctx);
    }
}
