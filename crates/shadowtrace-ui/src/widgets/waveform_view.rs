//! Paints a [`Frame`] into an egui region.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui};
use shadowtrace_core::{DrawOp, Frame, Rgb, Vec2, WaveformRenderer};

/// Background behind the trace.
pub const VIEW_BACKGROUND: Color32 = Color32::from_rgb(240, 240, 240);

/// Widget filling the available space with the renderer's current frame.
pub struct WaveformView<'a> {
    renderer: &'a WaveformRenderer,
}

impl<'a> WaveformView<'a> {
    /// Wraps a renderer for one paint.
    pub fn new(renderer: &'a WaveformRenderer) -> Self {
        Self { renderer }
    }

    /// Allocates the remaining space and paints into it.
    pub fn show(self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, VIEW_BACKGROUND);

        let frame = self.renderer.render(rect.width());
        paint_frame(&painter, rect, &frame);
        response
    }
}

fn color(rgb: Rgb, opacity: f32) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2).gamma_multiply(opacity)
}

fn to_screen(rect: Rect, p: Vec2) -> Pos2 {
    Pos2::new(rect.min.x + p.x, rect.min.y + p.y)
}

/// Paints `frame` with its origin at `rect.min`.
pub fn paint_frame(painter: &Painter, rect: Rect, frame: &Frame) {
    for op in &frame.ops {
        match op {
            DrawOp::Line {
                from,
                to,
                width,
                color: rgb,
                opacity,
            } => {
                painter.line_segment(
                    [to_screen(rect, *from), to_screen(rect, *to)],
                    Stroke::new(*width, color(*rgb, *opacity)),
                );
            }
            DrawOp::Rect {
                min,
                size,
                width,
                color: rgb,
                opacity,
            } => {
                let min = to_screen(rect, *min);
                painter.rect_stroke(
                    Rect::from_min_size(min, egui::vec2(size.x, size.y)),
                    0.0,
                    Stroke::new(*width, color(*rgb, *opacity)),
                    egui::StrokeKind::Middle,
                );
            }
            DrawOp::Label {
                position,
                text,
                font_px,
                color: rgb,
                opacity,
            } => {
                painter.text(
                    to_screen(rect, *position),
                    Align2::LEFT_BOTTOM,
                    *text,
                    FontId::proportional(*font_px),
                    color(*rgb, *opacity),
                );
            }
            DrawOp::Circle {
                center,
                radius,
                width,
                color: rgb,
                fill,
                opacity,
            } => {
                let center = to_screen(rect, *center);
                let stroke = Stroke::new(*width, color(*rgb, *opacity));
                match fill {
                    Some(fill) => painter.circle(center, *radius, color(*fill, *opacity), stroke),
                    None => painter.circle_stroke(center, *radius, stroke),
                };
            }
            DrawOp::Polyline {
                points,
                width,
                color: rgb,
            } => {
                let stroke = Stroke::new(*width, color(*rgb, 1.0));
                let screen: Vec<Pos2> = points.iter().map(|p| to_screen(rect, *p)).collect();
                // Round end caps.
                for cap in [screen.first(), screen.last()].into_iter().flatten() {
                    painter.circle_filled(*cap, *width / 2.0, stroke.color);
                }
                painter.add(Shape::line(screen, stroke));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_screen_offsets_by_rect_origin() {
        let rect = Rect::from_min_size(Pos2::new(300.0, 20.0), egui::vec2(800.0, 600.0));
        assert_eq!(
            to_screen(rect, Vec2::new(10.0, 248.0)),
            Pos2::new(310.0, 268.0)
        );
    }

    #[test]
    fn test_paints_full_frame_headless() {
        let renderer = WaveformRenderer::new(shadowtrace_core::TelemetryContext::shared(220.0));
        renderer.context().set_angle_degrees(45.0);
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                WaveformView::new(&renderer).show(ui);
            });
        });
        assert!(!output.shapes.is_empty());
    }

    #[test]
    fn test_opacity_scales_alpha() {
        let c = color(Rgb(100, 100, 100), 0.2);
        assert!(c.a() < 255);
        assert_eq!(color(Rgb(120, 60, 60), 1.0), Color32::from_rgb(120, 60, 60));
    }
}
