use eframe::egui::epaint::QuadraticBezierShape;
use eframe::egui::{self, Pos2, Stroke, Vec2};

const VIEWBOX: f32 = 100.0;

/// Các đường cong của quả bóng rổ, toạ độ trong hệ 100x100.
const SEAMS: [[(f32, f32); 3]; 6] = [
    [(18.0, 15.0), (10.0, 50.0), (18.0, 85.0)],
    [(82.0, 15.0), (90.0, 50.0), (82.0, 85.0)],
    [(15.0, 18.0), (50.0, 10.0), (85.0, 18.0)],
    [(15.0, 82.0), (50.0, 90.0), (85.0, 82.0)],
    [(20.0, 20.0), (50.0, 50.0), (80.0, 80.0)],
    [(80.0, 20.0), (50.0, 50.0), (20.0, 80.0)],
];

pub fn render(ui: &mut egui::Ui, size: f32) -> egui::Response {
    let (response, painter) = ui.allocate_painter(Vec2::splat(size), egui::Sense::hover());
    let rect = response.rect;
    let scale = size / VIEWBOX;
    let stroke = Stroke::new(3.0 * scale, ui.visuals().text_color());
    let to_screen = |(x, y): (f32, f32)| -> Pos2 { rect.min + Vec2::new(x, y) * scale };

    painter.circle_stroke(rect.center(), 48.0 * scale, stroke);
    for seam in SEAMS {
        let points = seam.map(to_screen);
        painter.add(QuadraticBezierShape::from_points_stroke(
            points,
            false,
            egui::Color32::TRANSPARENT,
            stroke,
        ));
    }

    response
}
