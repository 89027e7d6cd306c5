use eframe::egui;

use crate::common::Chart;
use crate::ui::state::ChartView;

const MAX_CHART_HEIGHT: f32 = 400.0;

pub fn render(ui: &mut egui::Ui, chart: &Chart, view: Option<&ChartView>) {
    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12))
            .corner_radius(egui::CornerRadius::same(12))
            .show(ui, |ui| {
                if let Some(title) = &chart.title {
                    ui.label(egui::RichText::new(title).strong().weak());
                    ui.add_space(6.0);
                }

                match view {
                    Some(ChartView::Image { uri, bytes }) => {
                        ui.add(
                            egui::Image::from_bytes(uri.clone(), bytes.clone())
                                .max_height(MAX_CHART_HEIGHT)
                                .max_width(ui.available_width().min(640.0))
                                .corner_radius(egui::CornerRadius::same(8)),
                        )
                        .on_hover_text(chart.alt_text());
                    }
                    _ => {
                        ui.label(egui::RichText::new(chart.alt_text()).italics().weak());
                    }
                }
            });
    });
    ui.add_space(12.0);
}
