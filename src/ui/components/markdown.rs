use eframe::egui;

use crate::render::{Block, DisplayTree, Span};

pub fn render(ui: &mut egui::Ui, tree: &DisplayTree) {
    for block in &tree.blocks {
        match block {
            Block::Heading { level, spans } => {
                ui.add_space(6.0);
                inline(ui, spans, Some(heading_size(*level)));
            }
            Block::Paragraph(spans) => inline(ui, spans, None),
            Block::ListItem {
                depth,
                marker,
                spans,
            } => {
                ui.horizontal_wrapped(|ui| {
                    ui.add_space(12.0 + *depth as f32 * 16.0);
                    ui.label(marker.as_str());
                    ui.add_space(4.0);
                    ui.spacing_mut().item_spacing.x = 0.0;
                    for span in spans {
                        add_span(ui, span, None);
                    }
                });
            }
            Block::Quote(spans) => {
                ui.horizontal(|ui| {
                    let height = ui.text_style_height(&egui::TextStyle::Body);
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(3.0, height), egui::Sense::hover());
                    ui.painter()
                        .rect_filled(rect, egui::CornerRadius::ZERO, ui.visuals().weak_text_color());
                    inline(ui, spans, None);
                });
            }
            Block::Code { language, code } => {
                egui::Frame::new()
                    .fill(ui.visuals().code_bg_color)
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(egui::CornerRadius::same(4))
                    .show(ui, |ui| {
                        if let Some(language) = language {
                            ui.label(egui::RichText::new(language).small().weak());
                        }
                        ui.label(egui::RichText::new(code).monospace());
                    });
            }
            Block::Table { header, rows } => {
                egui::Grid::new(ui.next_auto_id())
                    .striped(true)
                    .spacing([16.0, 4.0])
                    .show(ui, |ui| {
                        for cell in header {
                            ui.horizontal_wrapped(|ui| {
                                for span in cell {
                                    let mut span = span.clone();
                                    span.style.strong = true;
                                    add_span(ui, &span, None);
                                }
                            });
                        }
                        ui.end_row();

                        for row in rows {
                            for cell in row {
                                inline(ui, cell, None);
                            }
                            ui.end_row();
                        }
                    });
            }
            Block::Rule => {
                ui.separator();
            }
        }
    }
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 22.0,
        2 => 19.0,
        3 => 17.0,
        _ => 15.0,
    }
}

fn inline(ui: &mut egui::Ui, spans: &[Span], size: Option<f32>) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for span in spans {
            add_span(ui, span, size);
        }
    });
}

fn add_span(ui: &mut egui::Ui, span: &Span, size: Option<f32>) {
    let mut text = egui::RichText::new(&span.text);
    if let Some(size) = size {
        text = text.size(size).strong();
    }
    if span.style.strong {
        text = text.strong();
    }
    if span.style.emphasis {
        text = text.italics();
    }
    if span.style.strikethrough {
        text = text.strikethrough();
    }
    if span.style.code {
        text = text.code();
    }

    match &span.link {
        Some(url) => {
            ui.add(egui::Hyperlink::from_label_and_url(text, url).open_in_new_tab(true));
        }
        None => {
            ui.label(text);
        }
    }
}
