use egui::{Align2, Color32, FontId, LayerId, Order, RichText};

use crate::math::to_rgb8;
use crate::title;

pub const TITLE_TOP: f32 = 40.0;
pub const TITLE_SIZE: f32 = 36.0;
const SHADOW_OFFSET: egui::Vec2 = egui::vec2(2.0, 2.0);
const OUTLINE_OFFSETS: [egui::Vec2; 4] = [
    egui::vec2(-1.0, 0.0),
    egui::vec2(1.0, 0.0),
    egui::vec2(0.0, -1.0),
    egui::vec2(0.0, 1.0),
];
const COUNTER_MARGIN: f32 = 16.0;

pub fn counter_text(count: usize, capacity: usize) -> String {
    format!("Paddles: {} / {}", count, capacity)
}

/// Animated title and paddle counter drawn over the 3D view
#[derive(Debug, Clone, Copy)]
pub struct Overlay {
    pub visible: bool,
}

impl Overlay {
    pub fn new(visible: bool) -> Self {
        Self { visible }
    }

    pub fn show(&self, ctx: &egui::Context, time: f32, count: usize, capacity: usize) {
        if !self.visible {
            return;
        }
        draw_title(ctx, time);
        draw_counter(ctx, count, capacity);
    }
}

fn draw_title(ctx: &egui::Context, time: f32) {
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, egui::Id::new("title")));
    let font = FontId::proportional(TITLE_SIZE);

    let letters: Vec<_> = title::letters(time)
        .map(|letter| {
            let width = painter
                .layout_no_wrap(letter.glyph.to_string(), font.clone(), Color32::WHITE)
                .size()
                .x;
            (letter, width)
        })
        .collect();

    let total: f32 = letters.iter().map(|(_, w)| w).sum();
    let mut x = ctx.content_rect().center().x - total * 0.5;

    for (letter, width) in letters {
        let pos = egui::pos2(x, TITLE_TOP + letter.offset);
        let [r, g, b] = to_rgb8(letter.color);
        let glyph = letter.glyph.to_string();

        painter.text(pos + SHADOW_OFFSET, Align2::LEFT_TOP, &glyph, font.clone(), Color32::from_black_alpha(110));
        for offset in OUTLINE_OFFSETS {
            painter.text(pos + offset, Align2::LEFT_TOP, &glyph, font.clone(), Color32::BLACK);
        }
        painter.text(pos, Align2::LEFT_TOP, &glyph, font.clone(), Color32::from_rgb(r, g, b));
        x += width;
    }
}

fn draw_counter(ctx: &egui::Context, count: usize, capacity: usize) {
    egui::Area::new(egui::Id::new("paddle_counter"))
        .anchor(Align2::RIGHT_TOP, egui::vec2(-COUNTER_MARGIN, COUNTER_MARGIN))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_black_alpha(140))
                .inner_margin(10.0)
                .corner_radius(6.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(counter_text(count, capacity))
                            .size(18.0)
                            .color(Color32::WHITE),
                    );
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_reads_count_over_capacity() {
        assert_eq!(counter_text(7, 42), "Paddles: 7 / 42");
    }

    #[test]
    fn hidden_overlay_paints_nothing() {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            Overlay::new(false).show(ctx, 0.0, 4, 42);
        });
        assert!(output.shapes.is_empty());
    }

    #[test]
    fn visible_overlay_paints_title_and_counter() {
        let ctx = egui::Context::default();
        let mut frame = || {
            ctx.run(egui::RawInput::default(), |ctx| {
                Overlay::new(true).show(ctx, 1.0, 4, 42);
            })
        };
        // New areas spend their first frame measuring themselves
        frame();
        let output = frame();
        // Shadow, outline and fill per letter plus the counter panel
        assert!(output.shapes.len() > 6 * title::TITLE.len());
    }

    #[test]
    fn title_is_centered_on_content_rect() {
        let ctx = egui::Context::default();
        let input = || egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(800.0, 600.0))),
            ..Default::default()
        };
        ctx.run(input(), |ctx| Overlay::new(true).show(ctx, 0.0, 0, 42));
        let output = ctx.run(input(), |ctx| Overlay::new(true).show(ctx, 0.0, 0, 42));

        let bounds = output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                egui::Shape::Text(text) => Some(text),
                _ => None,
            })
            .filter(|text| {
                text.galley.job.sections.first().map(|s| s.format.font_id.size) == Some(TITLE_SIZE)
            })
            .fold(egui::Rect::NOTHING, |acc, text| acc.union(text.visual_bounding_rect()));

        assert!(bounds.is_positive());
        assert!((bounds.center().x - 400.0).abs() < 4.0);
    }
}
