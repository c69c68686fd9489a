//! Lives and credits HUD, drawn over the platformer view

use glam::Vec2;

use crate::Rect;
use crate::renderer::{Align, DrawSurface, TextStyle, colors};

const HEART_X: f32 = 10.0;
const HEART_STEP: f32 = 26.0;
const HEART_Y: f32 = 68.0;
const CREDITS_BOX: Rect = Rect::new(8.0, 74.0, 90.0, 22.0);

pub fn render_hud(surface: &mut dyn DrawSurface, lives: u8, max_lives: u8, credits: u32) {
    for i in 0..max_lives {
        let (glyph, color) = if i < lives {
            ("❤️", colors::HEART)
        } else {
            ("🖤", colors::HEART_EMPTY)
        };
        surface.text(
            glyph,
            Vec2::new(HEART_X + i as f32 * HEART_STEP, HEART_Y),
            TextStyle::new(22.0, color).align(Align::Left),
        );
    }

    surface.fill_rounded_rect(CREDITS_BOX, 6.0, colors::HUD_BACKING, colors::HUD_BACKING);
    let color = if credits > 0 {
        colors::TITLE_GOLD
    } else {
        colors::TEXT_DIM
    };
    surface.text(
        &format!("🦴 ×{}", credits),
        Vec2::new(14.0, 90.0),
        TextStyle::new(14.0, color).bold().align(Align::Left),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};

    #[test]
    fn test_hearts_reflect_lives() {
        let mut list = DrawList::new();
        render_hud(&mut list, 1, 3, 4);
        let hearts: Vec<_> = list
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, style, .. } if text == "❤️" || text == "🖤" => {
                    Some(style.color)
                }
                _ => None,
            })
            .collect();
        assert_eq!(hearts, vec![colors::HEART, colors::HEART_EMPTY, colors::HEART_EMPTY]);
        assert!(list.has_text("🦴 ×4"));
    }
}
