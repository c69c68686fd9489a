//! Shared drawing helpers for challenge panels

use glam::Vec2;

use super::{Align, Color, DrawSurface, TextStyle, colors};
use crate::Rect;
use crate::consts::{CANVAS_CENTER_X, CANVAS_HEIGHT, CANVAS_WIDTH};

/// Dim the whole canvas behind the challenge panel
pub fn overlay_backdrop(surface: &mut dyn DrawSurface) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        colors::OVERLAY_DIM,
    );
}

/// Rounded challenge panel centered on `(cx, cy)`
pub fn panel(surface: &mut dyn DrawSurface, cx: f32, cy: f32, w: f32, h: f32, border: Color) {
    surface.fill_rounded_rect(Rect::centered(cx, cy, w, h), 16.0, colors::PANEL_FILL, border);
}

/// Horizontal jitter for a shaking panel. Deterministic so replays render
/// identically.
pub fn shake_offset(shake: u32, amplitude: f32) -> f32 {
    if shake == 0 {
        return 0.0;
    }
    (shake as f32 * 2.3).sin() * amplitude
}

/// Centered text line on the panel axis
pub fn centered_text(surface: &mut dyn DrawSurface, text: &str, y: f32, style: TextStyle) {
    surface.text(text, Vec2::new(CANVAS_CENTER_X, y), style.align(Align::Center));
}

/// Numbered option buttons ("1.", "2.", ...) with centered labels
pub fn option_buttons(
    surface: &mut dyn DrawSurface,
    rects: &[Rect],
    labels: &[String],
    wrong: bool,
    dx: f32,
) {
    let (fill, border) = if wrong {
        (colors::WRONG_FILL, colors::WRONG)
    } else {
        (colors::OPTION_FILL, colors::OPTION_BORDER)
    };
    for (i, (rect, label)) in rects.iter().zip(labels).enumerate() {
        let rect = rect.offset_x(dx);
        surface.fill_rect(rect, fill);
        surface.stroke_rect(rect, border, 2.0);
        let mid_y = rect.y + rect.h / 2.0;
        surface.text(
            &format!("{}.", i + 1),
            Vec2::new(rect.x + 8.0, mid_y + 5.0),
            TextStyle::new(15.0, colors::TITLE_GOLD).bold().align(Align::Left),
        );
        surface.text(
            label,
            Vec2::new(rect.center().x, mid_y + 7.0),
            TextStyle::new(20.0, colors::TEXT).bold(),
        );
    }
}

/// Title card shown before a challenge starts
pub fn intro_card(
    surface: &mut dyn DrawSurface,
    title: &str,
    title_color: Color,
    lines: &[&str],
    border: Color,
) {
    let (w, h) = (580.0, 360.0);
    panel(surface, CANVAS_CENTER_X, CANVAS_HEIGHT / 2.0, w, h, border);
    let top = CANVAS_HEIGHT / 2.0 - h / 2.0;
    centered_text(surface, title, top + 70.0, TextStyle::new(24.0, title_color).bold());
    let mut y = top + 130.0;
    for line in lines {
        centered_text(surface, line, y, TextStyle::new(18.0, colors::TEXT));
        y += 30.0;
    }
    centered_text(
        surface,
        "Press Space or click to start",
        top + h - 50.0,
        TextStyle::new(16.0, colors::TITLE_GOLD),
    );
}

/// Greedy word wrap by character budget. Returns the y below the last line.
pub fn wrap_text(
    surface: &mut dyn DrawSurface,
    text: &str,
    pos: Vec2,
    max_chars: usize,
    line_height: f32,
    style: TextStyle,
) -> f32 {
    let mut y = pos.y;
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            surface.text(&line, Vec2::new(pos.x, y), style);
            line.clear();
            y += line_height;
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        surface.text(&line, Vec2::new(pos.x, y), style);
        y += line_height;
    }
    y
}
