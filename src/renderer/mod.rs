//! 2D rendering abstraction
//!
//! The engine never owns a canvas. Everything it draws goes through
//! `DrawSurface`, implemented by the host (a Canvas2D context on the web) or by
//! `DrawList`, which records commands for headless runs and tests.

pub mod shapes;

use glam::Vec2;

use crate::Rect;

/// RGBA color, components in 0..=1
pub type Color = [f32; 4];

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// Font and anchor for a text draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            bold: false,
            color,
            align: Align::Center,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Drawing calls issued by the engine
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, fill: Color, stroke: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    fn text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}

/// A recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect { rect: Rect, color: Color },
    StrokeRect { rect: Rect, color: Color, width: f32 },
    RoundedRect { rect: Rect, radius: f32, fill: Color, stroke: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Line { from: Vec2, to: Vec2, color: Color, width: f32 },
    Text { text: String, pos: Vec2, style: TextStyle },
}

/// Recording surface
#[derive(Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text strings drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// True if any drawn text contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

impl DrawSurface for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, fill: Color, stroke: Color) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            radius,
            fill,
            stroke,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}

/// Colors for overlay elements
pub mod colors {
    use super::Color;

    pub const OVERLAY_DIM: Color = [0.0, 0.0, 0.0, 0.75];
    pub const PANEL_FILL: Color = [0.04, 0.08, 0.16, 0.92];
    pub const PANEL_BORDER: Color = [0.39, 0.63, 1.0, 0.6];
    pub const PANEL_BORDER_ACTION: Color = [0.7, 0.39, 1.0, 0.5];
    pub const TITLE_GOLD: Color = [1.0, 0.84, 0.0, 1.0];
    pub const TITLE_SKY: Color = [0.63, 0.85, 0.94, 1.0];
    pub const TITLE_EMBER: Color = [1.0, 0.38, 0.25, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const TEXT_DIM: Color = [0.67, 0.67, 0.67, 1.0];
    pub const TEXT_SOFT: Color = [0.8, 0.8, 0.8, 1.0];
    pub const OPTION_FILL: Color = [0.16, 0.31, 0.63, 0.5];
    pub const OPTION_BORDER: Color = [0.4, 0.67, 1.0, 1.0];
    pub const WRONG_FILL: Color = [0.78, 0.24, 0.24, 0.3];
    pub const WRONG: Color = [1.0, 0.38, 0.38, 1.0];
    pub const RIGHT: Color = [0.31, 0.88, 0.31, 1.0];
    pub const TOKEN_FILL: Color = [0.24, 0.16, 0.63, 0.7];
    pub const TOKEN_SELECTED: Color = [1.0, 0.78, 0.0, 0.8];
    pub const SUBMIT_FILL: Color = [0.16, 0.55, 0.24, 0.8];
    pub const BUTTON_FILL: Color = [0.86, 0.31, 0.12, 0.8];
    pub const BOLT: Color = [1.0, 1.0, 0.31, 1.0];
    pub const RIVAL: Color = [0.88, 0.31, 0.13, 1.0];
    pub const MARKER: Color = [1.0, 0.88, 0.38, 1.0];
    pub const MARKER_MISSED: Color = [0.78, 0.2, 0.2, 0.6];
    pub const LANES: [Color; 3] = [
        [0.39, 0.63, 1.0, 0.4],
        [0.39, 0.86, 0.39, 0.4],
        [1.0, 0.47, 0.24, 0.4],
    ];
    pub const HEART: Color = [1.0, 0.25, 0.25, 1.0];
    pub const HEART_EMPTY: Color = [0.27, 0.27, 0.27, 1.0];
    pub const HUD_BACKING: Color = [0.0, 0.0, 0.0, 0.5];
}
