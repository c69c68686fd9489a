//! Normalized input events
//!
//! Challenges only ever see canvas-space coordinates. The host forwards
//! device-space pointer positions together with the canvas bounding box and
//! `Viewport` maps them into the fixed logical canvas.

use glam::Vec2;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Keys the engine cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Backspace,
    /// Any single printable character (digits, letters)
    Char(char),
}

impl Key {
    /// Map a browser `KeyboardEvent.key` string. Unhandled named keys
    /// (Shift, ArrowLeft, ...) map to `None`.
    pub fn from_browser(key: &str) -> Option<Self> {
        match key {
            "Escape" | "Esc" => Some(Key::Escape),
            "Enter" => Some(Key::Enter),
            " " | "Spacebar" => Some(Key::Space),
            "Backspace" => Some(Key::Backspace),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }

    /// Numeric value of a digit key
    pub fn digit(&self) -> Option<u32> {
        match self {
            Key::Char(c) => c.to_digit(10),
            _ => None,
        }
    }

    /// Case-insensitive letter match
    pub fn is_letter(&self, letter: char) -> bool {
        matches!(self, Key::Char(c) if c.eq_ignore_ascii_case(&letter))
    }

    /// Keys that dismiss an intro card
    pub fn is_start(&self) -> bool {
        matches!(self, Key::Space | Key::Enter)
    }
}

/// An input event in canvas space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    Click(Vec2),
    PointerDown(Vec2),
}

impl InputEvent {
    pub fn click(x: f32, y: f32) -> Self {
        InputEvent::Click(Vec2::new(x, y))
    }

    pub fn key(c: char) -> Self {
        InputEvent::KeyDown(Key::Char(c))
    }

    /// Position of a completed click, if this is one
    pub fn click_pos(&self) -> Option<Vec2> {
        match self {
            InputEvent::Click(pos) => Some(*pos),
            _ => None,
        }
    }

    pub fn key_down(&self) -> Option<Key> {
        match self {
            InputEvent::KeyDown(key) => Some(*key),
            _ => None,
        }
    }

    /// Space/Enter or a click: the gesture that starts a challenge
    pub fn is_start_gesture(&self) -> bool {
        match self {
            InputEvent::KeyDown(key) => key.is_start(),
            InputEvent::Click(_) => true,
            _ => false,
        }
    }
}

/// An input event in device (client) space, as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    KeyDown(Key),
    KeyUp(Key),
    Click(Vec2),
    PointerDown(Vec2),
}

/// Canvas bounding box in device space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a device-space position into the logical canvas
    pub fn to_canvas(&self, client: Vec2) -> Vec2 {
        // Degenerate box (hidden canvas): pass coordinates through unscaled
        let sx = if self.width > 0.0 { CANVAS_WIDTH / self.width } else { 1.0 };
        let sy = if self.height > 0.0 { CANVAS_HEIGHT / self.height } else { 1.0 };
        Vec2::new((client.x - self.left) * sx, (client.y - self.top) * sy)
    }

    pub fn normalize(&self, event: DeviceEvent) -> InputEvent {
        match event {
            DeviceEvent::KeyDown(key) => InputEvent::KeyDown(key),
            DeviceEvent::KeyUp(key) => InputEvent::KeyUp(key),
            DeviceEvent::Click(pos) => InputEvent::Click(self.to_canvas(pos)),
            DeviceEvent::PointerDown(pos) => InputEvent::PointerDown(self.to_canvas(pos)),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_browser() {
        assert_eq!(Key::from_browser("Escape"), Some(Key::Escape));
        assert_eq!(Key::from_browser(" "), Some(Key::Space));
        assert_eq!(Key::from_browser("b"), Some(Key::Char('b')));
        assert_eq!(Key::from_browser("Shift"), None);
        assert_eq!(Key::from_browser(""), None);
    }

    #[test]
    fn test_digit_and_letter() {
        assert_eq!(Key::Char('3').digit(), Some(3));
        assert_eq!(Key::Char('x').digit(), None);
        assert_eq!(Key::Enter.digit(), None);
        assert!(Key::Char('B').is_letter('b'));
        assert!(!Key::Char('c').is_letter('b'));
    }

    #[test]
    fn test_viewport_scales_to_canvas() {
        // Canvas displayed at half size, offset by (100, 50)
        let vp = Viewport::new(100.0, 50.0, 450.0, 240.0);
        let p = vp.to_canvas(Vec2::new(325.0, 170.0));
        assert!((p.x - 450.0).abs() < 1e-4);
        assert!((p.y - 240.0).abs() < 1e-4);
    }

    #[test]
    fn test_normalize_keeps_keys() {
        let vp = Viewport::new(10.0, 10.0, 1800.0, 960.0);
        assert_eq!(
            vp.normalize(DeviceEvent::KeyDown(Key::Enter)),
            InputEvent::KeyDown(Key::Enter)
        );
        assert_eq!(
            vp.normalize(DeviceEvent::Click(Vec2::new(910.0, 490.0))),
            InputEvent::click(450.0, 240.0)
        );
    }
}
