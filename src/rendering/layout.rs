//! Layout primitives: rectangles, display lists and text measurement

use crate::model::EmbeddedImage;
use crate::rendering::paint::{Color, ImageFit, PaintCommand, GLYPH_ADVANCE, GLYPH_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Shrink by `by` on every side.
    pub fn inset(&self, by: u32) -> Rect {
        Rect {
            x: self.x + by as i32,
            y: self.y + by as i32,
            width: self.width.saturating_sub(by * 2),
            height: self.height.saturating_sub(by * 2),
        }
    }
}

/// Logical size of a painted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// The capturable output of a layout pass: a bounded extent plus the
/// commands that paint it, in back-to-front order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayList {
    pub extent: Extent,
    pub commands: Vec<PaintCommand>,
}

impl DisplayList {
    /// All text runs, top to bottom. Handy for asserting on content.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            PaintCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    pub fn has_image(&self) -> bool {
        self.commands.iter().any(|c| matches!(c, PaintCommand::Image { .. }))
    }
}

/// Extra space between wrapped lines at text scale 1.
pub const PARAGRAPH_LEADING: u32 = 4;

pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH_ADVANCE * scale
}

pub fn line_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale
}

/// Largest scale <= `preferred` at which `text` fits in `max_width` (never below 1).
pub fn fit_scale(text: &str, max_width: u32, preferred: u32) -> u32 {
    (1..=preferred.max(1))
        .rev()
        .find(|s| text_width(text, *s) <= max_width)
        .unwrap_or(1)
}

/// Greedy word wrap to `max_width` logical pixels. Words longer than a line
/// are left whole.
pub fn wrap_text(text: &str, max_width: u32, scale: u32) -> Vec<String> {
    let cell = (GLYPH_ADVANCE * scale.max(1)).max(1);
    let chars_per_line = ((max_width / cell) as usize).max(1);
    let mut lines = Vec::new();
    let mut cur = String::new();
    let mut cur_len = 0usize;
    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if cur_len + word_len + 1 > chars_per_line && !cur.is_empty() {
            lines.push(std::mem::take(&mut cur));
            cur_len = 0;
        }
        if !cur.is_empty() {
            cur.push(' ');
            cur_len += 1;
        }
        cur.push_str(word);
        cur_len += word_len;
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    lines
}

/// Accumulates paint commands for one document.
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    width: u32,
    commands: Vec<PaintCommand>,
}

impl LayoutBuilder {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.commands.push(PaintCommand::SolidRect { rect, color });
    }

    pub fn stroke(&mut self, rect: Rect, width: u32, color: Color) {
        self.commands.push(PaintCommand::StrokeRect { rect, width, color });
    }

    pub fn disc(&mut self, rect: Rect, color: Color) {
        self.commands.push(PaintCommand::Ellipse { rect, color });
    }

    pub fn hline(&mut self, x: i32, y: i32, width: u32, thickness: u32, color: Color) {
        self.fill(Rect::new(x, y, width, thickness), color);
    }

    pub fn image(&mut self, rect: Rect, image: &EmbeddedImage, fit: ImageFit) {
        self.commands.push(PaintCommand::Image {
            rect,
            image: image.clone(),
            fit,
        });
    }

    /// Text with its top-left corner at (x, y). Empty strings paint nothing.
    pub fn text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Color) {
        if text.is_empty() {
            return;
        }
        self.commands.push(PaintCommand::Text {
            x,
            y,
            text: text.to_string(),
            scale,
            color,
        });
    }

    /// Text centred horizontally inside `[x, x + width)`.
    pub fn text_centered(&mut self, x: i32, width: u32, y: i32, text: &str, scale: u32, color: Color) {
        let w = text_width(text, scale);
        let left = x + (width.saturating_sub(w) / 2) as i32;
        self.text(left, y, text, scale, color);
    }

    /// Text whose right edge sits at `right`.
    pub fn text_right(&mut self, right: i32, y: i32, text: &str, scale: u32, color: Color) {
        let w = text_width(text, scale) as i32;
        self.text(right - w, y, text, scale, color);
    }

    /// Wrapped paragraph; returns the y just below the last line.
    pub fn paragraph(&mut self, x: i32, y: i32, max_width: u32, text: &str, scale: u32, color: Color) -> i32 {
        let mut y = y;
        for line in wrap_text(text, max_width, scale) {
            self.text(x, y, &line, scale, color);
            y += (line_height(scale) + PARAGRAPH_LEADING * scale) as i32;
        }
        y
    }

    pub fn finish(self, height: u32) -> DisplayList {
        DisplayList {
            extent: Extent {
                width: self.width,
                height,
            },
            commands: self.commands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("Hello world this is a wrapped paragraph", 60, 1);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 1) <= 60 || !line.contains(' '), "{line}");
        }
        assert_eq!(lines.join(" "), "Hello world this is a wrapped paragraph");
    }

    #[test]
    fn wrap_empty_is_empty() {
        assert!(wrap_text("   ", 100, 1).is_empty());
    }

    #[test]
    fn fit_scale_shrinks_long_text() {
        assert_eq!(fit_scale("MIT", 200, 3), 3);
        let long = "Massachusetts Institute of Technology";
        assert_eq!(fit_scale(long, 300, 3), 1);
        assert_eq!(fit_scale(long, 10, 3), 1);
    }

    #[test]
    fn builder_centres_text() {
        let mut b = LayoutBuilder::new(100);
        b.text_centered(0, 100, 0, "ab", 1, Color::BLACK);
        b.text(0, 0, "", 1, Color::BLACK);
        let list = b.finish(20);
        assert_eq!(list.commands.len(), 1);
        match &list.commands[0] {
            PaintCommand::Text { x, .. } => assert_eq!(*x, 44),
            _ => panic!("unexpected"),
        }
        assert!(list.contains_text("ab"));
        assert_eq!(list.extent.area(), 2000);
    }
}
