//! Paint command set and glyph sources

use crate::model::EmbeddedImage;
use crate::rendering::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const GRAY_50: Color = Color::rgb(249, 250, 251);
    pub const GRAY_200: Color = Color::rgb(229, 231, 235);
    pub const GRAY_300: Color = Color::rgb(209, 213, 219);
    pub const GRAY_400: Color = Color::rgb(156, 163, 175);
    pub const GRAY_500: Color = Color::rgb(107, 114, 128);
    pub const GRAY_600: Color = Color::rgb(75, 85, 99);
    pub const GRAY_700: Color = Color::rgb(55, 65, 81);
    pub const GRAY_900: Color = Color::rgb(17, 24, 39);
    pub const BLUE_50: Color = Color::rgb(239, 246, 255);
    pub const BLUE_200: Color = Color::rgb(191, 219, 254);
    pub const BLUE_400: Color = Color::rgb(96, 165, 250);
    pub const BLUE_600: Color = Color::rgb(37, 99, 235);
    pub const BLUE_700: Color = Color::rgb(29, 78, 216);
    pub const BLUE_800: Color = Color::rgb(30, 64, 175);
    pub const BLUE_900: Color = Color::rgb(30, 58, 138);
    pub const RED_600: Color = Color::rgb(220, 38, 38);
    pub const GREEN_700: Color = Color::rgb(21, 128, 61);
    pub const YELLOW_50: Color = Color::rgb(254, 252, 232);
    pub const YELLOW_200: Color = Color::rgb(254, 240, 138);
    pub const YELLOW_800: Color = Color::rgb(133, 77, 14);
}

/// How an embedded image is fitted into its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFit {
    /// Fill the box, cropping the overflow (photos)
    Cover,
    /// Fit inside the box, keeping the whole image visible (logos)
    Contain,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        rect: Rect,
        color: Color,
    },
    StrokeRect {
        rect: Rect,
        width: u32,
        color: Color,
    },
    /// Filled ellipse inscribed in `rect`
    Ellipse {
        rect: Rect,
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        scale: u32,
        color: Color,
    },
    Image {
        rect: Rect,
        image: EmbeddedImage,
        fit: ImageFit,
    },
}

/// Logical width of one glyph cell at text scale 1.
pub const GLYPH_ADVANCE: u32 = 6;
/// Logical height of one glyph cell at text scale 1.
pub const GLYPH_HEIGHT: u32 = 8;

/// One row bitmap per cell line; bit 5 is the leftmost column.
pub type GlyphRows = [u8; GLYPH_HEIGHT as usize];

/// Source of glyph bitmaps for the fixed 6x8 cell.
///
/// Real font loading lives outside this crate; hosts that have one can
/// rasterize it into cells and plug it in here.
pub trait GlyphSource: Send + Sync {
    /// `None` leaves the cell blank.
    fn glyph(&self, ch: char) -> Option<GlyphRows>;
}

/// Draws every visible character as a solid block shaped by its class
/// (capitals and digits full height, lowercase at x-height, small marks for
/// punctuation). Text stays legible in layout even without a font.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockGlyphs;

impl GlyphSource for BlockGlyphs {
    fn glyph(&self, ch: char) -> Option<GlyphRows> {
        const FULL: GlyphRows = [0x00, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x00];
        const LOWER: GlyphRows = [0x00, 0x00, 0x00, 0x1E, 0x1E, 0x1E, 0x1E, 0x00];
        const DOT: GlyphRows = [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C, 0x00];
        const DASH: GlyphRows = [0x00, 0x00, 0x00, 0x00, 0x1E, 0x00, 0x00, 0x00];
        const COLON: GlyphRows = [0x00, 0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00];

        match ch {
            c if c.is_whitespace() => None,
            c if c.is_lowercase() => Some(LOWER),
            '.' | ',' => Some(DOT),
            '-' | '_' | '~' => Some(DASH),
            ':' | ';' => Some(COLON),
            _ => Some(FULL),
        }
    }
}
