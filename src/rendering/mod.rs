//! Rendering: field-to-layout templates, display lists and the rasterizer
//!
//! Templates contain no business logic. They map record fields (and the
//! derived transcript fields) onto a fixed layout and substitute placeholder
//! text or shapes for optional fields that are absent.

pub mod admission;
pub mod id_card;
pub mod layout;
pub mod paint;
pub mod raster;
pub mod surface;
pub mod transcript;

pub use layout::{DisplayList, Extent, Rect};
pub use paint::{BlockGlyphs, Color, GlyphSource, PaintCommand};
pub use raster::Screenshot;
pub use surface::{CaptureTarget, PaintedFrame, RenderSurface};

use crate::model::{CardSide, Record};

/// A record that knows how to lay itself out for capture.
pub trait Render: Record {
    /// Whether the document has distinct front and back faces.
    const TWO_SIDED: bool = false;

    /// Lay out the given face. Single-sided documents ignore `side`.
    fn layout(&self, side: CardSide) -> DisplayList;
}
