use crate::foundation::core::{Palette, Region, Size};
use crate::foundation::error::{AnimError, AnimResult};

/// Stored pixel data of a single frame, covering exactly its update region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PixelData {
    /// Row-major straight-alpha RGBA8.
    Rgba(Vec<u8>),
    /// Row-major palette indices.
    Indexed {
        /// One index per pixel.
        indices: Vec<u8>,
        /// Local color table; `None` means "inherit the animation's palette".
        palette: Option<Palette>,
        /// Index rendered fully transparent, if any.
        transparent: Option<u8>,
    },
}

/// One decoded animation frame.
///
/// `size` is the animation's overall canvas, `update_region` is the part of that canvas the
/// stored `pixels` represent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Overall canvas size of the animation.
    pub size: Size,
    /// Canvas rectangle covered by `pixels`.
    pub update_region: Region,
    /// Stored pixel data.
    pub pixels: PixelData,
}

impl Frame {
    /// RGBA frame covering `region`.
    pub fn rgba(size: Size, update_region: Region, data: Vec<u8>) -> Self {
        Self {
            size,
            update_region,
            pixels: PixelData::Rgba(data),
        }
    }

    /// RGBA frame covering the whole canvas.
    pub fn full_rgba(size: Size, data: Vec<u8>) -> Self {
        Self::rgba(size, Region::full(size), data)
    }

    /// Palette-indexed frame covering `region`.
    pub fn indexed(
        size: Size,
        update_region: Region,
        indices: Vec<u8>,
        palette: Option<Palette>,
        transparent: Option<u8>,
    ) -> Self {
        Self {
            size,
            update_region,
            pixels: PixelData::Indexed {
                indices,
                palette,
                transparent,
            },
        }
    }

    /// The frame's own color table, if it carries one.
    pub fn palette(&self) -> Option<&Palette> {
        match &self.pixels {
            PixelData::Indexed { palette, .. } => palette.as_ref(),
            PixelData::Rgba(_) => None,
        }
    }

    /// Check that the stored data length matches the update region.
    pub fn validate(&self) -> AnimResult<()> {
        let px = usize::try_from(self.update_region.pixel_count())
            .map_err(|_| AnimError::decode(None, "update region too large"))?;
        let (expected, actual) = match &self.pixels {
            PixelData::Rgba(data) => (
                px.checked_mul(4)
                    .ok_or_else(|| AnimError::decode(None, "update region too large"))?,
                data.len(),
            ),
            PixelData::Indexed { indices, .. } => (px, indices.len()),
        };
        if expected != actual {
            return Err(AnimError::decode(
                None,
                format!(
                    "pixel data holds {actual} bytes, {}x{} region needs {expected}",
                    self.update_region.width, self.update_region.height
                ),
            ));
        }
        Ok(())
    }
}

/// Forward-only, single-pass producer of decoded frames.
///
/// `Ok(None)` signals normal exhaustion; `Err` is reserved for malformed data. A second pass
/// over the same animation needs a second source (re-open or re-decode).
pub trait FrameSource {
    /// Overall canvas size declared by the container.
    fn canvas_size(&self) -> Size;

    /// Animation-wide palette inherited by frames without their own.
    fn global_palette(&self) -> Option<&Palette>;

    /// Pull the next frame.
    fn next_frame(&mut self) -> AnimResult<Option<Frame>>;
}

impl<S: FrameSource + ?Sized> FrameSource for &mut S {
    fn canvas_size(&self) -> Size {
        (**self).canvas_size()
    }

    fn global_palette(&self) -> Option<&Palette> {
        (**self).global_palette()
    }

    fn next_frame(&mut self) -> AnimResult<Option<Frame>> {
        (**self).next_frame()
    }
}

/// Owned in-memory frame source over already-decoded frames.
#[derive(Clone, Debug)]
pub struct FrameSeq {
    canvas: Size,
    global_palette: Option<Palette>,
    frames: std::vec::IntoIter<Frame>,
}

impl FrameSeq {
    /// Source yielding `frames` in order.
    pub fn new(canvas: Size, frames: Vec<Frame>) -> Self {
        Self {
            canvas,
            global_palette: None,
            frames: frames.into_iter(),
        }
    }

    /// Attach an animation-wide palette.
    pub fn with_global_palette(mut self, palette: Palette) -> Self {
        self.global_palette = Some(palette);
        self
    }
}

impl FrameSource for FrameSeq {
    fn canvas_size(&self) -> Size {
        self.canvas
    }

    fn global_palette(&self) -> Option<&Palette> {
        self.global_palette.as_ref()
    }

    fn next_frame(&mut self) -> AnimResult<Option<Frame>> {
        Ok(self.frames.next())
    }
}

/// Borrowing frame source; every pass over the same slice is independent.
#[derive(Clone, Debug)]
pub struct FrameSlice<'a> {
    canvas: Size,
    global_palette: Option<&'a Palette>,
    frames: std::slice::Iter<'a, Frame>,
}

impl<'a> FrameSlice<'a> {
    /// Source yielding clones of `frames` in order.
    pub fn new(canvas: Size, frames: &'a [Frame], global_palette: Option<&'a Palette>) -> Self {
        Self {
            canvas,
            global_palette,
            frames: frames.iter(),
        }
    }
}

impl FrameSource for FrameSlice<'_> {
    fn canvas_size(&self) -> Size {
        self.canvas
    }

    fn global_palette(&self) -> Option<&Palette> {
        self.global_palette
    }

    fn next_frame(&mut self) -> AnimResult<Option<Frame>> {
        Ok(self.frames.next().cloned())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/frame.rs"]
mod tests;
