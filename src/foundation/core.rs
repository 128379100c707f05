use crate::foundation::error::{AnimError, AnimResult};

/// Largest pixel area accepted for any canvas, target or intermediate image.
///
/// Matches the point at which Pillow refuses an image as a decompression bomb.
pub const MAX_PIXEL_COUNT: u64 = 178_956_970;

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Build a size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> AnimResult<Self> {
        if width == 0 || height == 0 {
            return Err(AnimError::invalid(format!(
                "size must be positive, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of pixels.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Reject sizes whose pixel area exceeds [`MAX_PIXEL_COUNT`].
    pub fn check_pixel_limit(self) -> AnimResult<()> {
        if self.pixel_count() > MAX_PIXEL_COUNT {
            return Err(AnimError::invalid(format!(
                "{}x{} exceeds the pixel limit of {MAX_PIXEL_COUNT}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Byte length of an RGBA8 buffer of this size.
    pub fn rgba_len(self) -> AnimResult<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| {
                AnimError::invalid(format!(
                    "rgba buffer size overflow for {}x{}",
                    self.width, self.height
                ))
            })
    }
}

/// Rectangle within an animation's canvas that a frame's stored data covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Region {
    /// Region spanning the whole canvas.
    pub fn full(size: Size) -> Self {
        Self {
            x: 0,
            y: 0,
            width: size.width,
            height: size.height,
        }
    }

    /// `(width, height)` of the region, ignoring its origin.
    pub fn dimensions(self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the region's dimensions equal the canvas dimensions.
    ///
    /// Only dimensions are compared; a canvas-sized region with a non-zero origin still counts.
    pub fn covers(self, size: Size) -> bool {
        self.dimensions() == (size.width, size.height)
    }

    /// Intersection with `[0, size)`; `None` when nothing of the region is on-canvas.
    pub fn clip_to(self, size: Size) -> Option<Self> {
        let x0 = self.x.min(size.width);
        let y0 = self.y.min(size.height);
        let x1 = self.x.saturating_add(self.width).min(size.width);
        let y1 = self.y.saturating_add(self.height).min(size.height);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    /// Number of pixels stored for this region.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// RGB color table used by palette-indexed frames.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    /// Colors, indexed by palette index.
    pub colors: Vec<[u8; 3]>,
}

impl Palette {
    /// Build a palette from packed `r,g,b,r,g,b,...` bytes.
    pub fn from_rgb_bytes(bytes: &[u8]) -> AnimResult<Self> {
        if !bytes.len().is_multiple_of(3) {
            return Err(AnimError::decode(
                None,
                format!("palette length {} is not a multiple of 3", bytes.len()),
            ));
        }
        let colors = bytes
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect();
        Ok(Self { colors })
    }

    /// Color at `index`, if the table has one.
    pub fn lookup(&self, index: u8) -> Option<[u8; 3]> {
        self.colors.get(usize::from(index)).copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
