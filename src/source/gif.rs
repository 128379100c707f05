use std::io::{Cursor, Read};

use crate::foundation::core::{Palette, Region, Size};
use crate::foundation::error::{AnimError, AnimResult};
use crate::source::frame::{Frame, FrameSource, PixelData};

/// Frame source over a GIF stream, yielding each stored frame without compositing.
///
/// Frames come out palette-indexed with their own rectangle, local color table and
/// transparent index, exactly as stored in the file.
pub struct GifFrameSource<R: Read> {
    decoder: gif::Decoder<R>,
    canvas: Size,
    global_palette: Option<Palette>,
    next_index: usize,
}

impl<'a> GifFrameSource<Cursor<&'a [u8]>> {
    /// Open an in-memory GIF.
    pub fn from_bytes(bytes: &'a [u8]) -> AnimResult<Self> {
        Self::new(Cursor::new(bytes))
    }
}

impl<R: Read> GifFrameSource<R> {
    /// Read the GIF header and global color table from `reader`.
    ///
    /// Logical screens larger than [`MAX_PIXEL_COUNT`](crate::MAX_PIXEL_COUNT) are rejected
    /// before any frame is read.
    pub fn new(reader: R) -> AnimResult<Self> {
        let mut opts = gif::DecodeOptions::new();
        opts.set_color_output(gif::ColorOutput::Indexed);
        let decoder = opts
            .read_info(reader)
            .map_err(|e| AnimError::decode(None, format!("read gif header: {e}")))?;

        let canvas = Size::new(u32::from(decoder.width()), u32::from(decoder.height()))
            .map_err(|_| {
                AnimError::decode(
                    None,
                    format!(
                        "gif logical screen is empty ({}x{})",
                        decoder.width(),
                        decoder.height()
                    ),
                )
            })?;
        canvas
            .check_pixel_limit()
            .map_err(|e| AnimError::decode(None, format!("gif logical screen: {e}")))?;
        let global_palette = decoder
            .global_palette()
            .map(Palette::from_rgb_bytes)
            .transpose()?;

        Ok(Self {
            decoder,
            canvas,
            global_palette,
            next_index: 0,
        })
    }

    /// Number of frames handed out so far.
    pub fn frames_read(&self) -> usize {
        self.next_index
    }
}

impl<R: Read> FrameSource for GifFrameSource<R> {
    fn canvas_size(&self) -> Size {
        self.canvas
    }

    fn global_palette(&self) -> Option<&Palette> {
        self.global_palette.as_ref()
    }

    fn next_frame(&mut self) -> AnimResult<Option<Frame>> {
        let idx = self.next_index;
        let Some(raw) = self
            .decoder
            .read_next_frame()
            .map_err(|e| AnimError::decode(Some(idx), e.to_string()))?
        else {
            return Ok(None);
        };

        let palette = raw
            .palette
            .as_deref()
            .map(Palette::from_rgb_bytes)
            .transpose()
            .map_err(|e| e.at_frame(idx))?;
        let frame = Frame {
            size: self.canvas,
            update_region: Region {
                x: u32::from(raw.left),
                y: u32::from(raw.top),
                width: u32::from(raw.width),
                height: u32::from(raw.height),
            },
            pixels: PixelData::Indexed {
                indices: raw.buffer.to_vec(),
                palette,
                transparent: raw.transparent,
            },
        };

        self.next_index += 1;
        Ok(Some(frame))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/gif.rs"]
mod tests;
