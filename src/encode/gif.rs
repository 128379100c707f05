use crate::foundation::error::{AnimError, AnimResult};
use crate::resize::engine::ResizedFrame;

/// Options for [`encode_gif`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifEncodeSettings {
    /// Quantizer speed, 1 (best) ..= 30 (fastest).
    pub speed: i32,
    /// Loop forever instead of playing once.
    pub repeat_infinite: bool,
}

impl Default for GifEncodeSettings {
    fn default() -> Self {
        Self {
            speed: 10,
            repeat_infinite: true,
        }
    }
}

/// Serialize resized frames as an animated GIF.
///
/// Every frame must be exactly `width x height`. Frames are quantized independently; fully
/// transparent pixels stay transparent. Frame delays are left at zero.
#[tracing::instrument(skip(frames, settings), fields(frames = frames.len()))]
pub fn encode_gif(
    frames: &[ResizedFrame],
    width: u32,
    height: u32,
    settings: &GifEncodeSettings,
) -> AnimResult<Vec<u8>> {
    if !(1..=30).contains(&settings.speed) {
        return Err(AnimError::invalid(format!(
            "gif quantizer speed must be in 1..=30, got {}",
            settings.speed
        )));
    }
    let w = gif_dim(width, "width")?;
    let h = gif_dim(height, "height")?;

    let mut buf = Vec::new();
    {
        let mut enc = gif::Encoder::new(&mut buf, w, h, &[])
            .map_err(|e| AnimError::encode(format!("write gif header: {e}")))?;
        if settings.repeat_infinite {
            enc.set_repeat(gif::Repeat::Infinite)
                .map_err(|e| AnimError::encode(format!("write gif loop extension: {e}")))?;
        }

        for (idx, f) in frames.iter().enumerate() {
            if (f.width, f.height) != (width, height) {
                return Err(AnimError::encode(format!(
                    "frame {idx} is {}x{}, expected {width}x{height}",
                    f.width, f.height
                )));
            }
            if f.data.len() != width as usize * height as usize * 4 {
                return Err(AnimError::encode(format!(
                    "frame {idx} holds {} bytes, expected {}",
                    f.data.len(),
                    width as usize * height as usize * 4
                )));
            }
            let mut rgba = f.data.clone();
            let frame = gif::Frame::from_rgba_speed(w, h, &mut rgba, settings.speed);
            enc.write_frame(&frame)
                .map_err(|e| AnimError::encode(format!("write gif frame {idx}: {e}")))?;
        }
    }

    tracing::debug!(bytes = buf.len(), "gif encoded");
    Ok(buf)
}

fn gif_dim(v: u32, what: &str) -> AnimResult<u16> {
    if v == 0 {
        return Err(AnimError::invalid(format!("gif {what} must be positive")));
    }
    u16::try_from(v).map_err(|_| AnimError::encode(format!("gif {what} {v} exceeds 65535")))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
