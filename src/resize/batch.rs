use anyhow::Context;
use rayon::prelude::*;

use crate::analyze::mode::AnimationMode;
use crate::foundation::core::{Palette, Size};
use crate::foundation::error::{AnimError, AnimResult};
use crate::resize::engine::{ResizeSettings, ResizedFrame, resize_animation_with};
use crate::resize::resample::LanczosFit;
use crate::source::frame::{Frame, FrameSlice};

/// Threading configuration for [`resize_many`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BatchThreading {
    /// Run targets on a rayon pool instead of one after another.
    pub parallel: bool,
    /// Pool size; `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for BatchThreading {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

impl BatchThreading {
    /// Reject an explicit thread count of zero.
    pub fn validate(&self) -> AnimResult<()> {
        if let Some(n) = self.threads
            && n == 0
        {
            return Err(AnimError::invalid(
                "batch threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Already-decoded animation shared read-only by every target of a batch.
#[derive(Clone, Copy, Debug)]
pub struct DecodedAnimation<'a> {
    /// Overall canvas size.
    pub canvas: Size,
    /// Animation-wide palette, if any.
    pub global_palette: Option<&'a Palette>,
    /// Frames in display order.
    pub frames: &'a [Frame],
}

/// Resize one decoded animation to several targets.
///
/// Each target gets its own independent engine run over the shared frames, so there is no
/// coordination between runs. Results are in `targets` order; the first failure fails the
/// whole batch.
#[tracing::instrument(skip(anim, targets), fields(target_count = targets.len()))]
pub fn resize_many(
    anim: DecodedAnimation<'_>,
    mode: AnimationMode,
    targets: &[ResizeSettings],
    threading: &BatchThreading,
) -> AnimResult<Vec<Vec<ResizedFrame>>> {
    threading.validate()?;
    for t in targets {
        t.validate()?;
    }

    let run_one = |settings: &ResizeSettings| -> AnimResult<Vec<ResizedFrame>> {
        let mut source = FrameSlice::new(anim.canvas, anim.frames, anim.global_palette);
        resize_animation_with(&mut source, mode, settings, &LanczosFit)
    };

    if !threading.parallel || targets.len() < 2 {
        return targets.iter().map(&run_one).collect();
    }

    let pool = build_thread_pool(threading.threads)?;
    pool.install(|| targets.par_iter().map(&run_one).collect())
}

fn build_thread_pool(threads: Option<usize>) -> AnimResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    let pool = builder.build().context("build rayon thread pool")?;
    Ok(pool)
}

#[cfg(test)]
#[path = "../../tests/unit/resize/batch.rs"]
mod tests;
