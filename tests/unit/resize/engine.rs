use super::*;
use crate::foundation::core::Region;
use crate::source::frame::{Frame, FrameSeq};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];

fn canvas() -> Size {
    Size::new(4, 4).unwrap()
}

fn solid_full(px: [u8; 4]) -> Frame {
    Frame::full_rgba(canvas(), px.repeat(16))
}

fn solid_patch(x: u32, y: u32, w: u32, h: u32, px: [u8; 4]) -> Frame {
    Frame::rgba(
        canvas(),
        Region {
            x,
            y,
            width: w,
            height: h,
        },
        px.repeat((w * h) as usize),
    )
}

fn all_pixels(f: &ResizedFrame, px: [u8; 4]) -> bool {
    f.data.chunks_exact(4).all(|p| p == px)
}

/// Counts pulls so tests can assert nothing was consumed.
struct Counting {
    inner: FrameSeq,
    pulls: usize,
}

impl FrameSource for Counting {
    fn canvas_size(&self) -> Size {
        self.inner.canvas_size()
    }

    fn global_palette(&self) -> Option<&Palette> {
        self.inner.global_palette()
    }

    fn next_frame(&mut self) -> AnimResult<Option<Frame>> {
        self.pulls += 1;
        self.inner.next_frame()
    }
}

#[test]
fn full_two_frames_downscale_red_then_blue() {
    let mut seq = FrameSeq::new(canvas(), vec![solid_full(RED), solid_full(BLUE)]);
    let out = resize_animation(&mut seq, AnimationMode::Full, 2, 2).unwrap();
    assert_eq!(out.len(), 2);
    assert!(out.iter().all(|f| (f.width, f.height) == (2, 2)));
    assert!(all_pixels(&out[0], RED));
    assert!(all_pixels(&out[1], BLUE));
}

#[test]
fn partial_patch_composites_over_previous_canvas() {
    let mut seq = FrameSeq::new(
        canvas(),
        vec![solid_full(RED), solid_patch(0, 0, 2, 2, BLUE)],
    );
    let out = resize_animation(&mut seq, AnimationMode::Partial, 4, 4).unwrap();
    assert_eq!(out.len(), 2);
    assert!(all_pixels(&out[0], RED));

    for y in 0..4 {
        for x in 0..4 {
            let expected = if x < 2 && y < 2 { BLUE } else { RED };
            assert_eq!(out[1].pixel(x, y), Some(expected), "pixel ({x},{y})");
        }
    }
}

#[test]
fn partial_pixels_keep_most_recent_writer() {
    let mut seq = FrameSeq::new(
        canvas(),
        vec![
            solid_full(RED),
            solid_patch(0, 0, 2, 2, BLUE),
            solid_patch(2, 2, 2, 2, GREEN),
            solid_patch(0, 0, 1, 1, GREEN),
        ],
    );
    let out = resize_animation(&mut seq, AnimationMode::Partial, 4, 4).unwrap();
    let last = &out[3];
    assert_eq!(last.pixel(0, 0), Some(GREEN));
    assert_eq!(last.pixel(1, 1), Some(BLUE));
    assert_eq!(last.pixel(3, 3), Some(GREEN));
    assert_eq!(last.pixel(3, 0), Some(RED));

    // Emitted snapshots are not touched by later frames.
    assert_eq!(out[1].pixel(0, 0), Some(BLUE));
    assert_eq!(out[1].pixel(3, 3), Some(RED));
}

#[test]
fn full_mode_frames_do_not_leak_into_each_other() {
    let frames = vec![solid_full(RED), solid_patch(0, 0, 2, 2, BLUE), solid_full(GREEN)];
    let base = resize_animation(
        &mut FrameSeq::new(canvas(), frames.clone()),
        AnimationMode::Full,
        4,
        4,
    )
    .unwrap();

    // Patch frame on its own: transparent outside the region, nothing from frame 0.
    assert_eq!(base[1].pixel(3, 3), Some([0, 0, 0, 0]));

    let mut zeroed = frames;
    zeroed[0] = Frame::full_rgba(canvas(), vec![0; 64]);
    let changed = resize_animation(
        &mut FrameSeq::new(canvas(), zeroed),
        AnimationMode::Full,
        4,
        4,
    )
    .unwrap();
    assert_ne!(base[0], changed[0]);
    assert_eq!(base[1], changed[1]);
    assert_eq!(base[2], changed[2]);
}

#[test]
fn frame_count_and_size_invariants() {
    for n in [0usize, 1, 3] {
        for mode in [AnimationMode::Full, AnimationMode::Partial] {
            for (w, h) in [(1, 1), (3, 5), (9, 8)] {
                let frames = (0..n)
                    .map(|i| {
                        if i % 2 == 0 {
                            solid_full(RED)
                        } else {
                            solid_patch(1, 1, 2, 3, BLUE)
                        }
                    })
                    .collect();
                let mut seq = FrameSeq::new(canvas(), frames);
                let out = resize_animation(&mut seq, mode, w, h).unwrap();
                assert_eq!(out.len(), n);
                for f in &out {
                    assert_eq!((f.width, f.height), (w, h));
                    assert_eq!(f.data.len(), (w * h * 4) as usize);
                }
            }
        }
    }
}

#[test]
fn zero_frames_is_empty_not_error() {
    let mut seq = FrameSeq::new(canvas(), vec![]);
    let out = resize_animation(&mut seq, AnimationMode::Partial, 8, 8).unwrap();
    assert!(out.is_empty());
}

#[test]
fn zero_target_rejected_before_pulling_frames() {
    let mut src = Counting {
        inner: FrameSeq::new(canvas(), vec![solid_full(RED)]),
        pulls: 0,
    };
    let err = resize_animation(&mut src, AnimationMode::Full, 0, 4).unwrap_err();
    assert!(matches!(err, AnimError::InvalidParameters(_)));
    assert_eq!(src.pulls, 0);

    assert!(resize_animation(&mut src, AnimationMode::Full, 4, 0).is_err());
    assert_eq!(src.pulls, 0);
}

#[test]
fn runs_are_byte_identical() {
    let mut gradient = Vec::with_capacity(64);
    for i in 0..16u8 {
        gradient.extend_from_slice(&[i * 16, 255 - i * 16, i * 7, 255]);
    }
    let frames = vec![
        Frame::full_rgba(canvas(), gradient),
        solid_patch(1, 0, 3, 2, [10, 20, 30, 128]),
    ];
    let run = |frames: Vec<Frame>| {
        resize_animation(
            &mut FrameSeq::new(canvas(), frames),
            AnimationMode::Partial,
            3,
            7,
        )
        .unwrap()
    };
    assert_eq!(run(frames.clone()), run(frames));
}

#[test]
fn palette_carries_forward_and_updates() {
    let global = Palette::from_rgb_bytes(&[255, 0, 0]).unwrap();
    let local = Palette::from_rgb_bytes(&[0, 0, 255]).unwrap();
    let full = Region::full(canvas());
    let frames = vec![
        Frame::indexed(canvas(), full, vec![0; 16], None, None),
        Frame::indexed(canvas(), full, vec![0; 16], Some(local), None),
        Frame::indexed(canvas(), full, vec![0; 16], None, None),
    ];
    let mut seq = FrameSeq::new(canvas(), frames).with_global_palette(global);
    let out = resize_animation(&mut seq, AnimationMode::Full, 2, 2).unwrap();
    assert!(all_pixels(&out[0], RED));
    assert!(all_pixels(&out[1], BLUE));
    assert!(all_pixels(&out[2], BLUE));
}

#[test]
fn malformed_frame_aborts_with_index() {
    let frames = vec![
        solid_full(RED),
        Frame::full_rgba(canvas(), vec![0; 10]),
        solid_full(BLUE),
    ];
    let mut seq = FrameSeq::new(canvas(), frames);
    let err = resize_animation(&mut seq, AnimationMode::Full, 2, 2).unwrap_err();
    assert!(matches!(err, AnimError::Decode { frame: Some(1), .. }));
}

struct Broken;

impl Resampler for Broken {
    fn fit(&self, _src: &RgbaImage, _w: u32, _h: u32) -> AnimResult<RgbaImage> {
        Err(AnimError::resampling(None, "out of memory"))
    }
}

struct WrongSize;

impl Resampler for WrongSize {
    fn fit(&self, _src: &RgbaImage, w: u32, h: u32) -> AnimResult<RgbaImage> {
        Ok(RgbaImage::new(w + 1, h))
    }
}

#[test]
fn resampler_failures_propagate_with_index() {
    let settings = ResizeSettings::new(2, 2);
    let mut seq = FrameSeq::new(canvas(), vec![solid_full(RED)]);
    let err = resize_animation_with(&mut seq, AnimationMode::Full, &settings, &Broken)
        .unwrap_err();
    assert!(matches!(err, AnimError::Resampling { frame: Some(0), .. }));

    let mut seq = FrameSeq::new(canvas(), vec![solid_full(RED)]);
    let err = resize_animation_with(&mut seq, AnimationMode::Partial, &settings, &WrongSize)
        .unwrap_err();
    assert!(matches!(err, AnimError::Resampling { frame: Some(0), .. }));
}

#[test]
fn settings_json_and_validation() {
    let s = ResizeSettings::from_json(r#"{"width": 32, "height": 16}"#).unwrap();
    assert_eq!(s, ResizeSettings::new(32, 16));
    assert!(ResizeSettings::from_json(r#"{"width": 0, "height": 16}"#).is_err());
    assert!(ResizeSettings::from_json("{").is_err());
}

#[test]
fn resized_frame_accessors() {
    let f = ResizedFrame {
        width: 1,
        height: 1,
        data: RED.to_vec(),
    };
    assert_eq!(f.pixel(0, 0), Some(RED));
    assert_eq!(f.pixel(1, 0), None);
    assert_eq!(f.to_image().unwrap().get_pixel(0, 0).0, RED);
}

#[test]
fn partial_patch_matches_same_picture_as_full_frame() {
    let big = Size::new(8, 8).unwrap();
    let red = Frame::full_rgba(big, RED.repeat(64));
    let patch = Frame::rgba(
        big,
        Region {
            x: 0,
            y: 0,
            width: 4,
            height: 4,
        },
        BLUE.repeat(16),
    );
    let mut flat = Vec::with_capacity(64 * 4);
    for y in 0..8 {
        for x in 0..8 {
            flat.extend_from_slice(if x < 4 && y < 4 { &BLUE } else { &RED });
        }
    }

    let partial = resize_animation(
        &mut FrameSeq::new(big, vec![red, patch]),
        AnimationMode::Partial,
        4,
        4,
    )
    .unwrap();
    let full = resize_animation(
        &mut FrameSeq::new(big, vec![Frame::full_rgba(big, flat)]),
        AnimationMode::Full,
        4,
        4,
    )
    .unwrap();

    for (i, (a, b)) in partial[1].data.iter().zip(&full[0].data).enumerate() {
        assert!(
            a.abs_diff(*b) <= 1,
            "byte {i} (pixel {}): {a} vs {b}",
            i / 4
        );
    }
}

#[test]
fn oversized_target_is_invalid() {
    let err = ResizeSettings::new(100_000, 100_000).validate().unwrap_err();
    assert!(matches!(err, AnimError::InvalidParameters(_)));

    let mut seq = FrameSeq::new(canvas(), vec![solid_full(RED)]);
    let err = resize_animation(&mut seq, AnimationMode::Full, 20_000, 20_000).unwrap_err();
    assert!(matches!(err, AnimError::InvalidParameters(_)));
}
