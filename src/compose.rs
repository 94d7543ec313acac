use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{RgbaImage, imageops};

use crate::{
    error::{SlidereelError, SlidereelResult},
    model::{FitMode, FrameRGBA, Resolution},
};

/// One composed slideshow entry: a frame of exactly the target resolution
/// plus the time it stays on screen.
#[derive(Clone, Debug)]
pub struct Slide {
    pub source: PathBuf,
    pub frame: FrameRGBA,
    pub duration_s: f64,
}

/// How a source image maps onto the output canvas: the size to resize to,
/// the crop window inside the resized image, and where the result lands on
/// the canvas. Exactly one of crop/offset is non-trivial per mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub scaled_w: u32,
    pub scaled_h: u32,
    pub crop_x: u32,
    pub crop_y: u32,
    pub dst_x: u32,
    pub dst_y: u32,
}

pub fn decode_image(path: &Path) -> SlidereelResult<RgbaImage> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

/// Compute the geometry for mapping a `(w, h)` source onto `target`.
pub fn placement(
    mode: FitMode,
    (w, h): (u32, u32),
    target: Resolution,
) -> SlidereelResult<Placement> {
    if w == 0 || h == 0 {
        return Err(SlidereelError::invalid_argument(
            "source image has a zero dimension",
        ));
    }
    let (tw, th) = (target.width, target.height);

    let pl = match mode {
        FitMode::Stretch => Placement {
            scaled_w: tw,
            scaled_h: th,
            crop_x: 0,
            crop_y: 0,
            dst_x: 0,
            dst_y: 0,
        },
        FitMode::Fit => {
            // Branch on W/w < H/h (in integer form), matching the reference
            // behavior. Equal ratios take the scale-to-height branch; both
            // branches land on the same size in that case.
            let (scaled_w, scaled_h) = if (tw as u64) * (h as u64) < (th as u64) * (w as u64) {
                let scaled_h = scale_round(h, tw, w).clamp(1, th);
                (tw, scaled_h)
            } else {
                let scaled_w = scale_round(w, th, h).clamp(1, tw);
                (scaled_w, th)
            };
            Placement {
                scaled_w,
                scaled_h,
                crop_x: 0,
                crop_y: 0,
                dst_x: (tw - scaled_w) / 2,
                dst_y: (th - scaled_h) / 2,
            }
        }
        FitMode::Crop => {
            let scale = (f64::from(tw) / f64::from(w)).max(f64::from(th) / f64::from(h));
            let scaled_w = ((f64::from(w) * scale).round() as u32).max(tw);
            let scaled_h = ((f64::from(h) * scale).round() as u32).max(th);
            Placement {
                scaled_w,
                scaled_h,
                // Centered; for odd remainders the extra pixel stays on the
                // far edge.
                crop_x: (scaled_w - tw) / 2,
                crop_y: (scaled_h - th) / 2,
                dst_x: 0,
                dst_y: 0,
            }
        }
    };
    Ok(pl)
}

/// `base * num / den`, rounded to nearest.
fn scale_round(base: u32, num: u32, den: u32) -> u32 {
    ((f64::from(base) * f64::from(num)) / f64::from(den)).round() as u32
}

/// Compose one image into a fixed-size, fixed-duration slide.
///
/// The returned frame is exactly `resolution` pixels, fully opaque; any
/// source alpha and any `fit` shortfall resolve against a black canvas.
pub fn compose(
    source: impl Into<PathBuf>,
    image: &RgbaImage,
    resolution: Resolution,
    mode: FitMode,
    duration_s: f64,
) -> SlidereelResult<Slide> {
    if !(duration_s.is_finite() && duration_s > 0.0) {
        return Err(SlidereelError::invalid_argument(format!(
            "slide duration must be a positive number of seconds (got {duration_s})"
        )));
    }

    let (w, h) = image.dimensions();
    let pl = placement(mode, (w, h), resolution)?;

    let resized;
    let scaled: &RgbaImage = if (pl.scaled_w, pl.scaled_h) == (w, h) {
        image
    } else {
        resized = imageops::resize(image, pl.scaled_w, pl.scaled_h, imageops::FilterType::Triangle);
        &resized
    };

    let mut frame = FrameRGBA::solid(resolution.width, resolution.height, [0, 0, 0, 255]);
    blit_over(&mut frame, scaled, pl);

    Ok(Slide {
        source: source.into(),
        frame,
        duration_s,
    })
}

/// Copy the `pl` crop window of `src` onto `frame` at the `pl` offset,
/// blending straight-alpha pixels over the opaque canvas.
fn blit_over(frame: &mut FrameRGBA, src: &RgbaImage, pl: Placement) {
    let copy_w = (pl.scaled_w - pl.crop_x).min(frame.width - pl.dst_x) as usize;
    let copy_h = (pl.scaled_h - pl.crop_y).min(frame.height - pl.dst_y) as usize;
    let src_stride = pl.scaled_w as usize * 4;
    let dst_stride = frame.width as usize * 4;
    let src_data = src.as_raw();

    for y in 0..copy_h {
        let src_off = (pl.crop_y as usize + y) * src_stride + pl.crop_x as usize * 4;
        let dst_off = (pl.dst_y as usize + y) * dst_stride + pl.dst_x as usize * 4;
        let src_row = &src_data[src_off..src_off + copy_w * 4];
        let dst_row = &mut frame.data[dst_off..dst_off + copy_w * 4];

        for (d, s) in dst_row.chunks_exact_mut(4).zip(src_row.chunks_exact(4)) {
            let a = u16::from(s[3]);
            if a == 255 {
                d.copy_from_slice(s);
                continue;
            }
            if a == 0 {
                continue;
            }
            let inv = 255u16 - a;
            d[0] = (mul_div255(u16::from(s[0]), a) + mul_div255(u16::from(d[0]), inv)).min(255)
                as u8;
            d[1] = (mul_div255(u16::from(s[1]), a) + mul_div255(u16::from(d[1]), inv)).min(255)
                as u8;
            d[2] = (mul_div255(u16::from(s[2]), a) + mul_div255(u16::from(d[2]), inv)).min(255)
                as u8;
            d[3] = 255;
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}
