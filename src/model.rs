use std::{path::PathBuf, str::FromStr};

use crate::error::{SlidereelError, SlidereelResult};

/// Output frame size in pixels. Both dimensions must be > 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> SlidereelResult<Self> {
        if width == 0 || height == 0 {
            return Err(SlidereelError::usage(
                "resolution width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_bytes(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl FromStr for Resolution {
    type Err = SlidereelError;

    /// Parse a `<width>x<height>` string (the `x` is case-insensitive).
    fn from_str(s: &str) -> SlidereelResult<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let (w, h) = lower.split_once('x').ok_or_else(|| {
            SlidereelError::usage(format!(
                "resolution must be WIDTHxHEIGHT, e.g. 1920x1080 (got '{s}')"
            ))
        })?;
        let width: u32 = w.parse().map_err(|_| {
            SlidereelError::usage(format!("resolution width '{w}' is not a positive integer"))
        })?;
        let height: u32 = h.parse().map_err(|_| {
            SlidereelError::usage(format!("resolution height '{h}' is not a positive integer"))
        })?;
        Self::new(width, height)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Geometric policy mapping a source image onto the output resolution.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Scale to cover the frame, cropping the overflow around the center.
    Crop,
    /// Scale to fit inside the frame, padding the shortfall with black bars.
    Fit,
    /// Scale each axis independently to fill the frame exactly.
    Stretch,
}

impl FromStr for FitMode {
    type Err = SlidereelError;

    // The CLI constrains --mode through ValueEnum; this is the library-level
    // entry point for callers holding a raw string.
    fn from_str(s: &str) -> SlidereelResult<Self> {
        match s {
            "crop" => Ok(Self::Crop),
            "fit" => Ok(Self::Fit),
            "stretch" => Ok(Self::Stretch),
            other => Err(SlidereelError::invalid_argument(format!(
                "fit mode must be one of crop, fit, stretch (got '{other}')"
            ))),
        }
    }
}

impl std::fmt::Display for FitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Crop => "crop",
            Self::Fit => "fit",
            Self::Stretch => "stretch",
        };
        f.write_str(s)
    }
}

/// 0-based index into the encoded video's frame sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Opaque straight-alpha RGBA8 pixels, row-major, `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Solid-color frame (used for the letterbox canvas).
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }
}

/// A validated slideshow job: everything needed to go from a directory of
/// images to an encoded video file.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SlideshowSpec {
    pub input_dir: PathBuf,
    pub out_path: PathBuf,
    pub codec: String,
    pub resolution: Resolution,
    pub mode: FitMode,
    /// Seconds each image stays on screen.
    pub duration_s: f64,
    pub fps: u32,
}

impl SlideshowSpec {
    pub fn validate(&self) -> SlidereelResult<()> {
        if self.resolution.width == 0 || self.resolution.height == 0 {
            return Err(SlidereelError::usage(
                "resolution width/height must be > 0",
            ));
        }
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            return Err(SlidereelError::usage(format!(
                "duration must be a positive number of seconds (got {})",
                self.duration_s
            )));
        }
        if self.fps == 0 {
            return Err(SlidereelError::usage("fps must be > 0"));
        }
        if self.codec.trim().is_empty() {
            return Err(SlidereelError::usage("codec must be non-empty"));
        }
        Ok(())
    }
}
