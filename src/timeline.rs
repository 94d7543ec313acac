use std::path::PathBuf;

use crate::{
    compose::Slide,
    error::{SlidereelError, SlidereelResult},
    model::Resolution,
};

/// Gapless, ordered sequence of slides with cumulative start times.
#[derive(Clone, Debug)]
pub struct Timeline {
    slides: Vec<Slide>,
    /// Start time of slide `i` in seconds; `starts_s[0] == 0.0`.
    starts_s: Vec<f64>,
}

impl Timeline {
    /// Concatenate slides in input order, no gaps, no overlaps.
    ///
    /// The caller is expected to have rejected an empty image directory long
    /// before this point; an empty sequence here still fails rather than
    /// producing a zero-length timeline.
    pub fn assemble(slides: Vec<Slide>) -> SlidereelResult<Self> {
        if slides.is_empty() {
            return Err(SlidereelError::empty_input(
                "timeline requires at least one slide",
            ));
        }

        let mut starts_s = Vec::with_capacity(slides.len());
        let mut t = 0.0f64;
        for slide in &slides {
            if !(slide.duration_s.is_finite() && slide.duration_s > 0.0) {
                return Err(SlidereelError::invalid_argument(format!(
                    "slide '{}' has non-positive duration {}",
                    slide.source.display(),
                    slide.duration_s
                )));
            }
            starts_s.push(t);
            t += slide.duration_s;
        }

        Ok(Self { slides, starts_s })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        // assemble rejects empty input, but keep the standard pairing.
        self.slides.is_empty()
    }

    pub fn start_s(&self, index: usize) -> f64 {
        self.starts_s[index]
    }

    pub fn total_duration_s(&self) -> f64 {
        match (self.starts_s.last(), self.slides.last()) {
            (Some(start), Some(slide)) => start + slide.duration_s,
            _ => 0.0,
        }
    }

    /// Video frames per slide at `fps`, from rounded cumulative boundaries.
    ///
    /// `counts[i] = round(end_i * fps) - round(start_i * fps)`, so the sum is
    /// exactly `round(total * fps)` and rounding error never accumulates
    /// across slides.
    pub fn frame_counts(&self, fps: u32) -> Vec<u64> {
        let fps = f64::from(fps);
        let mut counts = Vec::with_capacity(self.slides.len());
        let mut prev_boundary = 0u64;
        let mut t = 0.0f64;
        for slide in &self.slides {
            t += slide.duration_s;
            let boundary = (t * fps).round() as u64;
            counts.push(boundary.saturating_sub(prev_boundary));
            prev_boundary = boundary;
        }
        counts
    }

    pub fn total_frames(&self, fps: u32) -> u64 {
        (self.total_duration_s() * f64::from(fps)).round() as u64
    }

    /// Summary of the timeline for `--dump-timeline`.
    pub fn manifest(&self, resolution: Resolution, fps: u32) -> TimelineManifest {
        TimelineManifest {
            resolution,
            fps,
            total_duration_s: self.total_duration_s(),
            total_frames: self.total_frames(fps),
            slides: self
                .slides
                .iter()
                .enumerate()
                .map(|(i, slide)| ManifestSlide {
                    source: slide.source.clone(),
                    start_s: self.starts_s[i],
                    duration_s: slide.duration_s,
                })
                .collect(),
        }
    }
}

/// JSON-serializable description of an assembled timeline (no pixel data).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimelineManifest {
    pub resolution: Resolution,
    pub fps: u32,
    pub total_duration_s: f64,
    pub total_frames: u64,
    pub slides: Vec<ManifestSlide>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ManifestSlide {
    pub source: PathBuf,
    pub start_s: f64,
    pub duration_s: f64,
}
