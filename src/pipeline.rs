use crate::{
    compose::{compose, decode_image},
    discover::discover_images,
    encode_ffmpeg::{FrameSink, SinkConfig},
    error::SlidereelResult,
    model::{FrameIndex, SlideshowSpec},
    timeline::Timeline,
};

/// Counters for one completed render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub slides: u64,
    pub frames_written: u64,
}

/// Discover, decode, and compose every image of the spec into a timeline.
///
/// Images are processed sequentially in slideshow order.
pub fn assemble_timeline(spec: &SlideshowSpec) -> SlidereelResult<Timeline> {
    spec.validate()?;
    let images = discover_images(&spec.input_dir)?;

    let mut slides = Vec::with_capacity(images.len());
    for path in images {
        tracing::info!(path = %path.display(), mode = %spec.mode, "composing slide");
        let image = decode_image(&path)?;
        slides.push(compose(
            path,
            &image,
            spec.resolution,
            spec.mode,
            spec.duration_s,
        )?);
    }

    Timeline::assemble(slides)
}

/// Stream an assembled timeline into a sink, one video frame at a time.
///
/// Each slide's frame is repeated for its share of the rounded cumulative
/// frame boundaries, so the written frame count matches the timeline total.
pub fn stream_timeline(
    timeline: &Timeline,
    fps: u32,
    sink: &mut dyn FrameSink,
) -> SlidereelResult<RenderStats> {
    let first = &timeline.slides()[0].frame;
    sink.begin(SinkConfig {
        width: first.width,
        height: first.height,
        fps,
    })?;

    let counts = timeline.frame_counts(fps);
    let mut stats = RenderStats::default();
    let mut idx = 0u64;
    for (slide, count) in timeline.slides().iter().zip(counts) {
        tracing::debug!(
            source = %slide.source.display(),
            frames = count,
            "encoding slide"
        );
        for _ in 0..count {
            sink.push_frame(FrameIndex(idx), &slide.frame)?;
            idx += 1;
        }
        stats.slides += 1;
        stats.frames_written += count;
    }

    sink.end()?;
    tracing::info!(
        slides = stats.slides,
        frames = stats.frames_written,
        duration_s = timeline.total_duration_s(),
        "render complete"
    );
    Ok(stats)
}

/// One-shot pipeline: directory of images in, encoded video out.
pub fn render_slideshow(
    spec: &SlideshowSpec,
    sink: &mut dyn FrameSink,
) -> SlidereelResult<RenderStats> {
    let timeline = assemble_timeline(spec)?;
    stream_timeline(&timeline, spec.fps, sink)
}
