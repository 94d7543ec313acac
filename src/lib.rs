#![forbid(unsafe_code)]

pub mod compose;
pub mod discover;
pub mod encode_ffmpeg;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod timeline;

pub use compose::{Placement, Slide, compose, decode_image, placement};
pub use discover::{SUPPORTED_EXTENSIONS, discover_images};
pub use encode_ffmpeg::{FfmpegSink, FfmpegSinkOpts, FrameSink, InMemorySink, SinkConfig};
pub use error::{SlidereelError, SlidereelResult};
pub use model::{FitMode, FrameIndex, FrameRGBA, Resolution, SlideshowSpec};
pub use pipeline::{RenderStats, assemble_timeline, render_slideshow, stream_timeline};
pub use timeline::{Timeline, TimelineManifest};
