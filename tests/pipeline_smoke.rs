use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use slidereel::{
    FitMode, InMemorySink, Resolution, SlideshowSpec, SlidereelError, render_slideshow,
};

fn fixture_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("pipeline_tests").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_image(dir: &std::path::Path, name: &str, w: u32, h: u32, rgba: [u8; 4]) {
    let img = RgbaImage::from_pixel(w, h, Rgba(rgba));
    img.save(dir.join(name)).unwrap();
}

fn spec(input_dir: PathBuf) -> SlideshowSpec {
    SlideshowSpec {
        input_dir,
        out_path: PathBuf::from("target/pipeline_tests/out.mp4"),
        codec: "libx264".to_string(),
        resolution: Resolution::new(192, 108).unwrap(),
        mode: FitMode::Fit,
        duration_s: 0.5,
        fps: 24,
    }
}

#[test]
fn two_image_directory_renders_expected_frames() {
    let dir = fixture_dir("two_images");
    write_image(&dir, "a.png", 80, 60, [255, 255, 255, 255]);
    write_image(&dir, "b.png", 192, 108, [255, 0, 0, 255]);

    let mut sink = InMemorySink::new();
    let stats = render_slideshow(&spec(dir), &mut sink).unwrap();

    assert_eq!(stats.slides, 2);
    // 0.5s per image at 24fps: 12 frames each.
    assert_eq!(stats.frames_written, 24);
    assert_eq!(sink.frames().len(), 24);

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height, cfg.fps), (192, 108, 24));

    // Indices are strictly increasing from zero; every frame is full size.
    for (i, (idx, frame)) in sink.frames().iter().enumerate() {
        assert_eq!(idx.0, i as u64);
        assert_eq!((frame.width, frame.height), (192, 108));
    }

    // The cut happens at the slide boundary: frame 11 is the padded white
    // image, frame 12 is the solid red one.
    let white_last = &sink.frames()[11].1;
    let red_first = &sink.frames()[12].1;
    assert_ne!(white_last.data, red_first.data);
    assert_eq!(&red_first.data[0..4], &[255, 0, 0, 255]);
    // a.png (4:3) gets side bars in fit mode; top-left is black padding.
    assert_eq!(&white_last.data[0..4], &[0, 0, 0, 255]);
}

#[test]
fn slideshow_order_follows_file_names_not_creation_order() {
    let dir = fixture_dir("ordering");
    write_image(&dir, "c.png", 8, 8, [3, 3, 3, 255]);
    write_image(&dir, "a.png", 8, 8, [1, 1, 1, 255]);
    write_image(&dir, "b.png", 8, 8, [2, 2, 2, 255]);

    let mut spec = spec(dir);
    spec.resolution = Resolution::new(8, 8).unwrap();
    spec.mode = FitMode::Stretch;

    let timeline = slidereel::assemble_timeline(&spec).unwrap();
    let names: Vec<_> = timeline
        .slides()
        .iter()
        .map(|s| s.source.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);

    // First pixel of each slide identifies the source image.
    assert_eq!(timeline.slides()[0].frame.data[0], 1);
    assert_eq!(timeline.slides()[1].frame.data[0], 2);
    assert_eq!(timeline.slides()[2].frame.data[0], 3);
}

#[test]
fn rendering_twice_is_deterministic() {
    let dir = fixture_dir("deterministic");
    write_image(&dir, "b.png", 20, 10, [9, 9, 9, 255]);
    write_image(&dir, "a.png", 10, 20, [7, 7, 7, 255]);

    let spec = spec(dir);
    let mut first = InMemorySink::new();
    let mut second = InMemorySink::new();
    render_slideshow(&spec, &mut first).unwrap();
    render_slideshow(&spec, &mut second).unwrap();

    assert_eq!(first.frames().len(), second.frames().len());
    for (a, b) in first.frames().iter().zip(second.frames()) {
        assert_eq!(a.0, b.0);
        assert_eq!(a.1.data, b.1.data);
    }
}

#[test]
fn empty_directory_fails_with_no_input() {
    let dir = fixture_dir("empty");
    let mut sink = InMemorySink::new();
    let err = render_slideshow(&spec(dir), &mut sink).unwrap_err();
    assert!(matches!(err, SlidereelError::NoInput(_)));
    assert!(sink.frames().is_empty());
}

#[test]
fn mixed_content_directory_only_uses_images() {
    let dir = fixture_dir("mixed");
    write_image(&dir, "photo.png", 16, 16, [5, 5, 5, 255]);
    std::fs::write(dir.join("notes.txt"), b"not an image").unwrap();

    let mut sink = InMemorySink::new();
    let stats = render_slideshow(&spec(dir), &mut sink).unwrap();
    assert_eq!(stats.slides, 1);
    assert_eq!(stats.frames_written, 12);
}

#[test]
fn timeline_manifest_matches_render() {
    let dir = fixture_dir("manifest");
    write_image(&dir, "a.png", 16, 16, [1, 1, 1, 255]);
    write_image(&dir, "b.png", 16, 16, [2, 2, 2, 255]);

    let spec = spec(dir);
    let timeline = slidereel::assemble_timeline(&spec).unwrap();
    let manifest = timeline.manifest(spec.resolution, spec.fps);

    assert_eq!(manifest.slides.len(), 2);
    assert_eq!(manifest.total_duration_s, 1.0);
    assert_eq!(manifest.total_frames, 24);
    assert_eq!(manifest.slides[0].start_s, 0.0);
    assert_eq!(manifest.slides[1].start_s, 0.5);
}
