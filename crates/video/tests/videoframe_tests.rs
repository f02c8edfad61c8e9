use {
    base::Vec2,
    image::{Image, ImageError, PixelFormat, PlanarFrame, Plane, Rotation},
    std::{
        sync::{
            Arc,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    },
    video::{FramePixels, VideoFrame},
};

fn gray_planar(size: Vec2<usize>) -> PlanarFrame {
    let chroma = size.half_ceil();
    PlanarFrame::new(
        size,
        Plane::packed(vec![90; size.area()], size.x),
        Plane::packed(vec![128; chroma.area()], chroma.x),
        Plane::packed(vec![128; chroma.area()], chroma.x),
    )
}

#[test]
fn test_planar_frame_to_rgb_applies_rotation() {
    let frame = VideoFrame::planar(
        gray_planar(Vec2::new(6, 4)),
        Rotation::Deg90,
        Duration::ZERO,
    );
    assert_eq!(frame.size(), Vec2::new(6, 4));
    assert_eq!(frame.upright_size(), Vec2::new(4, 6));
    assert_eq!(frame.format(), PixelFormat::Yuv420Planar);
    let rgb = frame.to_rgb().unwrap();
    assert_eq!(rgb.size, frame.upright_size());
    assert_eq!(rgb.pixel(0, 0), Some([90, 90, 90]));
}

#[test]
fn test_rgb_frame_passes_through() {
    let image = Image::filled(Vec2::new(3, 2), [1, 2, 3]);
    let frame = VideoFrame::rgb(image.clone(), Rotation::Deg0, Duration::ZERO);
    assert_eq!(frame.to_rgb().unwrap(), image);
    assert_eq!(frame.format(), PixelFormat::Rgb8);
    assert_eq!(frame.upright_size(), Vec2::new(3, 2));
    assert!(matches!(frame.pixels, FramePixels::Rgb(_)));
}

#[test]
fn test_empty_frames() {
    let frame = VideoFrame::rgb(
        Image::filled(Vec2::new(0, 0), [0, 0, 0]),
        Rotation::Deg0,
        Duration::ZERO,
    );
    assert!(frame.is_empty());

    let mut planar = gray_planar(Vec2::new(4, 4));
    planar.y.data.clear();
    let frame = VideoFrame::planar(planar, Rotation::Deg0, Duration::ZERO);
    assert!(frame.is_empty());
}

#[test]
fn test_malformed_planar_frame() {
    let mut planar = gray_planar(Vec2::new(4, 4));
    planar.v.data.truncate(1);
    let frame = VideoFrame::planar(planar, Rotation::Deg180, Duration::ZERO);
    assert!(matches!(frame.to_rgb(), Err(ImageError::InvalidFrame(_))));
}

#[test]
fn test_release_fires_once_on_drop() {
    let released = Arc::new(AtomicUsize::new(0));
    let frame = VideoFrame::planar(
        gray_planar(Vec2::new(2, 2)),
        Rotation::Deg0,
        Duration::ZERO,
    )
    .with_release({
        let released = Arc::clone(&released);
        move || {
            released.fetch_add(1, Ordering::SeqCst);
        }
    });
    let _ = frame.to_rgb();
    assert_eq!(released.load(Ordering::SeqCst), 0);
    drop(frame);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}
