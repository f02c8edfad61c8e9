use base::Vec2;
use image::{ImageError, PixelFormat, PlanarFrame, Plane, nv21_to_rgb, yuv_to_rgb};

// Build a frame whose planes carry `pad` bytes of garbage after every row.
// Chroma is interleaved (pixel stride 2) when `interleaved` is set, the way
// semi-planar cameras hand out U and V views of one buffer.
fn padded_frame(size: Vec2<usize>, pad: usize, interleaved: bool) -> PlanarFrame {
    let chroma = size.half_ceil();
    let y_stride = size.x + pad;
    let mut y = vec![0xEE; y_stride * size.y];
    for row in 0..size.y {
        for col in 0..size.x {
            y[row * y_stride + col] = ((row * 31 + col * 7) % 256) as u8;
        }
    }
    let u_value = |row: usize, col: usize| ((row * 13 + col * 5 + 40) % 256) as u8;
    let v_value = |row: usize, col: usize| ((row * 3 + col * 11 + 90) % 256) as u8;

    if interleaved {
        let stride = chroma.x * 2 + pad;
        let mut vu = vec![0xEE; stride * chroma.y];
        for row in 0..chroma.y {
            for col in 0..chroma.x {
                vu[row * stride + col * 2] = v_value(row, col);
                vu[row * stride + col * 2 + 1] = u_value(row, col);
            }
        }
        let u = Plane::new(vu[1..].to_vec(), stride, 2);
        let v = Plane::new(vu, stride, 2);
        PlanarFrame::new(size, Plane::packed(y, y_stride), u, v)
    } else {
        let stride = chroma.x + pad;
        let mut u = vec![0xEE; stride * chroma.y];
        let mut v = vec![0xEE; stride * chroma.y];
        for row in 0..chroma.y {
            for col in 0..chroma.x {
                u[row * stride + col] = u_value(row, col);
                v[row * stride + col] = v_value(row, col);
            }
        }
        PlanarFrame::new(
            size,
            Plane::packed(y, y_stride),
            Plane::packed(u, stride),
            Plane::packed(v, stride),
        )
    }
}

#[test]
fn test_direct_path_matches_nv21_path() {
    for (w, h) in [(1, 1), (2, 2), (3, 5), (8, 6), (17, 9), (64, 48)] {
        for pad in [0, 1, 3, 16] {
            for interleaved in [false, true] {
                let size = Vec2::new(w, h);
                let frame = padded_frame(size, pad, interleaved);
                let direct = frame.to_rgb().unwrap();
                let nv21 = frame.to_nv21().unwrap();
                let via_nv21 = nv21_to_rgb(size, &nv21).unwrap();
                assert_eq!(direct, via_nv21, "{w}x{h} pad {pad} interleaved {interleaved}");
                assert_eq!(direct.data.len(), w * h * 3);
                assert_eq!(direct.format, PixelFormat::Rgb8);
                let layout = match interleaved {
                    true => PixelFormat::Yuv420SemiPlanar,
                    false => PixelFormat::Yuv420Planar,
                };
                assert_eq!(frame.format(), layout);
            }
        }
    }
}

#[test]
fn test_corner_pixels_skip_padding() {
    let size = Vec2::new(7, 5);
    let frame = padded_frame(size, 9, false);
    let rgb = frame.to_rgb().unwrap();

    // top-left: y = 0, u/v from chroma (0, 0)
    assert_eq!(rgb.pixel(0, 0), {
        let (r, g, b) = yuv_to_rgb(0, 40, 90);
        Some([r, g, b])
    });

    // bottom-right: luma (6, 4), chroma (3, 2)
    let y = ((4 * 31 + 6 * 7) % 256) as u8;
    let u = ((2 * 13 + 3 * 5 + 40) % 256) as u8;
    let v = ((2 * 3 + 3 * 11 + 90) % 256) as u8;
    let (r, g, b) = yuv_to_rgb(y, u, v);
    assert_eq!(rgb.pixel(6, 4), Some([r, g, b]));
    assert_eq!(rgb.pixel(7, 4), None);
}

#[test]
fn test_nv21_layout() {
    let size = Vec2::new(3, 3);
    let frame = padded_frame(size, 2, false);
    let nv21 = frame.to_nv21().unwrap();

    // 3x3 luma + 2x2 chroma pairs
    assert_eq!(nv21.len(), 9 + 2 * 4);
    assert_eq!(&nv21[..3], &[0, 7, 14]);
    // first pair is V then U
    assert_eq!(nv21[9], 90);
    assert_eq!(nv21[10], 40);
}

#[test]
fn test_last_row_without_trailing_padding() {
    let size = Vec2::new(4, 2);
    let chroma = size.half_ceil();
    // luma stride 6, last row stops right after its fourth sample
    let y = Plane::packed(vec![16; 6 + 4], 6);
    let u = Plane::packed(vec![128; chroma.x], 8);
    let v = Plane::packed(vec![128; chroma.x], 8);
    let frame = PlanarFrame::new(size, y, u, v);
    assert!(frame.to_rgb().is_ok());
}

#[test]
fn test_short_luma_plane_is_rejected() {
    let size = Vec2::new(8, 8);
    let mut frame = padded_frame(size, 4, false);
    frame.y.data.truncate(frame.y.data.len() - 5);
    assert!(matches!(frame.to_rgb(), Err(ImageError::InvalidFrame(_))));
    assert!(matches!(frame.to_nv21(), Err(ImageError::InvalidFrame(_))));
}

#[test]
fn test_short_chroma_plane_is_rejected() {
    let size = Vec2::new(5, 5);
    let mut frame = padded_frame(size, 0, true);
    frame.u.data.pop();
    frame.u.data.pop();
    assert!(matches!(frame.to_rgb(), Err(ImageError::InvalidFrame(_))));
}

#[test]
fn test_stride_narrower_than_row_is_rejected() {
    let size = Vec2::new(8, 4);
    let y = Plane::packed(vec![0; 64], 4);
    let u = Plane::packed(vec![0; 64], 4);
    let v = Plane::packed(vec![0; 64], 4);
    let frame = PlanarFrame::new(size, y, u, v);
    assert!(matches!(frame.validate(), Err(ImageError::InvalidFrame(_))));
}

#[test]
fn test_zero_pixel_stride_is_rejected() {
    let size = Vec2::new(2, 2);
    let frame = PlanarFrame::new(
        size,
        Plane::packed(vec![0; 4], 2),
        Plane::new(vec![0; 1], 1, 0),
        Plane::packed(vec![0; 1], 1),
    );
    assert!(matches!(frame.to_rgb(), Err(ImageError::InvalidFrame(_))));
}

#[test]
fn test_empty_frame_is_rejected() {
    let frame = PlanarFrame::new(
        Vec2::new(0, 4),
        Plane::packed(vec![], 0),
        Plane::packed(vec![], 0),
        Plane::packed(vec![], 0),
    );
    assert!(frame.is_empty());
    assert!(matches!(frame.to_rgb(), Err(ImageError::InvalidFrame(_))));
}

#[test]
fn test_from_yu12() {
    let size = Vec2::new(4, 2);
    let mut data = vec![100u8; 8];
    data.extend_from_slice(&[60, 61]);
    data.extend_from_slice(&[200, 201]);
    let frame = PlanarFrame::from_yu12(size, &data).unwrap();
    assert_eq!(frame.u.data, vec![60, 61]);
    assert_eq!(frame.v.data, vec![200, 201]);
    assert_eq!(frame.u.row_stride, 2);

    assert!(matches!(
        PlanarFrame::from_yu12(size, &data[..11]),
        Err(ImageError::InvalidFrame(_))
    ));
}

#[test]
fn test_short_nv21_is_rejected() {
    let size = Vec2::new(4, 4);
    assert!(matches!(
        nv21_to_rgb(size, &[0; 16 + 7]),
        Err(ImageError::InvalidFrame(_))
    ));
    assert!(nv21_to_rgb(size, &[0; 16 + 8]).is_ok());
}

#[test]
fn test_u_first_interleaved_chroma() {
    // NV12 order: the U view starts at offset 0 and the V view one byte later
    let size = Vec2::new(2, 2);
    let frame = PlanarFrame::new(
        size,
        Plane::packed(vec![128; 4], 2),
        Plane::new(vec![90, 240], 2, 2),
        Plane::new(vec![240], 2, 2),
    );
    assert_eq!(frame.format(), PixelFormat::Yuv420SemiPlanar);
    assert_eq!(frame.to_nv21().unwrap(), vec![128, 128, 128, 128, 240, 90]);
    let (r, g, b) = yuv_to_rgb(128, 90, 240);
    assert_eq!(frame.to_rgb().unwrap().pixel(1, 1), Some([r, g, b]));
}

#[test]
fn test_overflowing_geometry_is_rejected() {
    for size in [
        Vec2::new(usize::MAX, 1),
        Vec2::new(usize::MAX, 2),
        Vec2::new(usize::MAX / 2, 2),
        Vec2::new(1 << (usize::BITS / 2), 1 << (usize::BITS / 2)),
    ] {
        assert!(matches!(nv21_to_rgb(size, &[]), Err(ImageError::InvalidFrame(_))));
        assert!(matches!(
            PlanarFrame::from_yu12(size, &[]),
            Err(ImageError::InvalidFrame(_))
        ));
    }
}

#[test]
fn test_gray_conversion() {
    // neutral chroma keeps the pixel gray
    assert_eq!(yuv_to_rgb(0, 128, 128), (0, 0, 0));
    assert_eq!(yuv_to_rgb(255, 128, 128), (255, 255, 255));
    assert_eq!(yuv_to_rgb(77, 128, 128), (77, 77, 77));
}
