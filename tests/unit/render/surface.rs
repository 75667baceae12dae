use super::*;

#[test]
fn surface_rejects_empty_and_oversized_canvases() {
    for (w, h) in [(0, 10), (10, 0), (70_000, 10), (10, 70_000)] {
        let err = Surface::new(Canvas {
            width: w,
            height: h,
        })
        .unwrap_err();
        assert!(
            matches!(err, PosterError::CanvasUnavailable(_)),
            "{w}x{h}: {err}"
        );
    }
}

#[test]
fn blank_surface_reads_back_transparent() {
    let s = Surface::new(Canvas {
        width: 4,
        height: 3,
    })
    .unwrap();
    assert_eq!(s.bounds(), Rect::new(0.0, 0.0, 4.0, 3.0));
    let frame = s.finish();
    assert_eq!((frame.width, frame.height), (4, 3));
    assert_eq!(frame.data.len(), 4 * 3 * 4);
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn image_paint_checks_byte_length() {
    let bad = PreparedImage {
        width: 2,
        height: 2,
        rgba8_premul: Arc::new(vec![0; 3]),
    };
    assert!(image_paint(&bad).is_err());

    let ok = PreparedImage {
        width: 2,
        height: 1,
        rgba8_premul: Arc::new(vec![255; 8]),
    };
    image_paint(&ok).unwrap();
}

#[test]
fn bezpath_conversion_keeps_elements() {
    let mut p = BezPath::new();
    p.move_to((0.0, 0.0));
    p.line_to((4.0, 0.0));
    p.quad_to((5.0, 1.0), (4.0, 2.0));
    p.close_path();
    let cpu = bezpath_to_cpu(&p);
    assert_eq!(cpu.elements().len(), p.elements().len());
}
