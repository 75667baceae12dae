use super::*;

#[test]
fn default_frame_geometry() {
    let f = FrameSpec::DEFAULT;
    assert_eq!(
        f.canvas(),
        Canvas {
            width: 1080,
            height: 1920
        }
    );
    assert_eq!(f.frame_x(), 230.0);
    assert_eq!(f.frame_y(), 650.0);
    assert!(f.frame_x() + f.frame_size() <= 1080.0);
    assert!(f.frame_y() + f.frame_size() <= 1920.0);
}

#[test]
fn frame_circle_is_centered_with_half_size_radius() {
    let c = FrameSpec::DEFAULT.frame_circle();
    assert_eq!(c.center, Point::new(540.0, 960.0));
    assert_eq!(c.radius, 310.0);
    assert_eq!(
        FrameSpec::DEFAULT.frame_rect(),
        Rect::new(230.0, 650.0, 850.0, 1270.0)
    );
}

#[test]
fn frame_must_fit_canvas() {
    assert!(FrameSpec::new(100, 100, 100).is_ok());
    assert!(FrameSpec::new(100, 100, 101).is_err());
    assert!(FrameSpec::new(400, 50, 60).is_err());
    assert!(FrameSpec::new(100, 100, 0).is_err());
}

#[test]
fn hex_colors() {
    assert_eq!(Rgba8::from_hex(0x4285F4), Rgba8::opaque(0x42, 0x85, 0xF4));
    assert_eq!(Rgba8::from_hex(0xFFFFFF), Rgba8::WHITE);
}
