use base64::Engine as _;

use super::*;

fn frame(width: u32, height: u32, px: [u8; 4], premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: px.repeat((width * height) as usize),
        premultiplied,
    }
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let mut px = vec![64, 32, 0, 128, 10, 10, 10, 0, 255, 255, 255, 255];
    unpremultiply_in_place(&mut px);
    assert_eq!(px, vec![128, 64, 0, 128, 0, 0, 0, 0, 255, 255, 255, 255]);
}

#[test]
fn encoded_png_decodes_to_the_same_pixels() {
    let encoded = encode_frame(&frame(3, 2, [10, 20, 30, 255], true)).unwrap();
    assert_eq!((encoded.width, encoded.height), (3, 2));
    assert_eq!(encoded.mime_type(), "image/png");

    let decoded = image::load_from_memory(encoded.png_bytes())
        .unwrap()
        .to_rgba8();
    assert_eq!(decoded.dimensions(), (3, 2));
    assert!(decoded.pixels().all(|p| p.0 == [10, 20, 30, 255]));
}

#[test]
fn data_uri_wraps_png_bytes() {
    let encoded = encode_frame(&frame(1, 1, [0, 0, 0, 0], true)).unwrap();
    let uri = encoded.to_data_uri();
    let payload = uri.strip_prefix(DATA_URI_PREFIX).unwrap();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .unwrap();
    assert_eq!(bytes, encoded.png_bytes());
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn same_pixels_give_identical_bytes() {
    let a = encode_frame(&frame(16, 16, [200, 100, 50, 255], true)).unwrap();
    let b = encode_frame(&frame(16, 16, [200, 100, 50, 255], true)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn length_mismatch_is_rejected() {
    let bad = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 5],
        premultiplied: false,
    };
    let err = encode_frame(&bad).unwrap_err();
    assert!(matches!(err, PosterError::Validation(_)), "{err}");
}
