use std::path::PathBuf;

use super::*;
use crate::{assets::fonts::FontBook, foundation::core::Canvas};

fn fixture_face() -> FontFace {
    let path =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans-Bold.ttf");
    FontBook::from_bytes(std::fs::read(path).unwrap())
        .resolve_bold()
        .unwrap()
}

#[test]
fn default_copy_reads_as_the_event_overlay() {
    let copy = OverlayCopy::default();
    assert_eq!(copy.top_label, "I'M ATTENDING");
    assert_eq!(copy.headline, "DEVFEST");
    assert_eq!(copy.sub_headline, "BHOPAL 2025");
    assert_eq!(copy.date_line, "30 NOV 2025");
    assert_eq!(copy.closing_line, "SEE YOU THERE!");
}

#[test]
fn anchors_follow_the_frame() {
    let frame = FrameSpec::DEFAULT;
    assert_eq!(FrameAnchor::Top.y(&frame), 240.0);
    assert_eq!(FrameAnchor::Bottom.y(&frame), 1080.0);
}

#[test]
fn layers_are_ordered_and_positioned() {
    let layers = overlay_layers(&FrameSpec::DEFAULT, &OverlayCopy::default());
    let summary: Vec<_> = layers
        .iter()
        .map(|l| (l.role, l.position.y, l.font_size, l.stroke.width))
        .collect();
    assert_eq!(
        summary,
        vec![
            (LayerRole::TopLabel, 240.0, 68.0, 4.0),
            (LayerRole::Headline, 340.0, 88.0, 5.0),
            (LayerRole::SubHeadline, 430.0, 74.0, 5.0),
            (LayerRole::DateLine, 1080.0, 54.0, 3.0),
            (LayerRole::ClosingLine, 1155.0, 58.0, 3.0),
        ]
    );
    for l in &layers {
        assert_eq!(l.position.x, 540.0);
        assert!(l.bold);
        assert_eq!(l.stroke.color, Rgba8::BLACK);
        assert_eq!(l.align, TextAlign::Center);
        assert_eq!(l.baseline, TextBaseline::Middle);
        assert_eq!(l.font_family, OVERLAY_FONT_FAMILY);
    }
}

#[test]
fn only_the_headline_uses_the_gradient() {
    let layers = overlay_layers(&FrameSpec::DEFAULT, &OverlayCopy::default());
    let headline = &layers[1];
    let Fill::LinearGradient(g) = &headline.fill else {
        panic!("headline fill should be a gradient: {:?}", headline.fill);
    };
    assert_eq!(g.start, Point::new(0.0, 360.0));
    assert_eq!(g.end, Point::new(1080.0, 360.0));
    assert_eq!(g.stops, HEADLINE_GRADIENT_STOPS.to_vec());

    assert_eq!(layers[0].fill, Fill::Solid(Rgba8::WHITE));
    assert_eq!(layers[2].fill, Fill::Solid(Rgba8::WHITE));
    assert_eq!(layers[3].fill, Fill::Solid(ACCENT));
    assert_eq!(layers[4].fill, Fill::Solid(Rgba8::WHITE));
}

#[test]
fn layers_track_a_custom_frame() {
    let frame = FrameSpec::new(800, 1600, 400).unwrap();
    let layers = overlay_layers(&frame, &OverlayCopy::default());
    // frame_y = 600, half = 200
    assert_eq!(layers[0].position, Point::new(400.0, 300.0));
    assert_eq!(layers[4].position, Point::new(400.0, 995.0));
}

#[test]
fn em_middle_normalizes_metrics_to_one_em() {
    // Ascent and descent already span exactly one em: plain midpoint.
    assert_eq!(em_middle_above_baseline(50.0, 40.0, 10.0), 15.0);
    // Taller line box (typical hhea metrics): the em box is scaled into it.
    assert_eq!(em_middle_above_baseline(40.0, 40.0, 10.0), 12.0);
    assert_eq!(em_middle_above_baseline(40.0, 0.0, 0.0), 0.0);
}

#[test]
fn layout_origin_centers_on_anchor() {
    let metrics = LineMetrics {
        baseline: 40.0,
        ascent: 40.0,
        descent: 10.0,
    };
    let o = layout_origin(Point::new(540.0, 240.0), 300.0, 40.0, metrics);
    assert_eq!(o.x, 390.0);
    // Em middle sits 12px above the baseline, i.e. 28px below the layout top.
    assert_eq!(o.y, 212.0);
}

#[test]
fn shaped_runs_use_the_resolved_face() {
    let face = fixture_face();
    let mut overlay = TextOverlay::new(&face, OverlayCopy::default()).unwrap();
    let layer = &overlay_layers(&FrameSpec::DEFAULT, &OverlayCopy::default())[3];
    let layout = overlay.shape(layer);
    let runs = positioned_runs(&layout, Point::new(100.0, 200.0));

    assert!(!runs.is_empty());
    let glyph_count: usize = runs.iter().map(|r| r.glyphs.len()).sum();
    assert!(glyph_count >= "30NOV2025".len(), "{glyph_count} glyphs");
    for run in &runs {
        assert_eq!(run.face_index, face.index);
        assert_eq!(run.font_size, 54.0);
        assert!(run.glyphs.iter().all(|g| g.x >= 100.0 && g.y > 200.0));
    }
}

#[test]
fn overlay_registers_the_face_family() {
    let overlay = TextOverlay::new(&fixture_face(), OverlayCopy::default()).unwrap();
    assert_eq!(overlay.family_name(), "DejaVu Sans");
    assert_eq!(overlay.copy(), &OverlayCopy::default());
}

#[test]
fn render_draws_text_near_each_anchor() {
    let frame = FrameSpec::DEFAULT;
    let mut overlay = TextOverlay::new(&fixture_face(), OverlayCopy::default()).unwrap();
    let mut surface = Surface::new(frame.canvas()).unwrap();
    overlay.render(&mut surface, &frame).unwrap();
    let out = surface.finish();

    let band_has_ink = |y0: u32, y1: u32| {
        (y0..y1).any(|y| {
            (0..out.width).any(|x| out.data[((y * out.width + x) * 4 + 3) as usize] > 0)
        })
    };
    assert!(band_has_ink(210, 270), "top label missing");
    assert!(band_has_ink(1050, 1110), "date line missing");
    // Between the sub-headline and the date line nothing is drawn.
    assert!(!band_has_ink(520, 1000));
}

#[test]
fn blank_copy_draws_nothing() {
    let copy = OverlayCopy {
        top_label: String::new(),
        headline: " ".to_string(),
        sub_headline: String::new(),
        date_line: String::new(),
        closing_line: String::new(),
    };
    let mut overlay = TextOverlay::new(&fixture_face(), copy).unwrap();
    let mut surface = Surface::new(Canvas {
        width: 1080,
        height: 1920,
    })
    .unwrap();
    overlay.render(&mut surface, &FrameSpec::DEFAULT).unwrap();
    assert!(surface.finish().data.iter().all(|&b| b == 0));
}
