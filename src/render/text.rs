//! Decorative text overlay drawn above the framed photo.
//!
//! Layer styling ([`overlay_layers`]) is pure geometry and can be inspected without a surface.
//! [`TextOverlay`] shapes each layer with Parley and draws it with `vello_cpu`: black outline
//! first, fill on top.

use std::borrow::Cow;

use crate::{
    assets::fonts::FontFace,
    foundation::core::{FrameSpec, Point, Rgba8},
    foundation::error::{PosterError, PosterResult},
    render::surface::Surface,
};

/// CSS-style family list the overlay asks for.
pub const OVERLAY_FONT_FAMILY: &str = "Arial, sans-serif";

/// Google brand colors used by the headline gradient, left to right.
pub const HEADLINE_GRADIENT_STOPS: [(f32, Rgba8); 4] = [
    (0.0, Rgba8::from_hex(0x4285F4)),
    (0.33, Rgba8::from_hex(0xEA4335)),
    (0.66, Rgba8::from_hex(0xFBBC04)),
    (1.0, Rgba8::from_hex(0x34A853)),
];

/// Fill of the date line.
pub const ACCENT: Rgba8 = Rgba8::from_hex(0xFBBC04);

/// Strings drawn by the overlay.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayCopy {
    /// Small label above the headline.
    pub top_label: String,
    /// Large gradient headline.
    pub headline: String,
    /// Line under the headline.
    pub sub_headline: String,
    /// Event date, below the frame center.
    pub date_line: String,
    /// Sign-off under the date.
    pub closing_line: String,
}

impl Default for OverlayCopy {
    fn default() -> Self {
        Self {
            top_label: "I'M ATTENDING".to_string(),
            headline: "DEVFEST".to_string(),
            sub_headline: "BHOPAL 2025".to_string(),
            date_line: "30 NOV 2025".to_string(),
            closing_line: "SEE YOU THERE!".to_string(),
        }
    }
}

/// Which layer of the overlay a [`TextLayer`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// "I'M ATTENDING"
    TopLabel,
    /// "DEVFEST"
    Headline,
    /// "BHOPAL 2025"
    SubHeadline,
    /// "30 NOV 2025"
    DateLine,
    /// "SEE YOU THERE!"
    ClosingLine,
}

/// Frame edge a layer's vertical position is measured from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameAnchor {
    /// `frame_y - frame_size / 2 - 100`
    Top,
    /// `frame_y + frame_size / 2 + 120`
    Bottom,
}

impl FrameAnchor {
    /// Reference y of this anchor for `frame`.
    pub fn y(self, frame: &FrameSpec) -> f64 {
        let half = frame.frame_size() / 2.0;
        match self {
            FrameAnchor::Top => frame.frame_y() - half - 100.0,
            FrameAnchor::Bottom => frame.frame_y() + half + 120.0,
        }
    }
}

/// Horizontal alignment. The overlay only centers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    /// Centered on the anchor x.
    Center,
}

/// Vertical anchor. The overlay only uses the em-box middle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    /// Middle of the em box sits on the anchor y.
    Middle,
}

/// Linear gradient in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradientSpec {
    /// Start point (offset 0).
    pub start: Point,
    /// End point (offset 1).
    pub end: Point,
    /// `(offset, color)` pairs in increasing offset order.
    pub stops: Vec<(f32, Rgba8)>,
}

/// Fill style of a text layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    /// Single color.
    Solid(Rgba8),
    /// Horizontal multi-stop gradient.
    LinearGradient(LinearGradientSpec),
}

/// Outline drawn under the fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Outline color.
    pub color: Rgba8,
    /// Line width in pixels, centered on the glyph outline.
    pub width: f64,
}

/// Fully resolved style and position of one overlay string.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLayer {
    /// Which layer this is.
    pub role: LayerRole,
    /// Text content.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Requested family list.
    pub font_family: &'static str,
    /// Bold weight requested.
    pub bold: bool,
    /// Fill paint.
    pub fill: Fill,
    /// Outline paint.
    pub stroke: StrokeStyle,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Vertical anchor.
    pub baseline: TextBaseline,
    /// Frame edge the offset is measured from.
    pub anchor: FrameAnchor,
    /// Offset from the anchor's reference y.
    pub offset: f64,
    /// Anchor point on the canvas.
    pub position: Point,
}

/// Compute the five overlay layers, in draw order, for `frame`.
pub fn overlay_layers(frame: &FrameSpec, copy: &OverlayCopy) -> Vec<TextLayer> {
    let canvas = frame.canvas();
    let center_x = f64::from(canvas.width) / 2.0;
    let top_y = FrameAnchor::Top.y(frame);

    let headline_gradient = LinearGradientSpec {
        start: Point::new(0.0, top_y + 120.0),
        end: Point::new(f64::from(canvas.width), top_y + 120.0),
        stops: HEADLINE_GRADIENT_STOPS.to_vec(),
    };

    let layer = |role: LayerRole,
                 text: &str,
                 font_size: f32,
                 fill: Fill,
                 stroke_width: f64,
                 anchor: FrameAnchor,
                 offset: f64| {
        TextLayer {
            role,
            text: text.to_string(),
            font_size,
            font_family: OVERLAY_FONT_FAMILY,
            bold: true,
            fill,
            stroke: StrokeStyle {
                color: Rgba8::BLACK,
                width: stroke_width,
            },
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            anchor,
            offset,
            position: Point::new(center_x, anchor.y(frame) + offset),
        }
    };

    vec![
        layer(
            LayerRole::TopLabel,
            &copy.top_label,
            68.0,
            Fill::Solid(Rgba8::WHITE),
            4.0,
            FrameAnchor::Top,
            0.0,
        ),
        layer(
            LayerRole::Headline,
            &copy.headline,
            88.0,
            Fill::LinearGradient(headline_gradient),
            5.0,
            FrameAnchor::Top,
            100.0,
        ),
        layer(
            LayerRole::SubHeadline,
            &copy.sub_headline,
            74.0,
            Fill::Solid(Rgba8::WHITE),
            5.0,
            FrameAnchor::Top,
            190.0,
        ),
        layer(
            LayerRole::DateLine,
            &copy.date_line,
            54.0,
            Fill::Solid(ACCENT),
            3.0,
            FrameAnchor::Bottom,
            0.0,
        ),
        layer(
            LayerRole::ClosingLine,
            &copy.closing_line,
            58.0,
            Fill::Solid(Rgba8::WHITE),
            3.0,
            FrameAnchor::Bottom,
            75.0,
        ),
    ]
}

/// Vertical line metrics of a shaped single-line layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    /// Baseline offset from the layout top.
    pub baseline: f32,
    /// Ascent above the baseline.
    pub ascent: f32,
    /// Descent below the baseline (positive down).
    pub descent: f32,
}

/// Height of the em box middle above the baseline.
///
/// The font's ascent/descent range is normalized to one em of `font_size`, which places the
/// em box the same way a canvas `middle` baseline does.
pub fn em_middle_above_baseline(font_size: f32, ascent: f32, descent: f32) -> f32 {
    let extent = ascent + descent;
    if !extent.is_finite() || extent <= 0.0 {
        return 0.0;
    }
    font_size * (ascent - descent) / (2.0 * extent)
}

/// Top-left origin of a layout so it is centered on `anchor` with the em box middle on
/// `anchor.y`.
pub fn layout_origin(anchor: Point, width: f32, font_size: f32, metrics: LineMetrics) -> Point {
    let middle_from_top = metrics.baseline
        - em_middle_above_baseline(font_size, metrics.ascent, metrics.descent);
    Point::new(
        anchor.x - f64::from(width) / 2.0,
        anchor.y - f64::from(middle_from_top),
    )
}

// Glyphs of one shaped run, positioned in canvas space.
struct RunGlyphs {
    face_index: u32,
    font_size: f32,
    glyphs: Vec<vello_cpu::Glyph>,
}

fn positioned_runs(layout: &parley::Layout<()>, origin: Point) -> Vec<RunGlyphs> {
    let (ox, oy) = (origin.x as f32, origin.y as f32);
    let mut runs = Vec::new();
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let mut run_x = run.offset();
            let run_y = run.baseline();
            let glyphs = run
                .glyphs()
                .map(|g| {
                    let glyph = vello_cpu::Glyph {
                        id: g.id,
                        x: ox + run_x + g.x,
                        y: oy + run_y - g.y,
                    };
                    run_x += g.advance;
                    glyph
                })
                .collect();
            runs.push(RunGlyphs {
                face_index: run.run().font().index,
                font_size: run.run().font_size(),
                glyphs,
            });
        }
    }
    runs
}

/// Shapes and draws the overlay with a single resolved font face.
pub struct TextOverlay {
    copy: OverlayCopy,
    family_name: String,
    font_blob: vello_cpu::peniko::Blob<u8>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
}

impl TextOverlay {
    /// Register `face` for shaping and drawing.
    ///
    /// For font collections the family containing `face.index` is selected, so shaping uses
    /// the face the font book resolved.
    pub fn new(face: &FontFace, copy: OverlayCopy) -> PosterResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(face.bytes.as_ref().clone()), None);
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == face.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| {
                PosterError::font_unavailable(format!(
                    "no font families registered from '{}'",
                    face.family
                ))
            })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PosterError::font_unavailable("registered font family has no name"))?
            .to_string();

        Ok(Self {
            copy,
            family_name,
            font_blob: vello_cpu::peniko::Blob::from(face.bytes.as_ref().clone()),
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    /// Overlay strings.
    pub fn copy(&self) -> &OverlayCopy {
        &self.copy
    }

    /// Family name the layouts are shaped with.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Draw every layer onto `surface`, in order.
    pub fn render(&mut self, surface: &mut Surface, frame: &FrameSpec) -> PosterResult<()> {
        for layer in overlay_layers(frame, &self.copy) {
            self.draw_layer(surface, &layer)?;
        }
        Ok(())
    }

    fn shape(&mut self, layer: &TextLayer) -> parley::Layout<()> {
        let mut builder =
            self.layout_ctx
                .ranged_builder(&mut self.font_ctx, &layer.text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(layer.font_size));
        if layer.bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }
        let mut layout: parley::Layout<()> = builder.build(&layer.text);
        layout.break_all_lines(None);
        layout
    }

    fn draw_layer(&mut self, surface: &mut Surface, layer: &TextLayer) -> PosterResult<()> {
        if layer.text.trim().is_empty() {
            return Ok(());
        }
        if !layer.font_size.is_finite() || layer.font_size <= 0.0 {
            return Err(PosterError::validation(
                "text font size must be finite and > 0",
            ));
        }

        let layout = self.shape(layer);
        let Some(first_line) = layout.lines().next() else {
            return Ok(());
        };
        let m = first_line.metrics();
        let origin = layout_origin(
            layer.position,
            layout.width(),
            layer.font_size,
            LineMetrics {
                baseline: m.baseline,
                ascent: m.ascent,
                descent: m.descent,
            },
        );
        let runs = positioned_runs(&layout, origin);

        let ctx = surface.ctx();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        // Outline of every run goes under every fill.
        let s = layer.stroke;
        ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(s.width)
                .with_join(vello_cpu::kurbo::Join::Miter)
                .with_miter_limit(10.0),
        );
        ctx.set_paint(color_to_cpu(s.color));
        for run in &runs {
            let font = vello_cpu::peniko::FontData::new(self.font_blob.clone(), run.face_index);
            ctx.glyph_run(&font)
                .font_size(run.font_size)
                .stroke_glyphs(run.glyphs.iter().cloned());
        }

        match &layer.fill {
            Fill::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
            Fill::LinearGradient(g) => ctx.set_paint(gradient_to_cpu(g)),
        }
        for run in &runs {
            let font = vello_cpu::peniko::FontData::new(self.font_blob.clone(), run.face_index);
            ctx.glyph_run(&font)
                .font_size(run.font_size)
                .fill_glyphs(run.glyphs.iter().cloned());
        }

        Ok(())
    }
}

impl std::fmt::Debug for TextOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextOverlay")
            .field("family_name", &self.family_name)
            .field("copy", &self.copy)
            .finish_non_exhaustive()
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn gradient_to_cpu(g: &LinearGradientSpec) -> vello_cpu::peniko::Gradient {
    let stops: Vec<(f32, vello_cpu::peniko::Color)> = g
        .stops
        .iter()
        .map(|&(offset, c)| (offset, color_to_cpu(c)))
        .collect();
    vello_cpu::peniko::Gradient::new_linear(
        vello_cpu::kurbo::Point::new(g.start.x, g.start.y),
        vello_cpu::kurbo::Point::new(g.end.x, g.end.y),
    )
    .with_stops(stops.as_slice())
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
