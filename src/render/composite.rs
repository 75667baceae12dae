use kurbo::Shape as _;

use crate::{
    assets::PreparedImage,
    foundation::core::{Affine, BezPath, FrameSpec, Rect},
    foundation::error::{PosterError, PosterResult},
    render::surface::{Surface, affine_to_cpu, bezpath_to_cpu, image_paint, rect_to_cpu},
};

// Flattening tolerance for the frame circle, in pixels.
const CLIP_TOLERANCE: f64 = 0.1;

/// Map an image's pixel rectangle onto `dst`, stretching each axis independently.
pub fn stretch_transform(src_width: u32, src_height: u32, dst: Rect) -> Affine {
    let sx = dst.width() / f64::from(src_width.max(1));
    let sy = dst.height() / f64::from(src_height.max(1));
    Affine::translate((dst.x0, dst.y0)) * Affine::scale_non_uniform(sx, sy)
}

/// Closed path of the circular photo frame.
pub fn frame_clip_path(frame: &FrameSpec) -> BezPath {
    frame.frame_circle().to_path(CLIP_TOLERANCE)
}

/// Draw the template stretched over the whole surface. This is the base layer.
pub fn draw_template(surface: &mut Surface, template: &PreparedImage) -> PosterResult<()> {
    let bounds = surface.bounds();
    draw_stretched(surface, template, bounds)
}

/// Draw the photo stretched over the frame's bounding square, clipped to the frame circle.
///
/// The clip is popped before returning, so later layers are never clipped.
pub fn draw_framed_photo(
    surface: &mut Surface,
    photo: &PreparedImage,
    frame: &FrameSpec,
) -> PosterResult<()> {
    let clip = bezpath_to_cpu(&frame_clip_path(frame));
    {
        let ctx = surface.ctx();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.push_clip_layer(&clip);
    }
    let drawn = draw_stretched(surface, photo, frame.frame_rect());
    surface.ctx().pop_layer();
    drawn
}

/// Template first, then the framed photo.
pub fn composite(
    surface: &mut Surface,
    template: &PreparedImage,
    photo: &PreparedImage,
    frame: &FrameSpec,
) -> PosterResult<()> {
    draw_template(surface, template)?;
    draw_framed_photo(surface, photo, frame)
}

fn draw_stretched(surface: &mut Surface, image: &PreparedImage, dst: Rect) -> PosterResult<()> {
    if image.width == 0 || image.height == 0 {
        return Err(PosterError::validation("cannot draw an empty image"));
    }
    let paint = image_paint(image)?;
    let transform = stretch_transform(image.width, image.height, dst);

    let ctx = surface.ctx();
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(paint);
    ctx.fill_rect(&rect_to_cpu(Rect::new(
        0.0,
        0.0,
        f64::from(image.width),
        f64::from(image.height),
    )));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
