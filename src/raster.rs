use std::path::Path;

use egui::{Color32, Pos2};
use image::{Rgba, RgbaImage};
use log::{debug, info};

use crate::attributes::PaintAttributes;
use crate::canvas::RenderSnapshot;
use crate::error::ExportError;
use crate::path::{StrokePath, distance_to_segment};

const RASTER_TOLERANCE: f32 = 0.25;
// Thinner strokes would vanish between pixel centers
const MIN_RADIUS: f32 = 0.5;

/// Rasterize a snapshot into a `width` x `height` image filled with
/// `background`.
///
/// Strokes get round caps and joins. Each stroke is composited once, so the
/// overlapping parts of a translucent stroke do not get darker.
pub fn render_to_image(snapshot: &RenderSnapshot, width: u32, height: u32, background: Color32) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, Rgba(background.to_srgba_unmultiplied()));

    for stroke in &snapshot.strokes {
        draw_path(&mut image, stroke.path(), &stroke.attributes(), background);
    }
    if let Some(path) = &snapshot.in_progress {
        draw_path(&mut image, path, &snapshot.live_attributes, background);
    }

    debug!("Rasterized {} strokes into {width}x{height}", snapshot.strokes.len());
    image
}

/// Rasterize a snapshot and write it as a PNG file.
pub fn save_png(
    snapshot: &RenderSnapshot,
    width: u32,
    height: u32,
    background: Color32,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCanvas { width, height });
    }

    let path = path.as_ref();
    render_to_image(snapshot, width, height, background).save_with_format(path, image::ImageFormat::Png)?;
    info!("Saved canvas to {}", path.display());
    Ok(())
}

fn draw_path(image: &mut RgbaImage, path: &StrokePath, attributes: &PaintAttributes, background: Color32) {
    let points = path.flatten(RASTER_TOLERANCE);
    if points.is_empty() || image.width() == 0 || image.height() == 0 {
        return;
    }

    let radius = (attributes.stroke_width() / 2.0).max(MIN_RADIUS);
    let bounds = path.bounds(radius + 1.0);
    let max_x = image.width() as i64 - 1;
    let max_y = image.height() as i64 - 1;
    let x0 = (bounds.min.x.floor() as i64).clamp(0, max_x);
    let y0 = (bounds.min.y.floor() as i64).clamp(0, max_y);
    let x1 = (bounds.max.x.ceil() as i64).clamp(0, max_x);
    let y1 = (bounds.max.y.ceil() as i64).clamp(0, max_y);
    if bounds.max.x < 0.0 || bounds.max.y < 0.0 || bounds.min.x > max_x as f32 + 1.0 || bounds.min.y > max_y as f32 + 1.0 {
        return;
    }

    let mask_width = (x1 - x0 + 1) as usize;
    let mut mask = vec![false; mask_width * (y1 - y0 + 1) as usize];

    let segments: Vec<(Pos2, Pos2)> = if points.len() == 1 {
        vec![(points[0], points[0])]
    } else {
        points.windows(2).map(|pair| (pair[0], pair[1])).collect()
    };

    // Mark pixel centers within `radius` of any segment
    for (start, end) in segments {
        let sx0 = ((start.x.min(end.x) - radius).floor() as i64).max(x0);
        let sy0 = ((start.y.min(end.y) - radius).floor() as i64).max(y0);
        let sx1 = ((start.x.max(end.x) + radius).ceil() as i64).min(x1);
        let sy1 = ((start.y.max(end.y) + radius).ceil() as i64).min(y1);

        for y in sy0..=sy1 {
            for x in sx0..=sx1 {
                let index = (y - y0) as usize * mask_width + (x - x0) as usize;
                if mask[index] {
                    continue;
                }
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_to_segment(center, start, end) <= radius {
                    mask[index] = true;
                }
            }
        }
    }

    let color = attributes.render_color(background).to_srgba_unmultiplied();
    for (index, _) in mask.iter().enumerate().filter(|(_, covered)| **covered) {
        let x = x0 as u32 + (index % mask_width) as u32;
        let y = y0 as u32 + (index / mask_width) as u32;
        let pixel = image.get_pixel_mut(x, y);
        *pixel = blend_over(color, *pixel);
    }
}

/// Source-over compositing of unmultiplied RGBA.
fn blend_over(src: [u8; 4], dst: Rgba<u8>) -> Rgba<u8> {
    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst.0[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |s: u8, d: u8| {
        let value = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(src[0], dst.0[0]),
        channel(src[1], dst.0[1]),
        channel(src[2], dst.0[2]),
        (out_a * 255.0).round() as u8,
    ])
}
