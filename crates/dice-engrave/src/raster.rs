//! Displacement maps from raster images.

use crate::map::DisplacementMap;
use dice_core::MapError;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};

/// Decode encoded image bytes (PNG) into a `width x height` map.
pub fn decode_image(bytes: &[u8], width: u32, height: u32) -> Result<DisplacementMap, MapError> {
    let image = image::load_from_memory(bytes).map_err(|e| MapError::Decode {
        reason: e.to_string(),
    })?;
    from_image(&image, width, height)
}

/// Draw `image` aspect-fitted and centred on a black canvas, then convert
/// it to gray as the mean of its color channels.
pub fn from_image(image: &DynamicImage, width: u32, height: u32) -> Result<DisplacementMap, MapError> {
    if width == 0 || height == 0 {
        return Err(MapError::EmptyDimensions { width, height });
    }
    let (src_w, src_h) = image.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(MapError::Decode {
            reason: "image has no pixels".to_string(),
        });
    }

    let aspect = src_w as f32 / src_h as f32;
    let (draw_w, draw_h) = if aspect > 1.0 {
        (width as f32, width as f32 / aspect)
    } else {
        (height as f32 * aspect, height as f32)
    };
    let draw_w = (draw_w.round() as u32).clamp(1, width);
    let draw_h = (draw_h.round() as u32).clamp(1, height);

    let scaled = image.resize_exact(draw_w, draw_h, FilterType::Nearest).to_rgba8();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    let x = (width - draw_w) / 2;
    let y = (height - draw_h) / 2;
    imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);

    let gray: Vec<u8> = canvas
        .pixels()
        .map(|Rgba([r, g, b, _])| ((*r as f32 + *g as f32 + *b as f32) / 3.0).round() as u8)
        .collect();
    DisplacementMap::from_luma(width, height, &gray)
}
