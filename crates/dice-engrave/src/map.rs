//! Grayscale displacement maps and UV sampling.

use dice_core::MapError;

/// Default map edge length used by the customization panel.
pub const DEFAULT_MAP_SIZE: u32 = 256;

/// An immutable RGBA bitmap whose red channel carries the gray level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplacementMap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DisplacementMap {
    /// Wrap an RGBA buffer of exactly `width * height * 4` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::EmptyDimensions { width, height });
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(MapError::BufferSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Expand a one-byte-per-texel gray buffer to RGBA.
    pub fn from_luma(width: u32, height: u32, gray: &[u8]) -> Result<Self, MapError> {
        let expected = width as usize * height as usize;
        if gray.len() != expected {
            return Err(MapError::BufferSize {
                width,
                height,
                expected,
                actual: gray.len(),
            });
        }
        let pixels = gray.iter().flat_map(|&g| [g, g, g, 255]).collect();
        Self::new(width, height, pixels)
    }

    /// A map filled with one gray level.
    pub fn solid(width: u32, height: u32, gray: u8) -> Result<Self, MapError> {
        let gray = vec![gray; width as usize * height as usize];
        Self::from_luma(width, height, &gray)
    }

    /// Generate a map from a per-texel function of `(x, y)`.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut gray: impl FnMut(u32, u32) -> u8,
    ) -> Result<Self, MapError> {
        let mut luma = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                luma.push(gray(x, y));
            }
        }
        Self::from_luma(width, height, &luma)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Gray level (red channel) of the texel at `(x, y)`.
    pub fn gray_at(&self, x: u32, y: u32) -> u8 {
        self.pixels[(y as usize * self.width as usize + x as usize) * 4]
    }

    /// Texel coordinates for a UV, clamped to the nearest edge texel.
    pub fn texel_for(&self, u: f32, v: f32) -> (u32, u32) {
        (clamp_axis(u, self.width), clamp_axis(v, self.height))
    }

    /// Displacement intensity at a UV: 1 for black, 0 for white.
    ///
    /// Out-of-range UVs clamp to the edge; they never fail.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        let (x, y) = self.texel_for(u, v);
        1.0 - self.gray_at(x, y) as f32 / 255.0
    }
}

/// Free-function form of [`DisplacementMap::sample`].
pub fn sample(map: &DisplacementMap, u: f32, v: f32) -> f32 {
    map.sample(u, v)
}

fn clamp_axis(t: f32, extent: u32) -> u32 {
    let last = (extent - 1) as f32;
    // NaN saturates to 0 in the cast.
    (t * last).round().clamp(0.0, last) as u32
}

/// Radial gradient: white at the centre fading to black at the rim.
///
/// The radius is half the shorter side; corners beyond it stay black.
pub fn radial_gradient(width: u32, height: u32) -> Result<DisplacementMap, MapError> {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = width.min(height) as f32 / 2.0;

    DisplacementMap::from_fn(width, height, |x, y| {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let t = ((dx * dx + dy * dy).sqrt() / radius).clamp(0.0, 1.0);
        (255.0 * (1.0 - t)).round() as u8
    })
}
