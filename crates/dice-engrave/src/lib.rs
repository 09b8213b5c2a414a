//! Displacement map sampling and face engraving for die meshes.
//!
//! Maps follow the "ink = depth" convention: black texels carve to the full
//! engraving strength, white texels leave the surface untouched.

mod engrave;
#[cfg(feature = "image")]
mod raster;
mod map;

pub use engrave::{apply_engraving, engrave, EngravingStats};
#[cfg(feature = "image")]
pub use raster::{decode_image, from_image};
pub use map::{radial_gradient, sample, DisplacementMap, DEFAULT_MAP_SIZE};

use dice_core::MapError;

/// Where a displacement map comes from.
///
/// Text is rasterized by the caller; it arrives here as pixels.
#[derive(Debug, Clone)]
pub enum MapSource {
    /// An already rasterized RGBA buffer.
    Pixels(DisplacementMap),
    /// Encoded image bytes (PNG).
    #[cfg(feature = "image")]
    Image(Vec<u8>),
    /// Radial gradient, shallow at the centre and deepest at the rim.
    Gradient,
}

/// Map generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_SIZE,
            height: DEFAULT_MAP_SIZE,
        }
    }
}

/// Produce a displacement map from any source.
pub fn generate_map(source: MapSource, options: &MapOptions) -> Result<DisplacementMap, MapError> {
    match source {
        MapSource::Pixels(map) => Ok(map),
        #[cfg(feature = "image")]
        MapSource::Image(bytes) => decode_image(&bytes, options.width, options.height),
        MapSource::Gradient => radial_gradient(options.width, options.height),
    }
}
