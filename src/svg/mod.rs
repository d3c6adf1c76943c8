//! Stroke-order SVG handling: annotation stripping and rasterization.

pub mod raster;
pub mod strip;

pub use raster::{RasterOpts, rasterize_svg, write_png};
pub use strip::strip_stroke_numbers;
