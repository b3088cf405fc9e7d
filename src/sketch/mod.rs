pub mod encode;
pub mod history;
pub mod raster;
pub mod surface;

pub use raster::{Raster, Rgba};
pub use surface::{Brush, SketchSurface};
