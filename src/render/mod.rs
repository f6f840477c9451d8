mod color;
mod material;
mod palette;

pub use color::Color;
pub use material::{MaterialSpec, MaterialStyle};
pub use palette::{ColorAssigner, PaletteStop, default_palette, validate_palette};
