pub mod content;
pub mod image;
pub mod model_spec;
pub mod studio_spec;

pub use content::*;
pub use image::*;
pub use model_spec::*;
pub use studio_spec::*;
