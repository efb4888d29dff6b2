pub mod figure;
mod render;
pub mod returns;

pub use figure::{Figure, Layout, Trace};
pub use render::render_group;
