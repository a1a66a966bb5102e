pub mod log;
pub use log::*;

mod rect;
pub use rect::*;

mod vec2;
pub use vec2::*;
