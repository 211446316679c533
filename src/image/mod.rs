pub mod io;
pub mod pixel;
pub mod pixmap;

pub use self::pixel::Rgb;
pub use self::pixmap::{Pixmap, DEFAULT_MAXVAL};
