pub mod f64;
pub mod io;
pub mod rgb;
pub mod traits;

pub use self::f64::ImageF64;
pub use self::rgb::{pack_rgb, unpack_rgb, RgbImage};
pub use self::traits::{ImageView, ImageViewMut, Rows};
