pub mod io;
pub mod profile;
pub mod traits;

pub use self::profile::{ProfileImage, BACKGROUND, HIT};
pub use self::traits::{ImageView, ImageViewMut, Rows};
