pub mod io;
pub mod rgba;

pub use self::io::{load_rgba_image, save_rgba_png, write_json_file};
pub use self::rgba::RgbaBuffer;
