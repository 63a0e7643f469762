//! Byte layouts and image files

pub mod native;
pub mod raw;

pub use native::{read_from_buffer, read_image, read_image_3d, write_image, write_to_buffer, Header};
pub use raw::{extract_raw, load_raw, raw_size};
