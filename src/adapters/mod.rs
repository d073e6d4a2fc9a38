pub mod image_filesystem;
pub mod together_client_http;

pub use image_filesystem::FilesystemImageStore;
pub use together_client_http::{HttpImageGenerator, HttpTextGenerator};
