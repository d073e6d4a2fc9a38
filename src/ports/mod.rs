mod image_generator;
mod image_store;
mod text_generator;

pub use image_generator::ImageGenerator;
pub use image_store::{ImageStore, PNG_SIGNATURE, run_directory_name, shot_file_name};
pub use text_generator::TextGenerator;
