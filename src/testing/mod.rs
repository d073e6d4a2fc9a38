mod fake_image_generator;
mod fake_text_generator;
mod memory_image_store;

pub use fake_image_generator::FakeImageGenerator;
pub use fake_text_generator::FakeTextGenerator;
pub use memory_image_store::MemoryImageStore;
