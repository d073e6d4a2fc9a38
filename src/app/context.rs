use crate::ports::{ImageGenerator, ImageStore, TextGenerator};

/// Application context holding the collaborators a pipeline run needs.
pub struct AppContext<T: TextGenerator, I: ImageGenerator, S: ImageStore> {
    text: T,
    images: I,
    store: S,
}

impl<T: TextGenerator, I: ImageGenerator, S: ImageStore> AppContext<T, I, S> {
    /// Create a new application context.
    pub fn new(text: T, images: I, store: S) -> Self {
        Self { text, images, store }
    }

    /// Get a reference to the text-generation client.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Get a reference to the image-generation client.
    pub fn images(&self) -> &I {
        &self.images
    }

    /// Get a reference to the image store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
