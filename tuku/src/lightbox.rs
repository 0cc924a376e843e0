//! The gallery image viewer state.

/// A full-screen viewer cycling through gallery images.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lightbox {
    images: Vec<String>,
    index: usize,
    open: bool,
}

impl Lightbox {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            index: 0,
            open: false,
        }
    }

    /// Replace the images, e.g. after a re-render; the viewer is closed.
    pub fn reset(&mut self, images: Vec<String>) {
        *self = Self::new(images);
    }

    /// Show the image at `index` .
    ///
    /// Does nothing if there are no images.
    pub fn open(&mut self, index: usize) {
        if self.images.is_empty() {
            return;
        }
        self.index = index.min(self.images.len() - 1);
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + self.images.len() - 1) % self.images.len();
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(|x| x.as_str())
    }

    /// `<position> / <count>` , 1-based.
    pub fn caption(&self) -> String {
        format!("{} / {}", self.index + 1, self.images.len())
    }
}
