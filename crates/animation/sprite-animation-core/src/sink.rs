//! Render target seam.
//!
//! The core never draws. Whatever shows the sprite (an engine component, an inspector
//! pane, a test recorder) implements [`RenderSink`] and is handed to the player on each
//! call that can change the displayed image.

/// Receives the image to display. `None` means show nothing.
pub trait RenderSink<H> {
    fn set_displayed_image(&mut self, image: Option<&H>);
}

impl<H, F> RenderSink<H> for F
where
    F: FnMut(Option<&H>),
{
    fn set_displayed_image(&mut self, image: Option<&H>) {
        self(image)
    }
}

/// Discards every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl<H> RenderSink<H> for NullSink {
    fn set_displayed_image(&mut self, _image: Option<&H>) {}
}

/// Keeps every update in order; handy for hosts' tests and tooling.
#[derive(Clone, Debug)]
pub struct RecordingSink<H> {
    pub shown: Vec<Option<H>>,
}

impl<H> Default for RecordingSink<H> {
    fn default() -> Self {
        Self { shown: Vec::new() }
    }
}

impl<H> RecordingSink<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent update; `None` if nothing was pushed yet.
    pub fn last(&self) -> Option<&Option<H>> {
        self.shown.last()
    }
}

impl<H: Clone> RenderSink<H> for RecordingSink<H> {
    fn set_displayed_image(&mut self, image: Option<&H>) {
        self.shown.push(image.cloned());
    }
}
