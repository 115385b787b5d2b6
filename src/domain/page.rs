use std::borrow::Cow;

// a page lives for a single request; it is never cached between requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// A page with a title and no content, used when editing a page that doesn't exist yet.
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    // bodies are stored as raw bytes, templates want text
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
