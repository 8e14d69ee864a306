use std::sync::Arc;

use crate::block::Document;
use crate::parser::segment;

/// Remembers the document for the most recently segmented text.
///
/// Asking again for the same text returns the shared document without
/// rescanning; any other text is segmented from scratch and replaces it.
#[derive(Debug, Default)]
pub struct DocumentCache {
    last: Option<(String, Arc<Document>)>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, text: &str) -> Arc<Document> {
        if let Some((cached_text, doc)) = &self.last {
            if cached_text == text {
                log::trace!("document cache hit ({} bytes)", text.len());
                return Arc::clone(doc);
            }
        }

        log::debug!("document cache miss, segmenting {} bytes", text.len());
        let doc = Arc::new(segment(text));
        self.last = Some((text.to_string(), Arc::clone(&doc)));
        doc
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
