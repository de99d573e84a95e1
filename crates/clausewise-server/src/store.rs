//! In-memory document store.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;

/// An uploaded document and its extracted text.
#[derive(Debug, Clone, Serialize)]
pub struct StoredDocument {
    pub document_id: String,
    pub filename: String,
    pub content_type: String,
    pub text: String,
    pub num_chars: usize,
}

/// Documents keyed by id. Contents are lost on restart.
#[derive(Default)]
pub struct DocumentStore {
    docs: RwLock<HashMap<String, StoredDocument>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document under a fresh UUID and return the record.
    pub fn add(&self, filename: &str, content_type: &str, text: String) -> StoredDocument {
        let doc = StoredDocument {
            document_id: uuid::Uuid::new_v4().to_string(),
            filename: filename.to_string(),
            content_type: content_type.to_string(),
            num_chars: text.chars().count(),
            text,
        };
        self.docs
            .write()
            .insert(doc.document_id.clone(), doc.clone());
        doc
    }

    pub fn get(&self, document_id: &str) -> Option<StoredDocument> {
        self.docs.read().get(document_id).cloned()
    }

    /// Text of a stored document.
    pub fn text(&self, document_id: &str) -> Option<String> {
        self.docs.read().get(document_id).map(|d| d.text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let store = DocumentStore::new();
        let doc = store.add("lease.txt", "text/plain", "Rent is due. Café.".to_string());

        assert_eq!(doc.num_chars, 18);

        let fetched = store.get(&doc.document_id).unwrap();
        assert_eq!(fetched.filename, "lease.txt");
        assert_eq!(fetched.text, "Rent is due. Café.");
        assert_eq!(store.text(&doc.document_id).as_deref(), Some("Rent is due. Café."));
    }

    #[test]
    fn test_ids_are_unique() {
        let store = DocumentStore::new();
        let a = store.add("a.txt", "text/plain", "A".into());
        let b = store.add("a.txt", "text/plain", "A".into());
        assert_ne!(a.document_id, b.document_id);
        assert!(store.get(&a.document_id).is_some());
        assert!(store.get(&b.document_id).is_some());
    }

    #[test]
    fn test_unknown_id() {
        let store = DocumentStore::new();
        assert!(store.get("missing").is_none());
        assert!(store.text("missing").is_none());
    }
}
