//! Registry of open documents.
//!
//! A [`Session`] maps document ids to [`Document`]s and remembers which one
//! is current. It is an ordinary value owned by the caller and passed to
//! whatever needs it; nothing here is global.
//!
//! # Examples
//!
//! ```rust
//! use deckwright::Session;
//! use deckwright::deck::SlideStore;
//!
//! let mut session = Session::new();
//! let id = session.create_document();
//! session.document_mut(None)?.add_slide("Title Slide");
//! assert_eq!(session.document(Some(&id))?.slide_count(), 1);
//! # Ok::<(), deckwright::Error>(())
//! ```
use crate::common::{Error, Result};
use crate::deck::Document;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Identifier of a document within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Default)]
pub struct Session {
    documents: HashMap<DocumentId, Document>,
    current: Option<DocumentId>,
    next: usize,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new empty document and make it current.
    pub fn create_document(&mut self) -> DocumentId {
        let id = self.fresh_id();
        self.documents.insert(id.clone(), Document::new());
        self.current = Some(id.clone());
        debug!(document = %id, "created document");
        id
    }

    /// Register an existing document and make it current.
    ///
    /// With `id` set to `None` a fresh id is generated. A document already
    /// registered under the same id is replaced.
    pub fn insert_document(&mut self, document: Document, id: Option<DocumentId>) -> DocumentId {
        let id = id.unwrap_or_else(|| self.fresh_id());
        if self.documents.insert(id.clone(), document).is_some() {
            debug!(document = %id, "replaced document");
        }
        self.current = Some(id.clone());
        id
    }

    /// The document with `id`, or the current document when `id` is `None`.
    pub fn document(&self, id: Option<&DocumentId>) -> Result<&Document> {
        let id = self.resolve(id)?;
        self.documents
            .get(id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }

    pub fn document_mut(&mut self, id: Option<&DocumentId>) -> Result<&mut Document> {
        let id = self.resolve(id)?.clone();
        self.documents
            .get_mut(&id)
            .ok_or(Error::DocumentNotFound(id.0))
    }

    pub fn current(&self) -> Option<&DocumentId> {
        self.current.as_ref()
    }

    pub fn set_current(&mut self, id: &DocumentId) -> Result<()> {
        if !self.documents.contains_key(id) {
            return Err(Error::DocumentNotFound(id.to_string()));
        }
        self.current = Some(id.clone());
        Ok(())
    }

    /// Remove a document from the session and hand it back.
    ///
    /// Closing the current document leaves the session without one.
    pub fn close(&mut self, id: &DocumentId) -> Result<Document> {
        let document = self
            .documents
            .remove(id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))?;
        if self.current.as_ref() == Some(id) {
            self.current = None;
        }
        debug!(document = %id, "closed document");
        Ok(document)
    }

    /// Ids of all open documents, sorted.
    pub fn ids(&self) -> Vec<&DocumentId> {
        let mut ids: Vec<_> = self.documents.keys().collect();
        ids.sort();
        ids
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn resolve<'a>(&'a self, id: Option<&'a DocumentId>) -> Result<&'a DocumentId> {
        id.or(self.current.as_ref()).ok_or(Error::NoCurrentDocument)
    }

    fn fresh_id(&mut self) -> DocumentId {
        loop {
            self.next += 1;
            let id = DocumentId(format!("presentation_{}", self.next));
            if !self.documents.contains_key(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ErrorKind;
    use crate::deck::SlideStore;

    #[test]
    fn test_create_and_lookup() {
        let mut session = Session::new();
        assert!(matches!(session.document(None), Err(Error::NoCurrentDocument)));

        let first = session.create_document();
        let second = session.create_document();
        assert_eq!(first.as_str(), "presentation_1");
        assert_eq!(session.current(), Some(&second));

        session.document_mut(Some(&first)).unwrap().add_slide("Blank");
        assert_eq!(session.document(Some(&first)).unwrap().slide_count(), 1);
        assert_eq!(session.document(None).unwrap().slide_count(), 0);
        assert_eq!(session.ids(), vec![&first, &second]);
    }

    #[test]
    fn test_unknown_ids() {
        let mut session = Session::new();
        session.create_document();
        let missing = DocumentId::from("nope");

        let err = session.document(Some(&missing)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "No presentation with id 'nope' is loaded");
        assert!(session.set_current(&missing).is_err());
        assert!(session.close(&missing).is_err());
    }

    #[test]
    fn test_close_current() {
        let mut session = Session::new();
        let id = session.create_document();
        let document = session.close(&id).unwrap();
        assert_eq!(document.slide_count(), 0);
        assert!(session.is_empty());
        assert!(session.current().is_none());
        assert!(matches!(session.document_mut(None), Err(Error::NoCurrentDocument)));
    }

    #[test]
    fn test_insert_document_skips_taken_ids() {
        let mut session = Session::new();
        let named = session.insert_document(Document::new(), Some("presentation_1".into()));
        let generated = session.insert_document(Document::new(), None);
        assert_eq!(named.as_str(), "presentation_1");
        assert_eq!(generated.as_str(), "presentation_2");
        assert_eq!(session.len(), 2);

        session.set_current(&named).unwrap();
        assert_eq!(session.current(), Some(&named));
    }
}
