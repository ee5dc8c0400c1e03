// src/document/mod.rs
use serde::{Deserialize, Serialize};

use crate::utils::error::SourceError;

/// One positioned text fragment from a page: the text plus the left-x and
/// bottom-y coordinates of its bounding box, in PDF points.
///
/// Words are produced by the external PDF decoding collaborator and are
/// immutable from this crate's point of view. Order is not significant;
/// table reconstruction sorts them itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// The seam to the external PDF text/layout collaborator.
///
/// Implementors own the document handle and the low-level glyph decoding;
/// this crate only ever asks for the word stream of a page. `page_num` is
/// 1-based, matching how receipt pages are referred to (page 1 carries the
/// identity/income summary, page 2 the pension/insurance detail).
pub trait WordSource {
    fn page_words(&mut self, page_num: u32) -> Result<Vec<Word>, SourceError>;
}

/// A `WordSource` over an in-memory word list per page. Used by callers that
/// decode the whole document up front, and by tests.
#[derive(Debug, Default)]
pub struct StaticWordSource {
    pages: Vec<Vec<Word>>,
}

impl StaticWordSource {
    pub fn new(pages: Vec<Vec<Word>>) -> Self {
        Self { pages }
    }
}

impl WordSource for StaticWordSource {
    fn page_words(&mut self, page_num: u32) -> Result<Vec<Word>, SourceError> {
        let idx = page_num
            .checked_sub(1)
            .ok_or(SourceError::MissingPage(page_num))? as usize;
        self.pages
            .get(idx)
            .cloned()
            .ok_or(SourceError::MissingPage(page_num))
    }
}
