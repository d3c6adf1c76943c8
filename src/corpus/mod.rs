//! Read-only views of the two input corpora.
//!
//! Both files ship with an internal DTD subset, so the parser has to allow DTDs.

pub mod kanjidic;
pub mod kanjivg;

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{KanjiError, KanjiResult};

pub(crate) fn parse_document(text: &str) -> KanjiResult<roxmltree::Document<'_>> {
    let opts = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(text, opts)
        .map_err(|e| KanjiError::corpus(format!("xml parse error: {e}")))
}

pub(crate) fn read_corpus(path: &Path) -> KanjiResult<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read corpus '{}'", path.display()))?;
    Ok(text)
}
