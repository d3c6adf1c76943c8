use std::path::Path;

use crate::{codepoint, foundation::error::KanjiResult};

/// One `<kanji id="kvg:kanji_04e00">` record of the stroke-order index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KanjiIndexEntry {
    pub id: String,
    /// `None` when the identifier does not carry a hex code point.
    pub code_point: Option<u32>,
    /// Number of stroke groups (element children).
    pub group_count: usize,
}

impl KanjiIndexEntry {
    pub fn is_kanji(&self) -> bool {
        self.code_point.is_some_and(codepoint::is_japanese_code_point)
    }

    pub fn glyph(&self) -> Option<char> {
        self.code_point.and_then(char::from_u32)
    }
}

/// Collect every `kanji` element that has an `id` attribute.
pub fn parse_index(text: &str) -> KanjiResult<Vec<KanjiIndexEntry>> {
    let doc = super::parse_document(text)?;
    let entries = doc
        .descendants()
        .filter(|n| n.has_tag_name("kanji"))
        .filter_map(|n| {
            let id = n.attribute("id")?;
            Some(KanjiIndexEntry {
                id: id.to_string(),
                code_point: codepoint::extract_code_point(id),
                group_count: n.children().filter(|c| c.is_element()).count(),
            })
        })
        .collect();
    Ok(entries)
}

pub fn load_index(path: &Path) -> KanjiResult<Vec<KanjiIndexEntry>> {
    let text = super::read_corpus(path)?;
    parse_index(&text)
}

pub fn select_kanji(entries: &[KanjiIndexEntry]) -> Vec<&KanjiIndexEntry> {
    entries.iter().filter(|e| e.is_kanji()).collect()
}
