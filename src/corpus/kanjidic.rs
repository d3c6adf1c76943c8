use std::path::Path;

use crate::foundation::error::KanjiResult;

/// Code point type tag whose value is an authoritative Unicode code point.
pub const UCS: &str = "ucs";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CharacterEntry {
    pub literal: String,
    pub code_points: Vec<CodePointRecord>,
    pub meanings: Vec<Meaning>,
}

/// `<cp_value cp_type="ucs">4e00</cp_value>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodePointRecord {
    pub cp_type: String,
    pub value: String,
}

impl CodePointRecord {
    pub fn is_ucs(&self) -> bool {
        self.cp_type == UCS
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Meaning {
    /// `m_lang`; absent means English.
    pub lang: Option<String>,
    pub text: String,
}

impl Meaning {
    pub fn is_english(&self) -> bool {
        self.lang.is_none()
    }
}

pub fn parse_dictionary(text: &str) -> KanjiResult<Vec<CharacterEntry>> {
    let doc = super::parse_document(text)?;
    let characters = doc
        .descendants()
        .filter(|n| n.has_tag_name("character"))
        .map(parse_character)
        .collect();
    Ok(characters)
}

pub fn load_dictionary(path: &Path) -> KanjiResult<Vec<CharacterEntry>> {
    let text = super::read_corpus(path)?;
    parse_dictionary(&text)
}

fn parse_character(node: roxmltree::Node<'_, '_>) -> CharacterEntry {
    let literal = node
        .children()
        .find(|c| c.has_tag_name("literal"))
        .and_then(|c| c.text())
        .unwrap_or_default()
        .to_string();

    let code_points = node
        .children()
        .filter(|c| c.has_tag_name("codepoint"))
        .flat_map(|cp| cp.children().filter(|v| v.has_tag_name("cp_value")))
        .map(|v| CodePointRecord {
            cp_type: v.attribute("cp_type").unwrap_or_default().to_string(),
            value: v.text().unwrap_or_default().trim().to_string(),
        })
        .collect();

    let meanings = node
        .descendants()
        .filter(|m| m.has_tag_name("meaning"))
        .map(|m| Meaning {
            lang: m.attribute("m_lang").map(str::to_string),
            text: m.text().unwrap_or_default().to_string(),
        })
        .collect();

    CharacterEntry {
        literal,
        code_points,
        meanings,
    }
}
