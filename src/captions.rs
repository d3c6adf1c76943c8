use crate::foundation::error::{KanjiError, KanjiResult};

/// Placeholder replaced by the meaning text.
pub const MEANING_PLACEHOLDER: &str = "$MEANING";

pub const DEFAULT_TEMPLATE: &str = r#"a kanji drawing meaning "$MEANING""#;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptionTemplate {
    template: String,
}

impl CaptionTemplate {
    pub fn new(template: impl Into<String>) -> KanjiResult<Self> {
        let template = template.into();
        if !template.contains(MEANING_PLACEHOLDER) {
            return Err(KanjiError::metadata(format!(
                "caption template must contain {MEANING_PLACEHOLDER}: {template:?}"
            )));
        }
        Ok(Self { template })
    }

    pub fn render(&self, meaning: &str) -> String {
        self.template.replace(MEANING_PLACEHOLDER, meaning)
    }

    pub fn entry(&self, file_name: &str, meanings: &[String]) -> MetadataEntry {
        MetadataEntry {
            file_name: file_name.to_string(),
            text: meanings.iter().map(|m| self.render(m)).collect(),
        }
    }
}

impl Default for CaptionTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

/// One line of `metadata.jsonl`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MetadataEntry {
    pub file_name: String,
    pub text: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_quotes_the_meaning() {
        let t = CaptionTemplate::default();
        assert_eq!(t.render("one"), "a kanji drawing meaning \"one\"");
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        assert!(CaptionTemplate::new("a kanji").is_err());
        let t = CaptionTemplate::new("glyph: $MEANING").unwrap();
        assert_eq!(t.render("tree"), "glyph: tree");
    }

    #[test]
    fn entry_serializes_to_jsonl_schema() {
        let entry = CaptionTemplate::default()
            .entry("04e00.png", &["one".to_string(), "ground".to_string()]);
        let line = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            line,
            r#"{"file_name":"04e00.png","text":["a kanji drawing meaning \"one\"","a kanji drawing meaning \"ground\""]}"#
        );
    }
}
