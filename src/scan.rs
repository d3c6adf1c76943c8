use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::KanjiResult;

/// Sorted names of the regular files in `dir` that end in `.<extension>`.
pub fn list_file_names(dir: &Path, extension: &str) -> KanjiResult<Vec<String>> {
    let suffix = format!(".{extension}");
    let mut names = Vec::new();

    let entries = std::fs::read_dir(dir).with_context(|| format!("read dir '{}'", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read dir entry in '{}'", dir.display()))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("stat '{}'", entry.path().display()))?;
        if !file_type.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %entry.path().display(), "skipping non-utf8 file name");
            continue;
        };
        if name.ends_with(&suffix) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

pub fn create_output_dir(dir: &Path) -> KanjiResult<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_matching_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.svg", "a.svg", "c.png", "d.svg.bak"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.svg")).unwrap();

        let names = list_file_names(dir.path(), "svg").unwrap();
        assert_eq!(names, ["a.svg", "b.svg"]);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_file_names(&dir.path().join("nope"), "svg").unwrap_err();
        assert!(err.to_string().contains("read dir"));
    }
}
