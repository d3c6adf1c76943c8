use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    captions::CaptionTemplate,
    codepoint,
    corpus::kanjidic::{self, CharacterEntry},
    foundation::error::KanjiResult,
    scan,
};

pub const METADATA_FILE_NAME: &str = "metadata.jsonl";

/// Suffix appended to raster images that ended up without captions.
pub const RENAMED_SUFFIX: &str = ".old";

#[derive(Clone, Debug)]
pub struct AssembleOpts {
    pub kanjidic: PathBuf,
    /// Raster directory produced by the image preparer; the metadata file is
    /// written here too.
    pub png_dir: PathBuf,
    pub template: CaptionTemplate,
}

impl Default for AssembleOpts {
    fn default() -> Self {
        Self {
            kanjidic: PathBuf::from("kanjidic2.xml"),
            png_dir: PathBuf::from("png_nonumbers"),
            template: CaptionTemplate::default(),
        }
    }
}

/// Raster images currently on disk.
#[derive(Clone, Debug, Default)]
pub struct RasterInventory {
    /// Sorted `*.png` file names.
    pub files: Vec<String>,
    /// Code points decoded from those file names.
    pub code_points: HashSet<u32>,
}

pub fn scan_rasters(dir: &Path) -> KanjiResult<RasterInventory> {
    let files = scan::list_file_names(dir, "png")?;
    let mut code_points = HashSet::with_capacity(files.len());
    for name in &files {
        match codepoint::unicode_id_to_code_point(codepoint::file_stem(name)) {
            Some(c) => {
                code_points.insert(c);
            }
            None => tracing::warn!(file = %name, "raster file name is not a hex code point"),
        }
    }
    Ok(RasterInventory { files, code_points })
}

/// Image file name to English meanings, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl Metadata {
    pub fn push(&mut self, key: &str, meaning: &str) {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push((key.to_string(), Vec::new()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[idx].1.push(meaning.to_string());
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.index.get(key).map(|&idx| self.entries[idx].1.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MetadataStats {
    /// `ucs` code points in range with a raster image.
    pub valid: usize,
    /// `ucs` code points outside the kanji range or not hex at all.
    pub invalid: usize,
    /// `ucs` code points in range without a raster image.
    pub missing_raster: usize,
}

/// Collect English meanings for every dictionary character that has a raster.
pub fn build_metadata(
    characters: &[CharacterEntry],
    has_raster: &HashSet<u32>,
) -> (Metadata, MetadataStats) {
    let mut metadata = Metadata::default();
    let mut stats = MetadataStats::default();

    for character in characters {
        for record in character.code_points.iter().filter(|r| r.is_ucs()) {
            let code_point = codepoint::unicode_id_to_code_point(&record.value)
                .filter(|&c| codepoint::is_japanese_code_point(c));
            let Some(code_point) = code_point else {
                tracing::warn!(
                    "invalid code point={} character={}",
                    record.value,
                    character.literal
                );
                stats.invalid += 1;
                continue;
            };

            if !has_raster.contains(&code_point) {
                tracing::warn!("code point {code_point:X} has no raster image");
                stats.missing_raster += 1;
                continue;
            }

            stats.valid += 1;
            let key = codepoint::raster_file_name(code_point);
            for meaning in character.meanings.iter().filter(|m| m.is_english()) {
                metadata.push(&key, &meaning.text);
            }
        }
    }

    tracing::info!(entries = metadata.len(), "image to text entries");
    tracing::info!(
        valid = stats.valid,
        invalid = stats.invalid,
        missing_raster = stats.missing_raster,
        "code points"
    );
    (metadata, stats)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub written: usize,
    /// Keys without an image file on disk.
    pub skipped: usize,
}

/// Write one JSON object per metadata key whose image exists in `files`.
pub fn write_metadata(
    path: &Path,
    metadata: &Metadata,
    files: &HashSet<&str>,
    template: &CaptionTemplate,
) -> KanjiResult<WriteStats> {
    let file = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    let mut out = BufWriter::new(file);
    let mut stats = WriteStats::default();

    for (image, meanings) in metadata.iter() {
        if !files.contains(image) {
            tracing::warn!("image {image} does not exist");
            stats.skipped += 1;
            continue;
        }
        let entry = template.entry(image, meanings);
        serde_json::to_writer(&mut out, &entry)
            .with_context(|| format!("serialize metadata for '{image}'"))?;
        out.write_all(b"\n")
            .with_context(|| format!("write '{}'", path.display()))?;
        stats.written += 1;
    }

    out.flush()
        .with_context(|| format!("flush '{}'", path.display()))?;
    Ok(stats)
}

/// Rename strictly named raster images that have no metadata key to
/// `<dir>/<name>.old`, so a loader pairing images with metadata skips them.
///
/// Anything not named `<5 hex digits>.png` is left alone, which keeps repeated
/// runs from touching files renamed earlier.
pub fn reconcile(dir: &Path, metadata: &Metadata, files: &[String]) -> KanjiResult<Vec<PathBuf>> {
    let mut renamed = Vec::new();
    for name in files {
        if codepoint::strict_stem(name, "png").is_none() || metadata.contains_key(name) {
            continue;
        }
        let old_path = dir.join(name);
        let new_path = dir.join(format!("{name}{RENAMED_SUFFIX}"));
        tracing::info!(from = %old_path.display(), to = %new_path.display(), "renaming");
        std::fs::rename(&old_path, &new_path).with_context(|| {
            format!(
                "rename '{}' to '{}'",
                old_path.display(),
                new_path.display()
            )
        })?;
        renamed.push(new_path);
    }
    Ok(renamed)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssembleReport {
    pub characters: usize,
    pub raster_files: usize,
    pub stats: MetadataStats,
    pub entries: usize,
    pub written: WriteStats,
    pub metadata_path: PathBuf,
    pub renamed: Vec<PathBuf>,
}

#[tracing::instrument(skip_all)]
pub fn assemble_dataset(opts: &AssembleOpts) -> KanjiResult<AssembleReport> {
    tracing::info!(path = %opts.kanjidic.display(), "dictionary file");
    let characters = kanjidic::load_dictionary(&opts.kanjidic)?;
    tracing::info!(count = characters.len(), "characters in dictionary");

    let inventory = scan_rasters(&opts.png_dir)?;
    tracing::info!(count = inventory.files.len(), "png files");
    tracing::info!(count = inventory.code_points.len(), "characters with png");

    let (metadata, stats) = build_metadata(&characters, &inventory.code_points);

    let metadata_path = opts.png_dir.join(METADATA_FILE_NAME);
    let files: HashSet<&str> = inventory.files.iter().map(String::as_str).collect();
    let written = write_metadata(&metadata_path, &metadata, &files, &opts.template)?;
    tracing::info!(
        written = written.written,
        skipped = written.skipped,
        path = %metadata_path.display(),
        "metadata written"
    );

    let renamed = reconcile(&opts.png_dir, &metadata, &inventory.files)?;
    tracing::info!(count = renamed.len(), "uncaptioned images renamed");

    Ok(AssembleReport {
        characters: characters.len(),
        raster_files: inventory.files.len(),
        stats,
        entries: metadata.len(),
        written,
        metadata_path,
        renamed,
    })
}
