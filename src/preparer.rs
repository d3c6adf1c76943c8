use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    codepoint,
    corpus::kanjivg,
    foundation::error::KanjiResult,
    scan,
    svg::{self, RasterOpts},
};

#[derive(Clone, Debug)]
pub struct PrepareOpts {
    /// Stroke-order index, read for diagnostics only. `None` skips it.
    pub kanjivg_index: Option<PathBuf>,
    pub svg_source_dir: PathBuf,
    pub svg_out_dir: PathBuf,
    pub png_out_dir: PathBuf,
    pub raster: RasterOpts,
    /// How many index entries to log as a preview.
    pub preview_count: usize,
}

impl Default for PrepareOpts {
    fn default() -> Self {
        Self {
            kanjivg_index: Some(PathBuf::from("kanjivg.xml")),
            svg_source_dir: Path::new("kanjivg").join("kanji"),
            svg_out_dir: PathBuf::from("svg_nonumbers"),
            png_out_dir: PathBuf::from("png_nonumbers"),
            raster: RasterOpts::default(),
            preview_count: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PrepareReport {
    /// Kanji found in the stroke-order index (0 when no index was read).
    pub index_kanji: usize,
    pub svg_files: usize,
    pub cleaned: usize,
    pub rasterized: usize,
}

/// SVG files named `<5 hex digits>.svg` whose code point is a kanji.
///
/// Variant drawings (`04e00-Kaisho.svg`) are left out.
pub fn scan_svg_worklist(dir: &Path) -> KanjiResult<Vec<String>> {
    let names = scan::list_file_names(dir, "svg")?;
    Ok(names
        .into_iter()
        .filter(|name| codepoint::strict_stem(name, "svg").is_some())
        .collect())
}

/// Strip stroke numbers from every worklist SVG, then rasterize the results.
///
/// The first failing file aborts the run.
#[tracing::instrument(skip_all)]
pub fn prepare_images(opts: &PrepareOpts) -> KanjiResult<PrepareReport> {
    tracing::info!(
        "kanji code point range min={:X} max={:X}",
        codepoint::KANJI_MIN,
        codepoint::KANJI_MAX
    );

    let mut report = PrepareReport::default();
    if let Some(index_path) = &opts.kanjivg_index {
        report.index_kanji = log_index_summary(index_path, opts.preview_count)?;
    }

    let svg_files = scan_svg_worklist(&opts.svg_source_dir)?;
    report.svg_files = svg_files.len();
    tracing::info!(count = svg_files.len(), "svg files");

    scan::create_output_dir(&opts.svg_out_dir)?;
    for name in &svg_files {
        clean_svg_file(&opts.svg_source_dir, name, &opts.svg_out_dir)?;
        report.cleaned += 1;
    }

    scan::create_output_dir(&opts.png_out_dir)?;
    for name in &svg_files {
        convert_svg_file(&opts.svg_out_dir, name, &opts.png_out_dir, &opts.raster)?;
        report.rasterized += 1;
    }

    tracing::info!(
        cleaned = report.cleaned,
        rasterized = report.rasterized,
        "images prepared"
    );
    Ok(report)
}

fn log_index_summary(path: &Path, preview_count: usize) -> KanjiResult<usize> {
    let entries = kanjivg::load_index(path)?;
    let kanji = kanjivg::select_kanji(&entries);
    tracing::info!(count = kanji.len(), path = %path.display(), "kanji in stroke-order index");

    for entry in kanji.iter().take(preview_count) {
        tracing::info!(
            "kanji {} [{}] has {} groups",
            entry.id,
            entry.glyph().unwrap_or(char::REPLACEMENT_CHARACTER),
            entry.group_count
        );
    }
    Ok(kanji.len())
}

pub fn clean_svg_file(in_dir: &Path, name: &str, out_dir: &Path) -> KanjiResult<PathBuf> {
    let in_path = in_dir.join(name);
    let bytes = std::fs::read(&in_path).with_context(|| format!("read svg '{}'", in_path.display()))?;
    let cleaned = svg::strip_stroke_numbers(&bytes)
        .with_context(|| format!("strip stroke numbers from '{}'", in_path.display()))?;

    let out_path = out_dir.join(name);
    tracing::debug!(path = %out_path.display(), "saving");
    std::fs::write(&out_path, cleaned)
        .with_context(|| format!("write svg '{}'", out_path.display()))?;
    Ok(out_path)
}

pub fn convert_svg_file(
    in_dir: &Path,
    name: &str,
    out_dir: &Path,
    raster: &RasterOpts,
) -> KanjiResult<PathBuf> {
    let in_path = in_dir.join(name);
    let out_path = out_dir.join(Path::new(name).with_extension("png"));
    tracing::debug!(from = %in_path.display(), to = %out_path.display(), "converting");

    let bytes = std::fs::read(&in_path).with_context(|| format!("read svg '{}'", in_path.display()))?;
    let img = svg::rasterize_svg(&bytes, raster)
        .with_context(|| format!("rasterize '{}'", in_path.display()))?;
    svg::write_png(&img, &out_path)?;
    Ok(out_path)
}
