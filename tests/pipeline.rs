use std::path::{Path, PathBuf};

use kanjiset::{AssembleOpts, PrepareOpts, RasterOpts};

const DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");

struct Workspace {
    _dir: tempfile::TempDir,
    root: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();

        let kanji = root.join("kanjivg").join("kanji");
        std::fs::create_dir_all(&kanji).unwrap();
        for entry in std::fs::read_dir(Path::new(DATA).join("kanji")).unwrap() {
            let entry = entry.unwrap();
            std::fs::copy(entry.path(), kanji.join(entry.file_name())).unwrap();
        }
        for name in ["kanjivg.xml", "kanjidic2.xml"] {
            std::fs::copy(Path::new(DATA).join(name), root.join(name)).unwrap();
        }

        Self { _dir: dir, root }
    }

    fn prepare_opts(&self) -> PrepareOpts {
        PrepareOpts {
            kanjivg_index: Some(self.root.join("kanjivg.xml")),
            svg_source_dir: self.root.join("kanjivg").join("kanji"),
            svg_out_dir: self.root.join("svg_nonumbers"),
            png_out_dir: self.root.join("png_nonumbers"),
            raster: RasterOpts::default(),
            preview_count: 10,
        }
    }

    fn assemble_opts(&self) -> AssembleOpts {
        AssembleOpts {
            kanjidic: self.root.join("kanjidic2.xml"),
            png_dir: self.root.join("png_nonumbers"),
            ..AssembleOpts::default()
        }
    }

    fn png(&self, name: &str) -> PathBuf {
        self.root.join("png_nonumbers").join(name)
    }
}

#[test]
fn prepare_strips_and_rasterizes_strict_kanji_files() {
    let ws = Workspace::new();
    let report = kanjiset::prepare_images(&ws.prepare_opts()).unwrap();

    assert_eq!(report.index_kanji, 2);
    assert_eq!(report.svg_files, 2);
    assert_eq!(report.cleaned, 2);
    assert_eq!(report.rasterized, 2);

    let cleaned = std::fs::read_to_string(ws.root.join("svg_nonumbers").join("04e00.svg")).unwrap();
    assert!(!cleaned.contains("StrokeNumbers"));
    assert!(cleaned.contains("kvg:04e00-s1"));
    // The source root declares `kvg` only through its DTD.
    assert!(cleaned.contains(r#"xmlns:kvg="http://kanjivg.tagaini.net""#));
    assert!(!ws.root.join("svg_nonumbers").join("04e00-Kaisho.svg").exists());
    assert!(!ws.root.join("svg_nonumbers").join("03041.svg").exists());

    let img = image::open(ws.png("04e00.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (128, 128));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    assert!(img.pixels().any(|p| p.0[0] < 128));
    assert!(img.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn prepare_is_idempotent() {
    let ws = Workspace::new();
    let opts = ws.prepare_opts();
    kanjiset::prepare_images(&opts).unwrap();

    let read_all = |dir: &Path, names: &[&str]| -> Vec<Vec<u8>> {
        names.iter().map(|n| std::fs::read(dir.join(n)).unwrap()).collect()
    };
    let svgs = read_all(&opts.svg_out_dir, &["04e00.svg", "04e8c.svg"]);
    let pngs = read_all(&opts.png_out_dir, &["04e00.png", "04e8c.png"]);

    kanjiset::prepare_images(&opts).unwrap();
    assert_eq!(read_all(&opts.svg_out_dir, &["04e00.svg", "04e8c.svg"]), svgs);
    assert_eq!(read_all(&opts.png_out_dir, &["04e00.png", "04e8c.png"]), pngs);
}

#[test]
fn prepare_without_index_still_uses_the_directory_worklist() {
    let ws = Workspace::new();
    let opts = PrepareOpts {
        kanjivg_index: None,
        ..ws.prepare_opts()
    };
    let report = kanjiset::prepare_images(&opts).unwrap();
    assert_eq!(report.index_kanji, 0);
    assert_eq!(report.rasterized, 2);
}

#[test]
fn malformed_index_is_fatal() {
    let ws = Workspace::new();
    std::fs::write(ws.root.join("kanjivg.xml"), "<kanjivg><kanji>").unwrap();
    let err = kanjiset::prepare_images(&ws.prepare_opts()).unwrap_err();
    assert!(matches!(err, kanjiset::KanjiError::Corpus(_)), "{err}");
    assert!(!ws.root.join("png_nonumbers").exists());
}

#[test]
fn assemble_writes_metadata_and_renames_uncaptioned_images() {
    let ws = Workspace::new();
    kanjiset::prepare_images(&ws.prepare_opts()).unwrap();

    let report = kanjiset::assemble_dataset(&ws.assemble_opts()).unwrap();
    assert_eq!(report.characters, 4);
    assert_eq!(report.raster_files, 2);
    assert_eq!(report.stats.valid, 2);
    assert_eq!(report.stats.invalid, 1);
    assert_eq!(report.stats.missing_raster, 1);
    assert_eq!(report.entries, 1);
    assert_eq!(report.written.written, 1);

    let text = std::fs::read_to_string(ws.png(kanjiset::METADATA_FILE_NAME)).unwrap();
    let lines: Vec<kanjiset::MetadataEntry> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(
        lines,
        [kanjiset::MetadataEntry {
            file_name: "04e00.png".to_string(),
            text: vec![
                "a kanji drawing meaning \"one\"".to_string(),
                "a kanji drawing meaning \"one radical (no.1)\"".to_string(),
            ],
        }]
    );

    // 二 only has a French meaning, so its image loses its loader-visible name.
    assert_eq!(report.renamed, [ws.png("04e8c.png.old")]);
    assert!(!ws.png("04e8c.png").exists());
    assert!(ws.png("04e8c.png.old").exists());
    assert!(ws.png("04e00.png").exists());
}

#[test]
fn assemble_rerun_leaves_renamed_files_alone() {
    let ws = Workspace::new();
    kanjiset::prepare_images(&ws.prepare_opts()).unwrap();
    kanjiset::assemble_dataset(&ws.assemble_opts()).unwrap();
    let first = std::fs::read(ws.png(kanjiset::METADATA_FILE_NAME)).unwrap();

    let report = kanjiset::assemble_dataset(&ws.assemble_opts()).unwrap();
    assert!(report.renamed.is_empty());
    assert_eq!(report.raster_files, 1);
    assert!(ws.png("04e8c.png.old").exists());
    assert!(!ws.png("04e8c.png.old.old").exists());
    assert_eq!(std::fs::read(ws.png(kanjiset::METADATA_FILE_NAME)).unwrap(), first);
}
