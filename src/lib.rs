//! Build an image + caption dataset of kanji drawings.
//!
//! Two batch stages run in order:
//!
//! 1. [`prepare_images`] strips stroke-number annotations from KanjiVG SVGs and
//!    rasterizes them to 128x128 PNGs.
//! 2. [`assemble_dataset`] cross-references KANJIDIC2 meanings against those PNGs,
//!    writes `metadata.jsonl` next to them and renames uncaptioned images.
#![forbid(unsafe_code)]

mod foundation;

pub mod assembler;
pub mod captions;
pub mod codepoint;
pub mod corpus;
pub mod preparer;
pub mod scan;
pub mod svg;

pub use crate::foundation::error::{KanjiError, KanjiResult};

pub use crate::assembler::{
    AssembleOpts, AssembleReport, METADATA_FILE_NAME, Metadata, MetadataStats, assemble_dataset,
    build_metadata, reconcile,
};
pub use crate::captions::{CaptionTemplate, MetadataEntry};
pub use crate::codepoint::is_japanese_code_point;
pub use crate::preparer::{PrepareOpts, PrepareReport, prepare_images, scan_svg_worklist};
pub use crate::svg::RasterOpts;
