use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kanjiset", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Strip stroke numbers from the KanjiVG SVGs and rasterize them.
    Images(ImagesArgs),
    /// Write metadata.jsonl for the rasterized images from KANJIDIC2 meanings.
    Dataset(DatasetArgs),
    /// Run `images` then `dataset`.
    All(AllArgs),
}

#[derive(Args, Debug)]
struct ImagesArgs {
    /// Stroke-order index, read for diagnostics.
    #[arg(long, default_value = "kanjivg.xml")]
    kanjivg_index: PathBuf,

    /// Skip reading the stroke-order index.
    #[arg(long)]
    no_index: bool,

    /// Directory of source SVGs.
    #[arg(long, default_value = "kanjivg/kanji")]
    svg_dir: PathBuf,

    /// Output directory for SVGs without stroke numbers.
    #[arg(long, default_value = "svg_nonumbers")]
    svg_out: PathBuf,

    /// Output directory for PNGs.
    #[arg(long, default_value = "png_nonumbers")]
    png_out: PathBuf,

    /// PNG width and height in pixels.
    #[arg(long, default_value_t = 128)]
    size: u32,

    /// Number of index entries to print as a preview.
    #[arg(long, default_value_t = 10)]
    preview: usize,
}

#[derive(Args, Debug)]
struct DatasetArgs {
    /// KANJIDIC2 dictionary file.
    #[arg(long, default_value = "kanjidic2.xml")]
    kanjidic: PathBuf,

    /// Directory holding the PNGs; metadata.jsonl is written here.
    #[arg(long, default_value = "png_nonumbers")]
    png_dir: PathBuf,

    /// Caption template; `$MEANING` is replaced by each meaning.
    #[arg(long, default_value = kanjiset::captions::DEFAULT_TEMPLATE)]
    caption_template: String,
}

#[derive(Args, Debug)]
struct AllArgs {
    #[command(flatten)]
    images: ImagesArgs,

    /// KANJIDIC2 dictionary file.
    #[arg(long, default_value = "kanjidic2.xml")]
    kanjidic: PathBuf,

    /// Caption template; `$MEANING` is replaced by each meaning.
    #[arg(long, default_value = kanjiset::captions::DEFAULT_TEMPLATE)]
    caption_template: String,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Images(args) => cmd_images(args),
        Command::Dataset(args) => cmd_dataset(args),
        Command::All(args) => cmd_all(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn prepare_opts(args: ImagesArgs) -> kanjiset::PrepareOpts {
    kanjiset::PrepareOpts {
        kanjivg_index: (!args.no_index).then_some(args.kanjivg_index),
        svg_source_dir: args.svg_dir,
        svg_out_dir: args.svg_out,
        png_out_dir: args.png_out,
        raster: kanjiset::RasterOpts {
            size: args.size,
            ..kanjiset::RasterOpts::default()
        },
        preview_count: args.preview,
    }
}

fn cmd_images(args: ImagesArgs) -> anyhow::Result<()> {
    let report = kanjiset::prepare_images(&prepare_opts(args))?;
    eprintln!(
        "prepared {} of {} svg files",
        report.rasterized, report.svg_files
    );
    Ok(())
}

fn cmd_dataset(args: DatasetArgs) -> anyhow::Result<()> {
    let opts = kanjiset::AssembleOpts {
        kanjidic: args.kanjidic,
        png_dir: args.png_dir,
        template: kanjiset::CaptionTemplate::new(args.caption_template)?,
    };
    print_assemble_report(&kanjiset::assemble_dataset(&opts)?);
    Ok(())
}

fn cmd_all(args: AllArgs) -> anyhow::Result<()> {
    // Validate the template before spending time on rasterization.
    let template = kanjiset::CaptionTemplate::new(args.caption_template)?;
    let png_dir = args.images.png_out.clone();

    cmd_images(args.images)?;

    let opts = kanjiset::AssembleOpts {
        kanjidic: args.kanjidic,
        png_dir,
        template,
    };
    print_assemble_report(&kanjiset::assemble_dataset(&opts)?);
    Ok(())
}

fn print_assemble_report(report: &kanjiset::AssembleReport) {
    eprintln!(
        "wrote {} ({} entries, {} skipped, {} images renamed)",
        report.metadata_path.display(),
        report.written.written,
        report.written.skipped,
        report.renamed.len()
    );
}
