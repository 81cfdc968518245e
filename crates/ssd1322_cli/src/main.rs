mod logging;
mod manifest;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use image::ImageFormat;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use ssd1322_assets::codegen::{self, GeneratedFiles};
use ssd1322_assets::{AssetCompiler, AssetTable, FontAsset};
use walkdir::WalkDir;

use crate::manifest::{FontEntry, Manifest};

#[derive(Parser, Debug)]
#[command(author, version, about = "Compile bitmaps and fonts into SSD1322 C sources")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log more detail (repeat for debug and trace output)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack images into one bitmap source and header pair
    Bitmap(BitmapArgs),
    /// Rasterize a font and write its atlas source and header
    Font(FontArgs),
    /// Compile every asset listed in a TOML manifest
    Build(BuildArgs),
    /// Print a packed image to stdout for a quick check
    Preview(PreviewArgs),
}

#[derive(Parser, Debug)]
struct BitmapArgs {
    /// Image files or directories containing images
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    /// Basename of the generated files
    #[arg(long, default_value = "resources")]
    name: String,
}

#[derive(Parser, Debug)]
struct FontArgs {
    /// TrueType or OpenType font file
    input: PathBuf,
    /// Pixel size to rasterize at
    #[arg(long)]
    size: f32,
    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    /// Identifier for the font, derived from the file name by default
    #[arg(long)]
    name: Option<String>,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Manifest describing the asset set
    manifest: PathBuf,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input image path
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::initialize(logging::level_from_flags(cli.verbose, cli.quiet))?;

    match cli.command {
        Commands::Bitmap(args) => bitmap(args),
        Commands::Font(args) => font(args),
        Commands::Build(args) => build(args),
        Commands::Preview(args) => preview(args),
    }
}

fn bitmap(args: BitmapArgs) -> Result<()> {
    let compiler = AssetCompiler::default();
    let entries: Vec<(PathBuf, Option<String>)> =
        collect_images(&args.inputs)?.into_iter().map(|path| (path, None)).collect();

    let mut table = AssetTable::new();
    compile_bitmaps(&compiler, &entries, &mut table)?;

    create_dir(&args.out_dir)?;
    let files = codegen::write_bitmap_files(&args.out_dir, &args.name, table.bitmaps())
        .with_context(|| format!("failed to write bitmap sources to {:?}", args.out_dir))?;
    report(&files);
    Ok(())
}

fn font(args: FontArgs) -> Result<()> {
    let compiler = AssetCompiler::default();
    let font = compile_font(&compiler, &args.input, args.size, args.name.as_deref())?;

    create_dir(&args.out_dir)?;
    let files = codegen::write_font_files(&args.out_dir, &font)
        .with_context(|| format!("failed to write font sources to {:?}", args.out_dir))?;
    report(&files);
    Ok(())
}

fn build(args: BuildArgs) -> Result<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let compiler = AssetCompiler::default();
    let mut table = AssetTable::new();

    let entries: Vec<(PathBuf, Option<String>)> =
        manifest.bitmaps.iter().map(|entry| (entry.path.clone(), entry.name.clone())).collect();
    compile_bitmaps(&compiler, &entries, &mut table)?;
    compile_fonts(&compiler, &manifest.fonts, &mut table)?;

    if table.is_empty() {
        anyhow::bail!("manifest {:?} lists no assets", args.manifest);
    }
    if !table.bitmaps().is_empty() {
        ensure_basename_free(&table, &manifest.output.bitmaps)?;
    }

    let out_dir = &manifest.output.directory;
    create_dir(out_dir)?;
    if !table.bitmaps().is_empty() {
        let files = codegen::write_bitmap_files(out_dir, &manifest.output.bitmaps, table.bitmaps())
            .with_context(|| format!("failed to write bitmap sources to {:?}", out_dir))?;
        report(&files);
    }
    for font in table.fonts() {
        let files = codegen::write_font_files(out_dir, font)
            .with_context(|| format!("failed to write font sources to {:?}", out_dir))?;
        report(&files);
    }

    Ok(())
}

fn preview(args: PreviewArgs) -> Result<()> {
    let compiler = AssetCompiler::default();
    let asset = compiler
        .compile_bitmap_path(&args.input, None)
        .with_context(|| format!("failed to compile {:?}", args.input))?;

    let bitmap = &asset.bitmap;
    println!(
        "{}: {} column units ({} px + {} dummy) x {} rows, {} bytes",
        asset.name,
        bitmap.packed_width(),
        bitmap.packed_width() * 4 - asset.dummy_columns,
        asset.dummy_columns,
        bitmap.height(),
        bitmap.bytes().len()
    );
    for row in bitmap.preview_rows(asset.dummy_columns) {
        println!("|{}|", row);
    }

    Ok(())
}

/// Compiles every image in order, adding it to `table`. Nothing is written on failure.
fn compile_bitmaps(
    compiler: &AssetCompiler,
    entries: &[(PathBuf, Option<String>)],
    table: &mut AssetTable,
) -> Result<()> {
    let progress = progress_bar(entries.len(), "bitmaps")?;

    for (path, name) in entries {
        let asset = compiler
            .compile_bitmap_path(path, name.as_deref())
            .with_context(|| format!("failed to compile bitmap {:?}", path))?;
        table.insert_bitmap(asset).with_context(|| format!("cannot add {:?}", path))?;
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(())
}

fn compile_fonts(
    compiler: &AssetCompiler,
    entries: &[FontEntry],
    table: &mut AssetTable,
) -> Result<()> {
    let progress = progress_bar(entries.len(), "fonts")?;

    for entry in entries {
        let font = compile_font(compiler, &entry.path, entry.size, entry.name.as_deref())?;
        table.insert_font(font).with_context(|| format!("cannot add {:?}", entry.path))?;
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(())
}

fn compile_font(
    compiler: &AssetCompiler,
    path: &Path,
    size: f32,
    name: Option<&str>,
) -> Result<FontAsset> {
    compiler
        .compile_font_path(path, size, name)
        .with_context(|| format!("failed to compile font {:?}", path))
}

/// Fonts are written to `<name>.c`/`<name>.h`, so none may take the bitmap pair's basename.
fn ensure_basename_free(table: &AssetTable, basename: &str) -> Result<()> {
    anyhow::ensure!(
        !table.fonts().iter().any(|font| font.name == basename),
        "font {:?} would overwrite the bitmap sources of the same name",
        basename
    );
    Ok(())
}

/// Expands directories into the image files they contain, sorted by path.
fn collect_images(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            images.push(input.clone());
            continue;
        }

        let mut entries: Vec<PathBuf> = WalkDir::new(input)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.path().to_path_buf())
            .filter(|path| ImageFormat::from_path(path).is_ok())
            .collect();
        entries.sort();
        if entries.is_empty() {
            anyhow::bail!("no image files found in {:?}", input);
        }
        images.extend(entries);
    }

    Ok(images)
}

fn progress_bar(len: usize, unit: &str) -> Result<ProgressBar> {
    let progress = ProgressBar::new(len as u64);
    progress.set_style(
        ProgressStyle::with_template(&format!(
            "{{spinner}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {unit}"
        ))?
        .progress_chars("=> "),
    );
    Ok(progress)
}

fn create_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create output directory {:?}", dir))
}

fn report(files: &GeneratedFiles) {
    info!("wrote {:?} and {:?}", files.header, files.source);
}
