use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser};
use image::ImageReader;
use tracing::info;

use atlas_bake_core::export::{to_json, write_metadata_txt};
use atlas_bake_core::{pack_images, PackOutput, PackerConfig, SourceImage};

#[derive(Parser, Debug)]
#[command(
    name = "atlas-bake",
    about = "Pack a folder of .png files into a texture atlas",
    version
)]
struct Cli {
    // Input/Output
    /// Folder with .png sources; the atlas and its sidecar are written back
    /// into it. The special value `help` prints usage.
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Atlas base name (writes <name>.png and <name>Metadata.txt)
    #[arg(short, long, default_value = "atlas", help_heading = "Input/Output")]
    name: String,
    /// Sidecar format: txt | json
    #[arg(long, default_value = "txt", value_parser = ["txt", "json"], help_heading = "Input/Output")]
    metadata: String,

    // Layout
    /// Max atlas width
    #[arg(long, default_value_t = 64, help_heading = "Layout")]
    max_width: u32,
    /// Max atlas height
    #[arg(long, default_value_t = 64, help_heading = "Layout")]
    max_height: u32,
    /// Check growth against the matching axis cap instead of the reference
    /// crossed pairing
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    corrected_growth: bool,

    // Logging/UX
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(short, long, default_value_t = false, help_heading = "Logging/UX")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    // `help` as the positional argument is part of the tool contract.
    if std::env::args().nth(1).as_deref() == Some("help") {
        Cli::command().print_help()?;
        return Ok(());
    }
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    run(&cli)
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let start = Instant::now();

    let paths = gather_pngs(&cli.input)?;
    anyhow::ensure!(
        !paths.is_empty(),
        "no .png files in {}",
        cli.input.display()
    );
    let images = load_images(&paths)?;
    info!(count = images.len(), "loaded input images");
    let loaded = Instant::now();

    let cfg = PackerConfig::builder()
        .with_max_dimensions(cli.max_width, cli.max_height)
        .corrected_growth_caps(cli.corrected_growth)
        .build();
    let out = pack_images(images, &cfg)?;
    let packed = Instant::now();

    let png_path = cli.input.join(format!("{}.png", cli.name));
    write_atlas_png(&png_path, &out)?;

    match cli.metadata.as_str() {
        "json" => {
            let json_path = cli.input.join(format!("{}Metadata.json", cli.name));
            let json = serde_json::to_string_pretty(&to_json(&out))?;
            fs::write(&json_path, json)
                .with_context(|| format!("write {}", json_path.display()))?;
            info!(?json_path, "metadata written");
        }
        _ => {
            let txt_path = cli.input.join(format!("{}Metadata.txt", cli.name));
            let file = fs::File::create(&txt_path)
                .with_context(|| format!("write {}", txt_path.display()))?;
            let mut writer = BufWriter::new(file);
            write_metadata_txt(&mut writer, &out)?;
            info!(?txt_path, "metadata written");
        }
    }

    let written = Instant::now();
    info!(
        load = %fmt_dur(loaded.duration_since(start)),
        pack = %fmt_dur(packed.duration_since(loaded)),
        write = %fmt_dur(written.duration_since(packed)),
        "timings"
    );
    info!(
        width = out.width,
        height = out.height,
        placed = out.stats.num_placed,
        dropped = out.stats.num_dropped,
        occupancy = format!("{:.2}%", out.stats.occupancy * 100.0),
        "stats"
    );
    Ok(())
}

fn gather_pngs(folder: &Path) -> anyhow::Result<Vec<PathBuf>> {
    anyhow::ensure!(folder.is_dir(), "not a directory: {}", folder.display());
    let mut list: Vec<PathBuf> = Vec::new();
    for entry in walkdir::WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let p = entry.path();
        if p.is_file() && is_png(p) {
            list.push(p.to_path_buf());
        }
    }
    list.sort();
    Ok(list)
}

fn is_png(p: &Path) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.eq_ignore_ascii_case("png"))
        .unwrap_or(false)
}

fn load_images(paths: &[PathBuf]) -> anyhow::Result<Vec<SourceImage>> {
    let mut list = Vec::with_capacity(paths.len());
    for p in paths {
        let img = ImageReader::open(p)
            .with_context(|| format!("open {}", p.display()))?
            .decode()
            .with_context(|| format!("decode {}", p.display()))?;
        let key = fs::canonicalize(p)
            .unwrap_or_else(|_| p.clone())
            .to_string_lossy()
            .replace('\\', "/");
        list.push(SourceImage::from_dynamic(key, &img)?);
    }
    Ok(list)
}

fn write_atlas_png(path: &Path, out: &PackOutput) -> anyhow::Result<()> {
    let color = match out.bpp {
        1 => image::ExtendedColorType::L8,
        2 => image::ExtendedColorType::La8,
        3 => image::ExtendedColorType::Rgb8,
        4 => image::ExtendedColorType::Rgba8,
        other => anyhow::bail!("unsupported bytes per pixel: {}", other),
    };
    image::save_buffer(path, &out.pixels, out.width, out.height, color)
        .with_context(|| format!("write {}", path.display()))?;
    info!(?path, width = out.width, height = out.height, "wrote atlas page");
    Ok(())
}

fn fmt_dur(d: Duration) -> String {
    let ms = d.as_secs_f64() * 1000.0;
    if ms >= 1.0 {
        format!("{:.1}ms", ms)
    } else {
        format!("{}us", d.as_micros())
    }
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
