use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "diabloc", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode and lay out a diagram, then print a summary.
    Check(InputArgs),
    /// Print the laid-out primitives as JSON.
    Layout(InputArgs),
    /// Render the diagram as SVG.
    Svg(SvgArgs),
    /// Render the diagram as PNG.
    Png(PngArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input diagram JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct StyleArgs {
    /// Padding around the diagram, in diagram units.
    #[arg(long, default_value_t = 10.0)]
    margin: f64,

    /// Background fill (any SVG paint, e.g. `white` or `#12141c`).
    #[arg(long)]
    background: Option<String>,
}

#[derive(Parser, Debug)]
struct SvgArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output SVG path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct PngArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Device pixels per diagram unit.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    #[command(flatten)]
    style: StyleArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Svg(args) => cmd_svg(args),
        Command::Png(args) => cmd_png(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_diagram(path: &Path) -> anyhow::Result<diabloc::Data> {
    let text =
        fs::read_to_string(path).with_context(|| format!("open diagram '{}'", path.display()))?;
    let raw: serde_json::Value =
        serde_json::from_str(&text).with_context(|| "parse diagram JSON")?;
    let data = diabloc::decode(&raw)?;
    Ok(data)
}

fn settings_from(style: &StyleArgs) -> diabloc::RenderSettings {
    diabloc::RenderSettings {
        margin: style.margin,
        background: style.background.clone(),
        ..diabloc::RenderSettings::default()
    }
}

fn cmd_check(args: InputArgs) -> anyhow::Result<()> {
    let data = read_diagram(&args.in_path)?;
    let primitives = diabloc::layout(&data)?;
    let lines = primitives
        .iter()
        .filter(|p| matches!(p, diabloc::Primitive::Line { .. }))
        .count();

    println!(
        "ok: {} blocks, {} nets, {} line segments",
        data.nodes.len(),
        data.nets.len(),
        lines
    );
    if let Some(b) = diabloc::diagram_bounds(&primitives) {
        println!("bounds: ({}, {}) - ({}, {})", b.x0, b.y0, b.x1, b.y1);
    }
    Ok(())
}

fn cmd_layout(args: InputArgs) -> anyhow::Result<()> {
    let data = read_diagram(&args.in_path)?;
    let primitives = diabloc::layout(&data)?;
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &primitives).context("write layout JSON")?;
    writeln!(stdout)?;
    Ok(())
}

fn cmd_svg(args: SvgArgs) -> anyhow::Result<()> {
    let data = read_diagram(&args.input.in_path)?;
    let primitives = diabloc::layout(&data)?;
    let svg = diabloc::render_svg(&primitives, &settings_from(&args.style));

    match &args.out {
        Some(out) => {
            ensure_parent_dir(out)?;
            fs::write(out, svg).with_context(|| format!("write svg '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => print!("{svg}"),
    }
    Ok(())
}

fn cmd_png(args: PngArgs) -> anyhow::Result<()> {
    let data = read_diagram(&args.input.in_path)?;
    let primitives = diabloc::layout(&data)?;
    let svg = diabloc::render_svg(&primitives, &settings_from(&args.style));
    let raster = diabloc::rasterize_svg(&svg, args.scale)?;

    ensure_parent_dir(&args.out)?;
    raster.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
