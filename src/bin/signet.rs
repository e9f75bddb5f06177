use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "signet", version)]
struct Cli {
    /// Log layout decisions to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stamp a signature onto an image and save it as PNG.
    Sign(SignArgs),
    /// Print where a signature would be placed on a WIDTHxHEIGHT image, as JSON.
    Place(PlaceArgs),
}

#[derive(Parser, Debug)]
struct SignArgs {
    /// Input image (any format the decoder recognises).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path. Defaults to `<input-base>_signed.png` next to the input.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Parser, Debug)]
struct PlaceArgs {
    /// Image width in pixels.
    #[arg(long)]
    width: u32,

    /// Image height in pixels.
    #[arg(long)]
    height: u32,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Signature spec JSON; flags below override its fields.
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Signature text.
    #[arg(long)]
    text: Option<String>,

    /// Font size in pixels.
    #[arg(long)]
    font_size: Option<f64>,

    /// Opacity in [0, 1].
    #[arg(long)]
    opacity: Option<f32>,

    /// Distance from the image edge in pixels.
    #[arg(long)]
    padding: Option<f64>,

    /// Text color: #rgb, #rrggbb, #rrggbbaa or a CSS color name.
    #[arg(long)]
    color: Option<String>,

    /// top-left, top-right, bottom-left, bottom-right or center.
    #[arg(long)]
    anchor: Option<String>,

    /// Draw the default legibility shadow.
    #[arg(long)]
    shadow: bool,

    /// Scale sizes relative to a 1200 px wide image.
    #[arg(long)]
    adaptive: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Sign(args) => cmd_sign(args),
        Command::Place(args) => cmd_place(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_spec_json(path: &Path) -> anyhow::Result<signet::SignatureSpec> {
    let f = File::open(path).with_context(|| format!("open spec '{}'", path.display()))?;
    let spec = signet::SignatureSpec::from_json_reader(BufReader::new(f))
        .with_context(|| format!("parse spec '{}'", path.display()))?;
    Ok(spec)
}

fn build_spec(style: &StyleArgs) -> anyhow::Result<signet::SignatureSpec> {
    let mut spec = match &style.spec {
        Some(path) => read_spec_json(path)?,
        None => signet::SignatureSpec::default(),
    };

    if let Some(text) = &style.text {
        spec.text = text.clone();
    }
    if let Some(px) = style.font_size {
        spec.font_size_px = px;
    }
    if let Some(opacity) = style.opacity {
        spec.opacity = opacity;
    }
    if let Some(px) = style.padding {
        spec.padding_px = px;
    }
    if let Some(color) = &style.color {
        spec.color = signet::parse_color(color)?;
    }
    if let Some(anchor) = &style.anchor {
        spec.anchor = anchor.parse()?;
    }
    if style.shadow && spec.shadow.is_none() {
        spec.shadow = Some(signet::ShadowSpec::default());
    }
    if style.adaptive {
        spec.scaling = signet::Scaling::adaptive();
    }
    Ok(spec)
}

/// `<dir>/<base>_signed.png`, with `signed` as the base when the input has no usable stem.
fn default_out_path(input: &Path) -> PathBuf {
    let base = input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("signed");
    input
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{base}_signed.png"))
}

fn cmd_sign(args: SignArgs) -> anyhow::Result<()> {
    let spec = build_spec(&args.style)?;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;

    let session = signet::RenderSession::new();
    let outcome = pollster::block_on(session.submit(bytes, spec))
        .with_context(|| format!("sign '{}'", args.in_path.display()))?;
    let Some(image) = outcome.image() else {
        anyhow::bail!("render was superseded (bug)");
    };

    let out = args
        .out
        .unwrap_or_else(|| default_out_path(&args.in_path));
    image.write_png(&out)?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_place(args: PlaceArgs) -> anyhow::Result<()> {
    let spec = build_spec(&args.style)?;
    let size = signet::ImageSize::new(args.width, args.height);
    if size.width == 0 || size.height == 0 {
        anyhow::bail!("image dimensions must be >= 1");
    }

    let mut compositor = signet::Compositor::new();
    let report = match compositor.plan(size, &spec)? {
        None => serde_json::json!({ "text": serde_json::Value::Null }),
        Some(plan) => serde_json::json!({
            "text": plan.signature.text,
            "font_size_px": plan.signature.font_size_px,
            "padding_px": plan.signature.padding_px,
            "opacity": plan.signature.opacity,
            "color": plan.signature.color,
            "placement": plan.placement,
        }),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
