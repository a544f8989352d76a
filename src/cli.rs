//! Command tree and generation orchestration.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use qrgen::formats::{VCard, WifiNetwork};
use qrgen::terminal::{render_terminal, TerminalOptions};
use qrgen::{decode, output, raster, vector, Ecc, Options, OutputFormat, Rgb};

use crate::config::{self, FileConfig};

#[derive(Debug, Parser)]
#[command(
    name = "qrgen",
    version,
    about = "Generate QR codes from the terminal",
    long_about = "qrgen is a fast, minimal CLI for generating QR codes.\n\n\
Examples:\n\
  qrgen \"https://example.com\"              # Output to qr.png\n\
  qrgen \"Hello world\" -o hello.png         # Custom output path\n\
  echo \"secret\" | qrgen -o secret.png      # Read from stdin\n\
  qrgen \"https://example.com\" --terminal   # Render in terminal\n\
  qrgen \"https://example.com\" --open       # Open in viewer"
)]
pub struct Cli {
    /// Data to encode; read from stdin when omitted
    data: Option<String>,

    #[command(flatten)]
    output: OutputArgs,

    /// Config file path
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate QR code for WiFi network connection
    Wifi(WifiArgs),
    /// Generate QR code for contact card
    Vcard(VcardArgs),
    /// Generate QR codes from a file of data (one per line)
    Batch(BatchArgs),
    /// Decode QR code(s) from an image
    Decode(DecodeArgs),
}

#[derive(Debug, Clone, Args)]
struct OutputArgs {
    /// Output file path
    #[arg(short, long, env = "QR_OUTPUT")]
    output: Option<PathBuf>,

    /// Image size in pixels
    #[arg(short, long, env = "QR_SIZE")]
    size: Option<u32>,

    /// Output format: png, svg, terminal
    #[arg(short, long, env = "QR_FORMAT")]
    format: Option<String>,

    /// Error correction: L, M, Q, H
    #[arg(short, long, env = "QR_LEVEL")]
    level: Option<String>,

    /// Foreground color (hex)
    #[arg(long, env = "QR_FG")]
    fg: Option<String>,

    /// Background color (hex)
    #[arg(long, env = "QR_BG")]
    bg: Option<String>,

    /// Border size in modules
    #[arg(long, env = "QR_BORDER")]
    border: Option<u32>,

    /// Path to logo image to overlay
    #[arg(long, env = "QR_LOGO")]
    logo: Option<PathBuf>,

    /// Logo size as fraction of QR (0.05-0.4)
    #[arg(long, env = "QR_LOGO_SCALE")]
    logo_scale: Option<f64>,

    /// Invert terminal rendering colors
    #[arg(long, env = "QR_INVERT")]
    invert: bool,

    /// Use ANSI colors when rendering in terminal
    #[arg(long = "terminal-color", env = "QR_TERMINAL_COLOR")]
    terminal_color: bool,

    /// Render in terminal
    #[arg(short, long, env = "QR_TERMINAL")]
    terminal: bool,

    /// Open in system viewer
    #[arg(long, env = "QR_OPEN")]
    open: bool,

    /// Copy to clipboard
    #[arg(long, env = "QR_COPY")]
    copy: bool,

    /// Suppress non-error output
    #[arg(short, long, env = "QR_QUIET")]
    quiet: bool,
}

#[derive(Debug, Args)]
struct WifiArgs {
    /// Network name (required)
    #[arg(long)]
    ssid: Option<String>,

    /// Network password
    #[arg(long)]
    pass: Option<String>,

    /// Security type: WPA, WEP, nopass
    #[arg(long)]
    security: Option<String>,

    /// Network is hidden
    #[arg(long)]
    hidden: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct VcardArgs {
    /// Full name (required)
    #[arg(long)]
    name: Option<String>,

    /// Phone number
    #[arg(long)]
    phone: Option<String>,

    /// Email address
    #[arg(long)]
    email: Option<String>,

    /// Organization
    #[arg(long)]
    org: Option<String>,

    /// Job title
    #[arg(long)]
    title: Option<String>,

    /// Website URL
    #[arg(long)]
    url: Option<String>,

    /// Street address
    #[arg(long)]
    address: Option<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Debug, Args)]
struct BatchArgs {
    /// Input file with data (one per line, required)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Image size in pixels
    #[arg(short, long)]
    size: Option<u32>,

    /// Output format: png, svg
    #[arg(long)]
    format: Option<String>,

    /// Filename prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Args)]
struct DecodeArgs {
    /// Image file to decode
    image: Option<PathBuf>,

    /// Image file to decode
    #[arg(short, long)]
    file: Option<PathBuf>,
}

/// A fully merged generation request: flags over environment over config
/// file over defaults.
#[derive(Debug, Clone)]
struct RenderRequest {
    opts: Options,
    format: OutputFormat,
    /// Whether the format came from the flag/environment rather than the
    /// config file; only a non-explicit format yields to the output
    /// path's extension.
    explicit_format: bool,
    output: Option<PathBuf>,
    terminal: bool,
    term_color: bool,
    invert: bool,
    open: bool,
    copy: bool,
    quiet: bool,
}

impl RenderRequest {
    fn resolve(args: &OutputArgs, cfg: &FileConfig) -> anyhow::Result<RenderRequest> {
        let size = args.size.or(cfg.size).unwrap_or(256);
        if size == 0 {
            return Err(qrgen::Error::InvalidCanvasSize.into());
        }

        let border = match args.border {
            Some(b) => b,
            // Config values are untyped; negative or oversized borders are
            // rejected rather than wrapped.
            None => u32::try_from(cfg.border.unwrap_or(4))
                .map_err(|_| qrgen::Error::InvalidBorder)?,
        };

        let foreground: Rgb = args.fg.as_deref().or(cfg.fg.as_deref()).unwrap_or("#000000").parse()?;
        let background: Rgb = args.bg.as_deref().or(cfg.bg.as_deref()).unwrap_or("#ffffff").parse()?;
        let level = Ecc::parse(args.level.as_deref().or(cfg.level.as_deref()).unwrap_or("M"));

        let logo_path = args
            .logo
            .clone()
            .or_else(|| cfg.logo.clone())
            .filter(|p| !p.as_os_str().is_empty());
        let logo_scale = args.logo_scale.or(cfg.logo_scale).unwrap_or(0.2);

        let explicit_format = args.format.is_some();
        let format: OutputFormat = args
            .format
            .as_deref()
            .or(cfg.format.as_deref())
            .unwrap_or("png")
            .parse()?;

        let output = args
            .output
            .clone()
            .or_else(|| cfg.output.clone())
            .filter(|p| !p.as_os_str().is_empty());

        Ok(RenderRequest {
            opts: Options {
                size,
                level,
                foreground,
                background,
                border,
                logo_path,
                logo_scale,
            },
            format,
            explicit_format,
            output,
            terminal: args.terminal || cfg.terminal.unwrap_or(false),
            term_color: args.terminal_color || cfg.terminal_color.unwrap_or(false),
            invert: args.invert || cfg.invert.unwrap_or(false),
            open: args.open || cfg.open.unwrap_or(false),
            copy: args.copy || cfg.copy.unwrap_or(false),
            quiet: args.quiet || cfg.quiet.unwrap_or(false),
        })
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Some(Command::Wifi(args)) => run_wifi(args, &cfg),
        Some(Command::Vcard(args)) => run_vcard(args, &cfg),
        Some(Command::Batch(args)) => run_batch(args, &cfg),
        Some(Command::Decode(args)) => run_decode(&args),
        None => {
            let data = match cli.data {
                Some(data) => data,
                None => read_stdin()?,
            };
            let request = RenderRequest::resolve(&cli.output, &cfg)?;
            run_generate(&data, &request)
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(input.trim().to_string())
}

fn run_generate(data: &str, request: &RenderRequest) -> anyhow::Result<()> {
    if data.trim().is_empty() {
        return Err(qrgen::Error::EmptyInput.into());
    }

    let mut format = request.format;
    if !request.explicit_format {
        if let Some(inferred) = request.output.as_deref().and_then(OutputFormat::from_extension) {
            format = inferred;
        }
    }

    let terminal_mode = request.terminal || format == OutputFormat::Terminal;
    if !terminal_mode && (request.invert || request.term_color) {
        bail!("terminal color/invert requires --terminal or --format terminal");
    }

    if terminal_mode {
        if request.opts.logo_path.is_some() {
            bail!("logo overlay is not supported for terminal rendering");
        }
        if request.copy {
            bail!("clipboard output is not supported for terminal rendering");
        }
        let art = render_terminal(
            data,
            &request.opts,
            TerminalOptions {
                use_color: request.term_color,
                invert: request.invert,
            },
        )?;
        print!("{art}");
        return Ok(());
    }

    let out_path = request
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("qr.{}", format.extension())));

    let payload = if format == OutputFormat::Svg {
        vector::render_svg(data, &request.opts)?
    } else {
        raster::render_png(data, &request.opts)?
    };

    output::write_file(&out_path, &payload)?;
    if !request.quiet {
        println!("✓ QR code saved to {}", out_path.display());
    }

    if request.copy {
        if format == OutputFormat::Svg {
            output::copy_text(std::str::from_utf8(&payload)?)?;
        } else {
            output::copy_png(&payload)?;
        }
    }

    if request.open {
        output::open_in_viewer(&out_path).context("failed to open viewer")?;
    }

    Ok(())
}

fn run_wifi(args: WifiArgs, cfg: &FileConfig) -> anyhow::Result<()> {
    let ssid = args.ssid.or_else(|| cfg.wifi.ssid.clone()).unwrap_or_default();
    if ssid.is_empty() {
        bail!("ssid is required");
    }

    let mut password = args.pass.or_else(|| cfg.wifi.pass.clone()).unwrap_or_default();
    let requested = args
        .security
        .or_else(|| cfg.wifi.security.clone())
        .unwrap_or_else(|| "WPA".to_string());
    let security = match requested.trim().to_ascii_uppercase().as_str() {
        "NOPASS" => {
            password.clear();
            "nopass".to_string()
        }
        "WPA" => "WPA".to_string(),
        "WEP" => "WEP".to_string(),
        _ => bail!("invalid security type: {requested}"),
    };

    let data = WifiNetwork {
        ssid,
        password,
        security,
        hidden: args.hidden || cfg.wifi.hidden.unwrap_or(false),
    }
    .to_string();

    let request = RenderRequest::resolve(&args.output, cfg)?;
    run_generate(&data, &request)
}

fn run_vcard(args: VcardArgs, cfg: &FileConfig) -> anyhow::Result<()> {
    let name = args.name.or_else(|| cfg.vcard.name.clone()).unwrap_or_default();
    if name.is_empty() {
        bail!("name is required");
    }

    let pick = |arg: Option<String>, fallback: &Option<String>| {
        arg.or_else(|| fallback.clone()).unwrap_or_default()
    };
    let data = VCard {
        name,
        phone: pick(args.phone, &cfg.vcard.phone),
        email: pick(args.email, &cfg.vcard.email),
        org: pick(args.org, &cfg.vcard.org),
        title: pick(args.title, &cfg.vcard.title),
        url: pick(args.url, &cfg.vcard.url),
        address: pick(args.address, &cfg.vcard.address),
    }
    .to_string();

    let request = RenderRequest::resolve(&args.output, cfg)?;
    run_generate(&data, &request)
}

fn run_batch(args: BatchArgs, cfg: &FileConfig) -> anyhow::Result<()> {
    let file = args
        .file
        .or_else(|| cfg.batch.file.clone())
        .context("input file is required")?;
    let dir = args
        .dir
        .or_else(|| cfg.batch.dir.clone())
        .unwrap_or_else(|| PathBuf::from("./qr-output"));
    let size = args.size.or(cfg.batch.size).unwrap_or(256);
    if size == 0 {
        return Err(qrgen::Error::InvalidCanvasSize.into());
    }

    let format: OutputFormat = args
        .format
        .as_deref()
        .or(cfg.batch.format.as_deref())
        .unwrap_or("png")
        .parse()?;
    if format == OutputFormat::Terminal {
        return Err(qrgen::Error::UnsupportedFormat("terminal".to_string()).into());
    }

    let prefix = args
        .prefix
        .or_else(|| cfg.batch.prefix.clone())
        .unwrap_or_else(|| "qr-".to_string());
    let quiet = args.quiet || cfg.batch.quiet.unwrap_or(false);

    let text = fs::read_to_string(&file)
        .with_context(|| format!("failed to read input file {}", file.display()))?;
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    if lines.is_empty() {
        bail!("no data found in input file");
    }

    fs::create_dir_all(&dir)?;

    let opts = Options { size, ..Options::default() };
    for (i, line) in lines.iter().enumerate() {
        let payload = if format == OutputFormat::Svg {
            vector::render_svg(line, &opts)
        } else {
            raster::render_png(line, &opts)
        }
        .with_context(|| format!("line {}", i + 1))?;

        let filename = format!("{prefix}{:03}.{}", i + 1, format.extension());
        output::write_file(dir.join(filename), &payload)?;
    }

    if !quiet {
        println!("✓ Generated {} QR codes in {}", lines.len(), dir.display());
    }

    Ok(())
}

fn run_decode(args: &DecodeArgs) -> anyhow::Result<()> {
    let path = args
        .image
        .as_ref()
        .or(args.file.as_ref())
        .context("image file is required")?;

    for payload in decode::decode_file(path)? {
        println!("{payload}");
    }

    Ok(())
}
