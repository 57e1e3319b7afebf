use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halftone_core::{RenderConfig, VectorRecorder};
use halftone_studio::media;
use halftone_studio::models::{settings_code, AppConfig, SettingsJson};
use halftone_studio::rendering::{to_svg, DotShape, OutputFormat, RasterCanvas};
use halftone_studio::server;
use halftone_studio::services::{write_frames, Exporter, Slot, Studio};

#[derive(Parser)]
#[command(name = "halftone")]
#[command(about = "Halftone Studio - halftone dot rendering and frame export")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Render one frame to a PNG or SVG file
    Render {
        /// Primary image, or a directory of frames
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Secondary image or frame directory (secondary color modes)
        #[arg(short, long)]
        secondary: Option<PathBuf>,

        /// Settings code (defaults to config default_settings)
        #[arg(short, long)]
        code: Option<String>,

        /// Output format (inferred from the output extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Custom dot shape (PNG or SVG), raster output only
        #[arg(long)]
        shape: Option<PathBuf>,

        /// Seek frame sequences to this time in seconds
        #[arg(long, default_value_t = 0.0)]
        time: f64,

        /// Seed for noise dithering and noise colors
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Export consecutive frames as SVG files
    Export {
        /// Primary image, or a directory of frames
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Secondary image or frame directory
        #[arg(short, long)]
        secondary: Option<PathBuf>,

        /// Number of frames to capture
        #[arg(short = 'n', long, default_value_t = 30)]
        frames: usize,

        /// Synthetic frame rate (defaults to config export_fps)
        #[arg(long)]
        fps: Option<f64>,

        /// Settings code
        #[arg(short, long)]
        code: Option<String>,

        /// Seed for noise dithering and noise colors
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the live frame loop, rewriting a PNG preview
    Play {
        /// Primary image, or a directory of frames
        input: PathBuf,

        /// Preview PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Secondary image or frame directory
        #[arg(short, long)]
        secondary: Option<PathBuf>,

        /// Seconds to run (until Ctrl-C when omitted)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Settings code
        #[arg(short, long)]
        code: Option<String>,

        /// Custom dot shape (PNG or SVG)
        #[arg(long)]
        shape: Option<PathBuf>,

        /// Preview writes per second
        #[arg(long, default_value_t = 2.0)]
        preview_rate: f64,
    },
    /// Convert between settings codes and JSON
    Code {
        #[command(subcommand)]
        command: CodeCommand,
    },
}

#[derive(Subcommand)]
enum CodeCommand {
    /// Encode a JSON settings file ("-" for stdin) into a settings code
    Encode {
        /// JSON file path
        #[arg(default_value = "-")]
        input: String,
    },
    /// Decode a settings code into JSON
    Decode {
        /// Settings code
        code: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Render {
            input,
            output,
            secondary,
            code,
            format,
            shape,
            time,
            seed,
        }) => {
            init_cli_tracing();
            run_render_command(RenderArgs {
                input,
                output,
                secondary,
                code,
                format,
                shape,
                time,
                seed,
            })
            .await
        }
        Some(Commands::Export {
            input,
            output,
            secondary,
            frames,
            fps,
            code,
            seed,
        }) => {
            init_cli_tracing();
            run_export_command(&input, &output, secondary.as_deref(), frames, fps, code, seed).await
        }
        Some(Commands::Play {
            input,
            output,
            secondary,
            duration,
            code,
            shape,
            preview_rate,
        }) => {
            init_cli_tracing();
            run_play_command(
                &input,
                &output,
                secondary.as_deref(),
                duration,
                code,
                shape.as_deref(),
                preview_rate,
            )
            .await
        }
        Some(Commands::Code { command }) => {
            init_cli_tracing();
            run_code_command(command)
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halftone_studio=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Resolve the render configuration from a code or the config default.
fn resolve_config(app: &AppConfig, code: Option<&str>) -> anyhow::Result<RenderConfig> {
    match code {
        Some(code) => settings_code::decode(code)
            .map_err(|e| anyhow::anyhow!("Invalid settings code: {e}")),
        None => Ok(app.default_render_config()),
    }
}

fn build_studio(
    app: &AppConfig,
    config: RenderConfig,
    seed: Option<u64>,
    input: &Path,
    secondary: Option<&Path>,
) -> anyhow::Result<Studio> {
    let mut studio = match seed {
        Some(seed) => Studio::seeded(app, config, seed),
        None => Studio::new(app, config),
    };
    studio.load(Slot::Primary, media::open(input, app.export_fps)?);
    if let Some(secondary) = secondary {
        studio.load(Slot::Secondary, media::open(secondary, app.export_fps)?);
    }
    Ok(studio)
}

fn load_shape(path: Option<&Path>) -> anyhow::Result<Option<DotShape>> {
    path.map(|path| {
        let data = std::fs::read(path)?;
        DotShape::from_bytes(&data).map_err(|e| anyhow::anyhow!("Dot shape {}: {e}", path.display()))
    })
    .transpose()
}

struct RenderArgs {
    input: PathBuf,
    output: PathBuf,
    secondary: Option<PathBuf>,
    code: Option<String>,
    format: Option<OutputFormat>,
    shape: Option<PathBuf>,
    time: f64,
    seed: Option<u64>,
}

/// Render one frame to a file (no server needed)
async fn run_render_command(args: RenderArgs) -> anyhow::Result<()> {
    let app = AppConfig::from_env();
    let config = resolve_config(&app, args.code.as_deref())?;
    let mut studio = build_studio(
        &app,
        config,
        args.seed,
        &args.input,
        args.secondary.as_deref(),
    )?;

    if args.time > 0.0 {
        let exporter = Exporter::new(app.export_fps, app.seek_timeout())?;
        studio.suspend();
        exporter.seek_to(&mut studio, args.time).await;
    }

    let format = format_for(&args.output, args.format);
    let bytes = match format {
        OutputFormat::Png => {
            let mut canvas = RasterCanvas::new();
            canvas.set_shape(load_shape(args.shape.as_deref())?);
            let dots = studio.recompute_frame(&mut canvas)?;
            tracing::info!(dots, "Frame rendered");
            canvas.to_png()?
        }
        OutputFormat::Svg => {
            if args.shape.is_some() {
                tracing::warn!("Dot shapes apply to raster output only, ignoring --shape");
            }
            let mut recorder = VectorRecorder::new();
            studio.recompute_frame(&mut recorder)?;
            to_svg(&recorder).into_bytes()
        }
    };

    std::fs::write(&args.output, &bytes)?;
    println!("Rendered {} ({} bytes)", args.output.display(), bytes.len());
    Ok(())
}

fn format_for(output: &Path, explicit: Option<OutputFormat>) -> OutputFormat {
    explicit.unwrap_or_else(|| {
        match output.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Png,
        }
    })
}

/// Export consecutive SVG frames into a directory
async fn run_export_command(
    input: &Path,
    output: &Path,
    secondary: Option<&Path>,
    frames: usize,
    fps: Option<f64>,
    code: Option<String>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let app = AppConfig::from_env();
    let config = resolve_config(&app, code.as_deref())?;
    let mut studio = build_studio(&app, config, seed, input, secondary)?;

    let exporter = Exporter::new(fps.unwrap_or(app.export_fps), app.seek_timeout())?;
    let captured = exporter.export(&mut studio, frames).await?;
    let paths = write_frames(output, &captured)?;

    println!("Exported {} frames to {}", paths.len(), output.display());
    Ok(())
}

/// Drive the live loop and periodically write the current frame
async fn run_play_command(
    input: &Path,
    output: &Path,
    secondary: Option<&Path>,
    duration: Option<f64>,
    code: Option<String>,
    shape: Option<&Path>,
    preview_rate: f64,
) -> anyhow::Result<()> {
    let app = AppConfig::from_env();
    let config = resolve_config(&app, code.as_deref())?;
    let mut studio = build_studio(&app, config, None, input, secondary)?;
    let mut canvas = RasterCanvas::new();
    canvas.set_shape(load_shape(shape)?);

    let preview_every = Duration::from_secs_f64(1.0 / preview_rate.max(0.01));
    let deadline = duration.map(|d| Instant::now() + Duration::from_secs_f64(d.max(0.0)));
    let mut interval = tokio::time::interval(studio.clock().interval());
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last_preview: Option<Instant> = None;

    println!("Playing, preview at {} (Ctrl-C to stop)", output.display());
    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        let now = Instant::now();
        if deadline.is_some_and(|d| now >= d) {
            break;
        }
        studio.tick(now, &mut canvas)?;

        if last_preview.map_or(true, |t| now.duration_since(t) >= preview_every) {
            std::fs::write(output, canvas.to_png()?)?;
            last_preview = Some(now);
        }
    }

    std::fs::write(output, canvas.to_png()?)?;
    println!(
        "Stopped after {} frames, preview at {}",
        studio.clock().frames(),
        output.display()
    );
    Ok(())
}

fn run_code_command(command: CodeCommand) -> anyhow::Result<()> {
    match command {
        CodeCommand::Encode { input } => {
            let json = if input == "-" {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                std::fs::read_to_string(&input)?
            };
            let settings: SettingsJson = serde_json::from_str(&json)?;
            let code = settings_code::encode(&settings.into_config()?);
            println!("{code}");
        }
        CodeCommand::Decode { code } => {
            let config = settings_code::decode(&code)?;
            println!("{}", serde_json::to_string_pretty(&SettingsJson::from(&config))?);
        }
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Halftone Studio v{VERSION}");
    println!("Halftone dot rendering and frame export\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    let app = AppConfig::from_env();
    println!("\nConfiguration ({config_source}):");
    println!("  output width  {} px", app.output_width);
    println!("  export fps    {}", app.export_fps);
    println!("  tick rate     {} Hz", app.tick_rate);
    println!("  seek timeout  {} ms", app.seek_timeout_ms);

    println!("\nCommands:");
    println!("  halftone serve    Start the HTTP server");
    println!("  halftone render   Render one frame to PNG or SVG");
    println!("  halftone export   Export SVG frames");
    println!("  halftone play     Run the live frame loop");
    println!("  halftone code     Convert settings codes");
    println!("\nRun 'halftone --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halftone_studio=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let config = AppConfig::from_env();
    tracing::info!(
        output_width = config.output_width,
        default_settings = config.default_settings.is_some(),
        "Configuration ready"
    );

    let app = server::build_router(server::create_app_state(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Halftone server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
