use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::OpenOptions,
    io::IsTerminal,
    path::{Path, PathBuf},
    sync::Mutex,
};
use sysdash::{
    config::{clamp_refresh, AppConfig},
    data::SysinfoCollector,
    layout::terminal_size,
    render_once,
    theme::Theme,
    tui::{self, Tui},
    widgets::graph::GraphStyle,
    App,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sysdash", version)]
#[command(about = "Live terminal dashboard for CPU, memory, disk, network, GPU and processes")]
struct Args {
    /// Render a single frame to stdout and exit
    #[arg(long)]
    once: bool,

    /// Seconds between refreshes (0.5 to 10)
    #[arg(short, long)]
    interval: Option<f64>,

    /// Color theme
    #[arg(long)]
    theme: Option<String>,

    /// Graph glyphs
    #[arg(long, value_enum)]
    graph_style: Option<GraphStyle>,

    /// Config file to load and save instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs here while the dashboard owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_logging(interactive: bool, log_file: Option<&Path>) -> Result<()> {
    match (interactive, log_file) {
        (_, Some(path)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The dashboard owns stdout and stderr; without a file, stay silent.
        (true, None) => {}
        (false, None) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn load_config(args: &Args) -> AppConfig {
    let mut config = AppConfig::load(args.config.as_deref());
    if let Some(interval) = args.interval {
        config.refresh_rate = clamp_refresh(interval);
    }
    if let Some(theme) = &args.theme {
        if Theme::index_of(theme).is_some() {
            config.theme = theme.clone();
        } else {
            let known: Vec<&str> = Theme::names().collect();
            tracing::warn!("unknown theme '{theme}', expected one of {}", known.join(", "));
        }
    }
    if let Some(style) = args.graph_style {
        config.graph_style = style;
    }
    config
}

fn print_once(config: &AppConfig) {
    let mut collector = SysinfoCollector::new();
    println!("{}", render_once(&mut collector, config, terminal_size()));
}

fn main() -> Result<()> {
    let args = Args::parse();
    let interactive =
        !args.once && std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    init_logging(interactive, args.log_file.as_deref())?;
    tracing::info!("sysdash v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args);
    if !interactive {
        print_once(&config);
        return Ok(());
    }

    tui::install_panic_hook();
    let terminal = match Tui::new() {
        Ok(terminal) => terminal,
        Err(err) => {
            tracing::warn!(error = %err, "no usable terminal, rendering once");
            print_once(&config);
            return Ok(());
        }
    };

    let app = App::new(SysinfoCollector::new(), config, args.config.clone());
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(app.run(terminal))?;
    Ok(())
}
