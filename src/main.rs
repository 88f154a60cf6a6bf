//! syslog-view - Entry Point

use clap::Parser;
use std::path::PathBuf;
use syslog_view::channel::connect_tcp;
use syslog_view::host::{DirectorySaver, Osc52Clipboard};
use syslog_view::view::{ColorConfig, Styles, TuiApp};
use syslog_view::App;
use tracing::info;

/// Live, filterable, paginated syslog viewer
#[derive(Parser, Debug)]
#[command(name = "syslog-view")]
#[command(version)]
#[command(about = "Terminal client for a syslog server speaking newline-delimited JSON")]
pub struct Args {
    /// Server address (host:port)
    pub server: String,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for saved entries (defaults to the downloads directory)
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → config file → env vars
    let config = syslog_view::config::load_config(args.config.clone())?;
    syslog_view::logging::init(&config.log_file_path)?;
    info!(server = %args.server, ?config, "starting");

    let saver = match args.save_dir {
        Some(dir) => DirectorySaver::new(dir),
        None => DirectorySaver::downloads().unwrap_or_else(|| DirectorySaver::new(".")),
    };

    let colors = if args.no_color {
        ColorConfig::new(false)
    } else {
        ColorConfig::from_env()
    };

    let channel = connect_tcp(&args.server)?;
    let app = App::new(config, channel, Osc52Clipboard::stdout(), saver)
        .with_styles(Styles::new(colors));

    TuiApp::new(app)?.run()?;
    info!("exiting");
    Ok(())
}
