//! Bulletin CLI
//!
//! - `serve`: run the HTTP server
//! - `render`: load the widgets once and print the page or one widget
//! - `config`: print a default config file

use anyhow::Context;
use bulletin::api::{self, AppState};
use bulletin::config::{generate_default_config, Config, LoadedConfig, LoggingConfig};
use bulletin::render;
use bulletin::sources::{DataSource, HttpSource};
use bulletin::widgets::nav::Navigation;
use bulletin::widgets::{finance, news, weather, Dashboard, WidgetSettings, SECTION_IDS};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bulletin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Landing page with live weather, news and market widgets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Render once and print the HTML
    Render {
        /// Only render one widget container
        #[arg(short, long)]
        widget: Option<Widget>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Widget {
    Weather,
    News,
    Finance,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bulletin={},tower_http=info", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Resolve the config without logging; the outcome is reported once tracing is up
fn load_config(path: Option<&PathBuf>) -> anyhow::Result<LoadedConfig> {
    match path {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            Ok(LoadedConfig {
                config,
                path: Some(path.clone()),
                skipped: Vec::new(),
            })
        }
        None => Ok(Config::load_first(&Config::default_paths())),
    }
}

async fn render_once(
    source: &dyn DataSource,
    config: &Config,
    widget: Option<Widget>,
) -> anyhow::Result<String> {
    let settings = WidgetSettings::from(config);

    let html = match widget {
        Some(Widget::Weather) => {
            let panel =
                weather::load(source, &settings.location_name, settings.coordinates).await;
            render::weather(&panel)?
        }
        Some(Widget::News) => render::news(&news::load(source, &settings.feeds).await)?,
        Some(Widget::Finance) => {
            render::finance(&finance::load(source, &settings.finance).await)?
        }
        None => {
            let navigation = Navigation::new(config.navigation.links.clone(), SECTION_IDS);
            let dashboard = Dashboard::load(source, &settings).await;
            render::page(&config.server.site_title, &navigation, &dashboard)?
        }
    };

    Ok(html)
}

fn write_default_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Load config, start logging and build the upstream client
fn bootstrap(path: Option<&PathBuf>) -> anyhow::Result<(Config, Arc<HttpSource>)> {
    let loaded = load_config(path)?;
    init_tracing(&loaded.config.logging);
    loaded.log();

    let config = loaded.config;
    let source = Arc::new(HttpSource::new(config.upstream.clone())?);
    Ok((config, source))
}

async fn serve(path: Option<&PathBuf>, port: Option<u16>) -> anyhow::Result<()> {
    let (mut config, source) = bootstrap(path)?;
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Bulletin v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Location: {} ({}, {})",
        config.location.name,
        config.location.latitude,
        config.location.longitude
    );
    tracing::info!("News feeds: {}", config.news.feeds.len());

    let state = AppState::new(source, &config);
    api::serve(state, &config.server.addr()).await?;
    Ok(())
}

async fn render_command(
    path: Option<&PathBuf>,
    widget: Option<Widget>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (config, source) = bootstrap(path)?;
    let html = render_once(source.as_ref(), &config, widget).await?;

    match output {
        Some(path) => {
            std::fs::write(&path, html).with_context(|| format!("writing {}", path.display()))?
        }
        None => println!("{}", html),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_ref();

    match cli.command {
        Commands::Config { output } => write_default_config(output),
        Commands::Serve { port } => serve(config_path, port).await,
        Commands::Render { widget, output } => render_command(config_path, widget, output).await,
    }
}
