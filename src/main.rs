// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use geosnap::app::AppModel;
use geosnap::backends::camera::types::Facing;
use geosnap::i18n;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "geosnap")]
#[command(about = "Geotagged photo capture for the COSMIC desktop")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Capture a photo and submit it with the current position
    Snap {
        /// Camera facing direction to capture from
        #[arg(short, long, value_enum, default_value = "back")]
        facing: FacingArg,

        /// Submission endpoint base URL (overrides the configured one)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Also save the captured JPEG locally (default: ~/Pictures/geosnap)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Capture and save without geolocating or submitting
        #[arg(long)]
        no_submit: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FacingArg {
    Front,
    Back,
}

impl From<FacingArg> for Facing {
    fn from(arg: FacingArg) -> Self {
        match arg {
            FacingArg::Front => Facing::Front,
            FacingArg::Back => Facing::Back,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=geosnap=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => cli::list_cameras(),
        Some(Commands::Snap {
            facing,
            endpoint,
            output,
            no_submit,
        }) => cli::snap(facing.into(), endpoint, output, no_submit),
        None => run_gui(),
    }
}

fn run_gui() -> Result<(), Box<dyn std::error::Error>> {
    // Get the system's preferred languages.
    let requested_languages = i18n_embed::DesktopLanguageRequester::requested_languages();

    // Enable localizations to be applied.
    i18n::init(&requested_languages);

    // Settings for configuring the application window and iced runtime.
    let settings = cosmic::app::Settings::default().size_limits(
        cosmic::iced::Limits::NONE
            .min_width(360.0)
            .min_height(240.0),
    );

    // Starts the application's event loop with `()` as the application's flags.
    cosmic::app::run::<AppModel>(settings, ())?;

    Ok(())
}
