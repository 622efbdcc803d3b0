use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

use farecast::config::Config;
use farecast::entities::TripForm;
use farecast::error::Error;
use farecast::view::TerminalView;
use farecast::Widget;

/// Fare and route estimates for a trip.
#[derive(Parser)]
#[command(name = "farecast", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the fare for one trip and draw its route
    Estimate {
        /// Pickup location
        #[arg(long)]
        origin: String,

        /// Drop-off location
        #[arg(long)]
        destination: String,

        /// Economy or Premium
        #[arg(long, default_value = "Economy")]
        vehicle: String,

        /// Riders currently looking for a trip
        #[arg(long, default_value = "60")]
        riders: String,

        /// Drivers currently available
        #[arg(long, default_value = "25")]
        drivers: String,
    },

    /// Fill in the form on stdin, one estimate per completed form
    Interactive,

    /// Suggest places for a partially typed location
    Suggest {
        /// Text typed so far
        input: String,
    },

    /// Check that the fare-prediction service is up
    Health,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<(), Error> {
    let config = Config::from_env()?;
    let widget = Widget::from_config(config, Arc::new(TerminalView::stdout()))?;

    match command {
        Commands::Estimate {
            origin,
            destination,
            vehicle,
            riders,
            drivers,
        } => {
            let form = TripForm {
                origin,
                destination,
                vehicle,
                riders,
                drivers,
            };
            widget.submit_estimate(form).await?;
        }
        Commands::Interactive => interactive(&widget).await?,
        Commands::Suggest { input } => {
            for suggestion in widget.suggest(&input).await? {
                println!("{}  ({})", suggestion.description, suggestion.place_id);
            }
        }
        Commands::Health => {
            let health = widget.check_backend().await?;
            println!(
                "status: {}, maps key configured: {}",
                health.status, health.google_api_key
            );
        }
    }

    Ok(())
}

async fn interactive(widget: &Widget) -> Result<(), Error> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(origin) = prompt(&mut lines, "Pickup", "").await else {
            return Ok(());
        };
        let Some(destination) = prompt(&mut lines, "Destination", "").await else {
            return Ok(());
        };
        let Some(vehicle) = prompt(&mut lines, "Vehicle", "Economy").await else {
            return Ok(());
        };
        let Some(riders) = prompt(&mut lines, "Riders", "60").await else {
            return Ok(());
        };
        let Some(drivers) = prompt(&mut lines, "Drivers", "25").await else {
            return Ok(());
        };

        let form = TripForm {
            origin,
            destination,
            vehicle,
            riders,
            drivers,
        };

        // the widget already told the user what went wrong
        let _ = widget.submit_estimate(form).await;
    }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str, default: &str) -> Option<String> {
    let mut stdout = tokio::io::stdout();
    let text = if default.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, default)
    };
    let _ = stdout.write_all(text.as_bytes()).await;
    let _ = stdout.flush().await;

    match lines.next_line().await {
        Ok(Some(line)) if line.trim().is_empty() => Some(default.to_string()),
        Ok(Some(line)) => Some(line),
        Ok(None) => None,
        Err(err) => {
            tracing::error!("failed to read stdin: {}", err);
            None
        }
    }
}
