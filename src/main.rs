use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use goldrate_cli::dispatcher::{Dispatcher, Outcome};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "goldrate-cli")]
#[command(about = "Query the gold rate prediction service")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Predict the 24K gold rate and USD/INR rate for one date.
    Point {
        /// Target date in YYYY-MM-DD format. Defaults to today.
        #[arg(value_name = "DATE")]
        date: Option<String>,
    },
    /// Predict rates over a date range and save the plot image.
    Range {
        /// Range start in YYYY-MM-DD format.
        #[arg(value_name = "START_DATE")]
        start_date: String,
        /// Range end in YYYY-MM-DD format.
        #[arg(value_name = "END_DATE")]
        end_date: String,
    },
}

fn today_string() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goldrate_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    match Dispatcher::new() {
        Ok(dispatcher) => {
            let outcome = match args.command {
                Command::Point { date } => {
                    let date = date.unwrap_or_else(today_string);
                    info!("Requesting point prediction for {}", date);
                    dispatcher.submit_point_prediction(&date).await
                }
                Command::Range {
                    start_date,
                    end_date,
                } => {
                    info!("Requesting range prediction {} to {}", start_date, end_date);
                    dispatcher
                        .submit_range_prediction(&start_date, &end_date)
                        .await
                }
            };

            match outcome {
                Outcome::Rendered => Ok(()),
                Outcome::Rejected => std::process::exit(2),
                Outcome::Failed => std::process::exit(1),
            }
        }
        Err(e) => {
            error!("Failed to initialize dispatcher: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliArgs, Command, today_string};
    use clap::Parser;

    #[test]
    fn test_point_date_is_optional() {
        let args = CliArgs::try_parse_from(["goldrate-cli", "point"]).unwrap();
        assert!(matches!(args.command, Command::Point { date: None }));

        let args = CliArgs::try_parse_from(["goldrate-cli", "point", "2026-08-06"]).unwrap();
        match args.command {
            Command::Point { date } => assert_eq!(date.as_deref(), Some("2026-08-06")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_range_requires_both_dates() {
        assert!(CliArgs::try_parse_from(["goldrate-cli", "range", "2026-08-01"]).is_err());

        let args =
            CliArgs::try_parse_from(["goldrate-cli", "range", "2026-08-01", "2026-08-31"]).unwrap();
        match args.command {
            Command::Range {
                start_date,
                end_date,
            } => {
                assert_eq!(start_date, "2026-08-01");
                assert_eq!(end_date, "2026-08-31");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_today_string_shape() {
        let today = today_string();
        assert_eq!(today.len(), 10);
        assert_eq!(today.as_bytes()[4], b'-');
        assert_eq!(today.as_bytes()[7], b'-');
    }
}
