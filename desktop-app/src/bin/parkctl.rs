use std::{path::PathBuf, process::ExitCode};

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use color_eyre::Result;
use log::debug;

use parking_desk::{
    config::{ServerArgs, Settings},
    form::{EntryForm, ExitForm},
    grid::{slot_grid, text_rows},
    logging,
    notice::{self, Notice, Tone},
    Client,
};
use shared::data::{Reply, VehicleType};

const SLOTS_PER_LINE: usize = 6;

/// Parks and releases vehicles from the command line.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    server: ServerArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show how many slots are taken.
    Status {
        /// Also draw every slot.
        #[arg(long)]
        grid: bool,
    },
    /// Park a vehicle.
    Entry {
        number: String,
        /// One of car, bike, ev or heavy.
        #[arg(long, default_value = "car")]
        vtype: VehicleType,
        /// Prefer a VIP slot.
        #[arg(long)]
        vip: bool,
    },
    /// Release a vehicle and show its fee.
    Exit {
        number: String,
        /// Show how the fee was calculated.
        #[arg(long)]
        details: bool,
    },
    /// Show the revenue summary of a day.
    Revenue {
        /// Day to summarise as YYYY-MM-DD. Defaults to the server's today.
        #[arg(long)]
        date: Option<NaiveDate>,
        /// List every vehicle of that day.
        #[arg(long)]
        records: bool,
    },
    /// Download today's PDF report.
    Report {
        /// Where to store the report.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.server.debug)?;

    let client = Client::new(Settings::from(&cli.server))?;
    run(&client, cli.command).await
}

async fn run(client: &Client, command: Command) -> Result<ExitCode> {
    let code = match command {
        Command::Status { grid } => {
            let outcome = client.status().await;
            if grid {
                if let Ok(status) = &outcome {
                    for line in text_rows(&slot_grid(status), SLOTS_PER_LINE) {
                        println!("{line}");
                    }
                }
            }
            show(&notice::status(&outcome))
        }
        Command::Entry { number, vtype, vip } => {
            let request = EntryForm { number, vtype, vip }.to_request();
            let outcome = client.enter(&request).await;
            show(&notice::entry(&request.number, &outcome))
        }
        Command::Exit { number, details } => {
            let request = ExitForm { number }.to_request();
            let outcome = client.exit(&request).await;
            let code = show(&notice::exit(&outcome));
            if let (true, Ok(Reply::Accepted(record))) = (details, &outcome) {
                if let Some(charge) = &record.charge_meta {
                    println!("Parked for {:.2} hours", charge.duration_hours);
                    println!(
                        "Charged hours: {} ({} beyond the base period)",
                        charge.charged_hours, charge.extra_hours
                    );
                    println!("Vehicle type multiplier: {}", charge.multiplier);
                }
            }
            code
        }
        Command::Revenue { date, records } => {
            let outcome = client.revenue(date).await;
            let code = show(&notice::revenue(&outcome));
            if let (true, Ok(Reply::Accepted(summary))) = (records, &outcome) {
                for record in &summary.records {
                    println!(
                        "{:>4}  {:<14} {:<6} {:<16} {:<16} ₹ {:.2}",
                        record.slot,
                        record.vehicle_number,
                        record.vtype.to_uppercase(),
                        short_time(record.entry.as_deref().unwrap_or_default()),
                        short_time(record.exit.as_deref().unwrap_or("Pending")),
                        record.fee
                    );
                }
            }
            code
        }
        Command::Report { output } => {
            let path = output.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "daily_report_{}.pdf",
                    Local::now().date_naive().format("%Y-%m-%d")
                ))
            });
            match client.save_daily_report(&path).await {
                Ok(size) => {
                    debug!("Report is {size} bytes");
                    show(&Notice::success(format!(
                        "Saved daily report to {}",
                        path.display()
                    )))
                }
                Err(err) => show(&Notice::failure(&err)),
            }
        }
    };

    Ok(code)
}

/// Prints a notice where it belongs. The cause of a failure has already been logged.
fn show(notice: &Notice) -> ExitCode {
    match notice.tone {
        Tone::Danger => {
            eprintln!("{}", notice.text);
            ExitCode::FAILURE
        }
        Tone::Pending | Tone::Success | Tone::Info => {
            println!("{}", notice.text);
            ExitCode::SUCCESS
        }
    }
}

/// Timestamps come as ISO 8601. Minutes are precise enough for a listing.
fn short_time(timestamp: &str) -> &str {
    timestamp.get(..16).unwrap_or(timestamp)
}
