use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use iced::Application;

use parking_desk::{
    config::{ServerArgs, Settings},
    gui::ParkingDesk,
    logging, Client,
};

/// Desk window for parking and releasing vehicles.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    #[command(flatten)]
    server: ServerArgs,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    logging::init(args.server.debug)?;

    let client = Client::new(Settings::from(&args.server))?;
    ParkingDesk::run(iced::Settings::with_flags(client))
        .map_err(|err| eyre!("The desk window closed unexpectedly: {err}"))
}
