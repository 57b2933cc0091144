use log::SetLoggerError;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Sets up terminal logging for the desk. `--debug` turns on request logging.
///
/// # Errors
///
/// This function will return an error if a logger has already been set.
pub fn init(debug: bool) -> Result<(), SetLoggerError> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // Keep the renderer's own chatter out of the terminal.
    let config = ConfigBuilder::new()
        .add_filter_allow_str("parking_desk")
        .add_filter_allow_str("parkctl")
        .build();

    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}
