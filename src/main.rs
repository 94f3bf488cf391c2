//! Bowl Table entry point
//!
//! Opens the window, then runs the game loop until the window is closed.

use std::process::ExitCode;

use bowl_table::logging::{LoggingConfig, init_logging};
use bowl_table::platform::WinitBackend;
use bowl_table::{Tuning, run};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());
    log::info!("Bowl Table starting...");

    let tuning = Tuning::default();
    let result = WinitBackend::new(&tuning).and_then(|backend| run(backend, &tuning));

    match result {
        Ok(()) => {
            log::info!("Bye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
