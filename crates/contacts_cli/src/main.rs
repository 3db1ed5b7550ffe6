//! Interactive contacts manager.
//!
//! # Responsibility
//! - Wire logging, store configuration and the menu shell over stdin/stdout.
//! - Exit with status 0 on normal termination.

mod shell;

use contacts_core::{ContactService, FileContactRepository, StoreConfig};
use shell::Shell;
use std::process::ExitCode;

const LOG_DIR_NAME: &str = "contacts-logs";

fn main() -> ExitCode {
    let log_dir = std::env::temp_dir().join(LOG_DIR_NAME);
    match log_dir.to_str() {
        Some(log_dir) => {
            if let Err(err) = contacts_core::init_logging(contacts_core::default_log_level(), log_dir)
            {
                eprintln!("warning: file logging disabled: {err}");
            }
        }
        None => eprintln!("warning: file logging disabled: log directory is not valid UTF-8"),
    }

    let config = StoreConfig::default();
    log::info!(
        "event=shell_start module=cli storage_path={}",
        config.storage_path().display()
    );
    let shell = Shell::new(ContactService::new(FileContactRepository::new(&config)));

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    match shell.run(&mut stdin.lock(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=shell_exit module=cli status=error error={}", err);
            eprintln!("console I/O failed: {err}");
            ExitCode::FAILURE
        }
    }
}
