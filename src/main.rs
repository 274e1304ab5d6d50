//! geiger-logger CLI entry point.

#![allow(clippy::print_stderr)]

use geiger_logger::Error;
use geiger_logger::constants::INTERRUPT_EXIT_CODE;
use std::error::Error as _;

fn main() {
    if let Err(e) = geiger_logger::run() {
        if matches!(e, Error::Interrupted) {
            std::process::exit(INTERRUPT_EXIT_CODE);
        }

        eprintln!("error: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}
