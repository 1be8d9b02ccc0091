use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use clrprobe::error::Error;
use clrprobe::{scan, InspectionVerdict};

/// Report whether a managed (.NET) assembly declares an entry point.
///
/// Prints one JSON record to stdout; diagnostics go to stderr. Exit status:
/// 0 when an entry point is present, 1 when absent (including non-PE and
/// non-managed inputs), 2 when the input cannot be used at all.
#[derive(Parser)]
#[command(name = "clrprobe", version)]
struct Cli {
    /// Assembly file, or a directory whose top level is scanned for the
    /// first .dll/.exe with an entry point
    path: PathBuf,
}

const EXIT_ABSENT: u8 = 1;
const EXIT_FATAL: u8 = 2;

fn main() -> ExitCode {
    clrprobe::logging::init_tracing();
    let cli = Cli::parse();

    match run(&cli.path) {
        Ok(verdict) => match serde_json::to_string(&verdict) {
            Ok(record) => {
                println!("{record}");
                if verdict.has_entry_point {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::from(EXIT_ABSENT)
                }
            }
            Err(err) => {
                emit_error(&err.to_string());
                ExitCode::from(EXIT_FATAL)
            }
        },
        // Terminal classifications collapse to "absent"
        Err(Error::Pe(err)) => {
            emit_error(&err.to_string());
            ExitCode::from(EXIT_ABSENT)
        }
        // Unusable input
        Err(err) => {
            emit_error(&err.to_string());
            ExitCode::from(EXIT_FATAL)
        }
    }
}

fn run(path: &Path) -> clrprobe::error::Result<InspectionVerdict> {
    if path.is_dir() {
        scan::scan_directory(path)
    } else {
        clrprobe::inspect_file(path)
    }
}

/// Error record in the same stdout channel and shape as the verdict.
fn emit_error(message: &str) {
    println!(
        "{}",
        serde_json::json!({ "error": message, "has_entry_point": false })
    );
}
