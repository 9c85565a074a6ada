use std::path::PathBuf;
use std::process;

use clap::Parser;

use dicom_residue::{run, Error};

#[derive(Parser)]
#[command(
    name = "dicom-residue",
    about = "Compute pixel-wise residues between two DICOM acquisitions",
    version,
    after_help = "Scans DIRECTORY for exactly two .dcm files and writes\n\
                  residues/unfiltered_residue.jpg and residues/filtered_residue.jpg\n\
                  next to them. Set RUST_LOG=debug for step-level diagnostics."
)]
struct Cli {
    /// Directory containing exactly two DICOM (.dcm) files
    directory: PathBuf,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli.directory) {
        Ok(outcome) => {
            let (rows, columns) = outcome.dimensions;
            eprintln!(
                "[OK] wrote {} and {} ({columns}x{rows})",
                outcome.unfiltered_path.display(),
                outcome.filtered_path.display()
            );
        }
        Err(err) => {
            eprintln!("[FAIL] {}: {err}", error_kind(&err));
            process::exit(1);
        }
    }
}

/// Short label naming the failure kind, so operators can tell a bad input
/// directory from a broken file without parsing the message.
fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::Decode { .. } => "decode",
        Error::IncorrectImageCount { .. }
        | Error::IdenticalPosition
        | Error::GridShapeMismatch { .. }
        | Error::InvalidInput(_) => "input",
        Error::Io(_) => "io",
        Error::Image(_) => "encode",
    }
}
