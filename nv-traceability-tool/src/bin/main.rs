use std::path::PathBuf;
use std::process::ExitCode;

use clap::{
    Parser,
    Subcommand,
};
use nv_traceability_tool::{
    image_status_file,
    Fill,
    TracabilityRecord,
    REGION_SIZE,
};

#[derive(Parser)]
#[command(name = "nv-traceability-tool")]
#[command(about = "Traceability record image generator and parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a record image from a CSV file
    Generate {
        /// Input CSV file path
        input: PathBuf,

        /// Output image file path
        output: PathBuf,

        /// Fill bytes not set by the CSV with 0x00 instead of 0xFF
        #[arg(long)]
        zeroed: bool,
    },
    /// Parse a record image to a CSV file
    Parse {
        /// Input image file path
        input: PathBuf,

        /// Output CSV file path
        output: PathBuf,

        /// Accept images with a wrong checksum
        #[arg(long)]
        no_verify: bool,
    },
    /// Check checksum and definition flag of a record image
    Verify {
        /// Input image file path
        input: PathBuf,
    },
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            zeroed,
        } => {
            println!("Parsing CSV file: {}", input.display());
            let record = TracabilityRecord::from_csv_file(&input)?;
            println!("Found {} entries", record.entries.len());

            let fill = if zeroed { Fill::Zeroed } else { Fill::Erased };
            println!("Generating record image...");
            record.generate_image_file(&output, fill)?;

            println!("Successfully generated record image: {}", output.display());
            println!("Size: {} bytes", REGION_SIZE);

            Ok(ExitCode::SUCCESS)
        }
        Commands::Parse {
            input,
            output,
            no_verify,
        } => {
            println!("Parsing image file: {}", input.display());
            let record = TracabilityRecord::parse_image_file(&input, !no_verify)?;
            println!("Found {} entries", record.entries.len());

            println!("Writing CSV file...");
            record.to_csv_file(&output)?;

            println!("Successfully parsed record image to: {}", output.display());

            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { input } => {
            let status = image_status_file(&input)?;
            println!(
                "Checksum: stored 0x{:04x}, calculated 0x{:04x} ({})",
                status.stored_checksum,
                status.calculated_checksum,
                if status.checksum_valid() { "ok" } else { "MISMATCH" }
            );
            println!("Definition flag: {:?}", status.definition_flag);

            if status.checksum_valid() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
