use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;
use vendsim::application::machine::VendingMachine;
use vendsim::config::MachineConfig;
use vendsim::interfaces::csv::command_reader::CommandReader;
use vendsim::interfaces::csv::outcome_writer::{OutcomeRecord, OutcomeWriter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input commands CSV file
    input: PathBuf,

    /// Machine configuration (JSON). Defaults to the built-in three drink machine.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append the final item stock and cash box to the output.
    #[arg(long)]
    stock: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => MachineConfig::from_path(path).into_diagnostic()?,
        None => MachineConfig::default(),
    };
    let mut machine = VendingMachine::new(config).into_diagnostic()?;

    let file = File::open(cli.input).into_diagnostic()?;
    let reader = CommandReader::new(file);

    let stdout = io::stdout();
    let mut writer = OutcomeWriter::new(stdout.lock());

    for (index, command_result) in reader.commands().enumerate() {
        match command_result {
            Ok(command) => {
                let result = machine.process_command(&command);
                if let Err(err) = &result
                    && err.aborts_transaction()
                {
                    error!(step = index + 1, error = %err, "operator attention required");
                }
                let record = OutcomeRecord::new(index + 1, &command, &result, &machine);
                writer.write_outcome(&record).into_diagnostic()?;
            }
            Err(e) => {
                eprintln!("Error reading command: {}", e);
            }
        }
    }

    if cli.stock {
        writer.write_stock(machine.ledger()).into_diagnostic()?;
    }
    writer.flush().into_diagnostic()?;

    Ok(())
}
