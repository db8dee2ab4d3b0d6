//! Dpgen - Behavioral Netlist to Verilog Datapath Generator
//!
//! Translates a behavioral netlist into a structural Verilog module built
//! from the parameterized datapath primitive library.
//!
//! # Usage
//!
//! ```bash
//! dpgen circuit1.txt circuit1.v
//! RUST_LOG=debug dpgen circuit1.txt circuit1.v
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use dpgen_core::config::{module_name_from, DEFAULT_WIRE_SUFFIX};
use dpgen_core::{translate_file, ErrorClass, TranslateConfig};

const USAGE: &str = "Usage: dpgen netlistFile verilogFile
\t- netlistFile: Behavioral netlist to be converted (e.g., circuit1.txt)
\t- verilogFile: Destination of the generated Verilog module (e.g., circuit1.v)";

/// Behavioral netlist to structural Verilog datapath generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the behavioral netlist
    #[arg(value_name = "NETLIST_FILE")]
    netlist_file: PathBuf,

    /// Path of the Verilog file to create
    #[arg(value_name = "VERILOG_FILE")]
    verilog_file: PathBuf,

    /// Name of the generated module (defaults to the Verilog file name)
    #[arg(long)]
    module_name: Option<String>,

    /// Suffix of the storage wires inserted in front of outputs
    #[arg(long, default_value = DEFAULT_WIRE_SUFFIX)]
    wire_suffix: String,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            // A wrong number of positional arguments is answered with usage, not an error.
            ErrorKind::MissingRequiredArgument
            | ErrorKind::UnknownArgument
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                println!("{}", USAGE);
                return ExitCode::SUCCESS;
            }
            _ => e.exit(),
        },
    };

    init_logging(args.verbose);

    if !args.netlist_file.is_file() {
        eprintln!("Netlist file does not exist: {}", args.netlist_file.display());
        return ExitCode::FAILURE;
    }

    let mut config =
        TranslateConfig::for_output(&args.verilog_file).with_wire_suffix(args.wire_suffix);
    if let Some(name) = args.module_name {
        config = config.with_module_name(module_name_from(&name));
    }

    match translate_file(&args.netlist_file, &args.verilog_file, &config) {
        Ok(()) => {
            println!("{} Verilog file successfully created", args.verilog_file.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", e.class(), e);
            if matches!(e.class(), ErrorClass::Syntax | ErrorClass::UnresolvedReference) {
                println!("Verilog file failed to be created due to incomplete Behavioral Netlist");
            }
            ExitCode::FAILURE
        }
    }
}
