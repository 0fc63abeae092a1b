//! MHRD - netlist front end
//!
//! Parses an MHRD netlist and prints what it declares.
//!
//! # Usage
//!
//! ```bash
//! mhrd adder.mhrd
//! cat adder.mhrd | mhrd --format text -
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use mhrd_core::{dsl, error::Result, Program};

/// How the parsed program is printed.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// One line per statement with its entries
    Summary,
    /// Rust debug dump of the AST
    Debug,
    /// Canonical source text
    Text,
}

/// MHRD netlist parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the netlist file, or '-' for stdin
    #[arg(value_name = "FILE")]
    netlist_file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Summary)]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let program = if args.netlist_file.as_os_str() == "-" {
        mhrd_core::parse_reader(std::io::stdin().lock())?
    } else {
        dsl::parse_file(&args.netlist_file)?
    };

    match args.format {
        Format::Summary => print_summary(&program),
        Format::Debug => println!("{:#?}", program),
        Format::Text => print!("{}", program),
    }

    Ok(())
}

fn print_summary(program: &Program) {
    println!("inputs:  {}", program.inputs.len());
    for port in &program.inputs {
        println!("  {} ({} pin(s))", port.id, port.width());
    }

    println!("outputs: {}", program.outputs.len());
    for port in &program.outputs {
        println!("  {} ({} pin(s))", port.id, port.width());
    }

    println!("parts:   {}", program.parts.len());
    for part in &program.parts {
        println!("  {}: {}", part.id, part.module);
    }

    println!("wires:   {}", program.wires.len());
    for wire in &program.wires {
        println!("  {}", wire);
    }
}
