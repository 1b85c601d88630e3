//! Single-processor computer simulator CLI.
//!
//! This binary is the command-line entry point of the simulator. It performs:
//! 1. **Run:** Assemble program files, admit them as one batch and run them to completion.
//! 2. **Disassemble:** Assemble a program file and print its numbered instruction listing.
//!
//! Program output goes to stdout; diagnostics, logs and statistics go to stderr.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use uniproc_core::asm;
use uniproc_core::config::{Config, SchedulingPolicy};
use uniproc_core::isa::listing;
use uniproc_core::{Computer, SchedulingAlgorithm};

#[derive(Parser, Debug)]
#[command(
    name = "uniproc",
    author,
    version,
    about = "Single-processor computer simulator",
    long_about = "Assemble programs and run them on a simulated single-CPU computer under a chosen scheduling policy.\n\nExamples:\n  uniproc run prog1.asm prog2.asm\n  uniproc run --policy rr --quantum 2 --stats a.asm b.asm\n  uniproc run -c machine.json a.asm\n  uniproc disasm prog1.asm"
)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run program files as one batch; each file is one program.
    Run {
        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scheduling policy (overrides the configuration).
        #[arg(long, value_enum)]
        policy: Option<Policy>,

        /// Round-robin quantum in instructions (overrides the configuration).
        #[arg(long)]
        quantum: Option<i32>,

        /// Number of registers (overrides the configuration).
        #[arg(long)]
        registers: Option<i32>,

        /// Number of RAM cells (overrides the configuration).
        #[arg(long)]
        ram: Option<i32>,

        /// Print run statistics to stderr after the batch.
        #[arg(long)]
        stats: bool,

        /// Program files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Assemble a program file and print its instruction listing.
    Disasm {
        /// Program file.
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Fcfs,
    Rr,
    Sjf,
}

impl From<Policy> for SchedulingPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Fcfs => Self::Fcfs,
            Policy::Rr => Self::RoundRobin,
            Policy::Sjf => Self::Sjf,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            policy,
            quantum,
            registers,
            ram,
            stats,
            files,
        } => {
            let mut config = match config {
                Some(path) => Config::load(&path).unwrap_or_else(|e| fail(&e)),
                None => Config::default(),
            };
            if let Some(policy) = policy {
                config.scheduler.policy = policy.into();
            }
            if let Some(quantum) = quantum {
                config.scheduler.quantum = quantum;
            }
            if let Some(registers) = registers {
                config.machine.registers = registers;
            }
            if let Some(ram) = ram {
                config.machine.ram_size = ram;
            }

            init_logging(cli.verbose, config.general.trace_instructions);
            cmd_run(&config, &files, stats);
        }
        Commands::Disasm { file } => {
            init_logging(cli.verbose, false);
            cmd_disasm(&file);
        }
    }
}

/// Installs the stderr subscriber; `RUST_LOG` wins over the flags.
fn init_logging(verbose: u8, trace_instructions: bool) {
    let level = match verbose {
        _ if trace_instructions => "trace",
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the configured computer, installs the OS and runs every file as one batch.
///
/// Exits with code 1 on any configuration, compilation or runtime fault.
fn cmd_run(config: &Config, files: &[PathBuf], print_stats: bool) {
    let programs: Vec<String> = files.iter().map(|path| read_source(path)).collect();

    let algorithm = SchedulingAlgorithm::from_config(&config.scheduler).unwrap_or_else(|e| fail(&e));
    let mut computer = Computer::from_config(&config.machine).unwrap_or_else(|e| fail(&e));
    let os = computer.install_os(algorithm).unwrap_or_else(|e| fail(&e));
    debug!(
        programs = programs.len(),
        registers = config.machine.registers,
        ram = config.machine.ram_size,
        "starting batch"
    );

    let outcome = os.execute_programs(&programs);
    if print_stats {
        eprintln!("{}", os.stats());
    }
    if let Err(e) = outcome {
        fail(&e);
    }
}

/// Prints the numbered listing of one program file.
fn cmd_disasm(path: &Path) {
    let source = read_source(path);
    match asm::compile(&source) {
        Ok(program) => print!("{}", listing(&program)),
        Err(e) => {
            eprintln!("Error: {}:{}: {e}", path.display(), e.line_number());
            process::exit(1);
        }
    }
}

fn read_source(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", path.display());
        process::exit(1);
    })
}

fn fail(error: &dyn std::fmt::Display) -> ! {
    eprintln!("Error: {error}");
    process::exit(1);
}
