//! Intcode CLI — run listings standalone or under a scheduling policy.

use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use std::path::PathBuf;

use intcode_runtime::{run_feedback_ring, run_pipeline, Network};
use intcode_vm::{Machine, Program};

// ANSI color helpers
fn red(s: &str) -> String {
    format!("\x1b[31m{}\x1b[0m", s)
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}
fn gray(s: &str) -> String {
    format!("\x1b[90m{}\x1b[0m", s)
}
fn status_label(label: &str) -> String {
    format!("\x1b[1;32m{:>12}\x1b[0m", label)
}

#[derive(ClapParser)]
#[command(name = "intcode", version, about = "Intcode machine runner and orchestrator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one machine to completion
    Run {
        /// Path to the program listing (comma-separated integers)
        file: PathBuf,

        /// Value to queue before the first step (repeatable, in order)
        #[arg(long = "input", value_name = "N")]
        inputs: Vec<i64>,

        /// Overwrite a memory cell before running (repeatable)
        #[arg(long, value_name = "ADDR=VAL", value_parser = parse_poke)]
        poke: Vec<(usize, i64)>,

        /// Print this memory cell after the run
        #[arg(long, value_name = "ADDR")]
        peek: Option<usize>,

        /// Render the output log as ASCII instead of one value per line
        #[arg(long)]
        ascii: bool,

        /// Print the output log as a JSON array
        #[arg(long, conflicts_with = "ascii")]
        json: bool,
    },
    /// Run a sequential pipeline of machines
    Pipeline {
        /// Path to the program listing
        file: PathBuf,

        /// Comma-separated phase values, one machine per phase
        #[arg(long, value_name = "LIST")]
        phases: String,
    },
    /// Run a feedback ring of machines until all halt
    Ring {
        /// Path to the program listing
        file: PathBuf,

        /// Comma-separated phase values, one machine per phase
        #[arg(long, value_name = "LIST")]
        phases: String,

        /// Seed value fed to machine 0 before the first cycle
        #[arg(long, default_value_t = 0)]
        seed: i64,
    },
    /// Run a packet-routed network of machines
    Net {
        /// Path to the program listing
        file: PathBuf,

        /// Number of nodes
        #[arg(long, default_value_t = 50)]
        nodes: usize,

        /// When to stop
        #[arg(long, value_enum, default_value = "first")]
        policy: NetPolicy,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NetPolicy {
    /// Stop on the first broadcast packet
    First,
    /// Stop when two consecutive idle-triggered replays repeat a y value
    Idle,
}

fn parse_poke(s: &str) -> Result<(usize, i64), String> {
    let (addr, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VAL, got '{}'", s))?;
    let addr = addr
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("bad address '{}': {}", addr, e))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("bad value '{}': {}", value, e))?;
    Ok((addr, value))
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            file,
            inputs,
            poke,
            peek,
            ascii,
            json,
        } => cmd_run(&file, &inputs, &poke, peek, ascii, json),
        Commands::Pipeline { file, phases } => cmd_pipeline(&file, &phases),
        Commands::Ring { file, phases, seed } => cmd_ring(&file, &phases, seed),
        Commands::Net {
            file,
            nodes,
            policy,
        } => cmd_net(&file, nodes, policy),
    }
}

fn load_program(path: &PathBuf) -> Program {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!(
            "{} cannot read file '{}': {}",
            red("error:"),
            bold(&path.display().to_string()),
            e
        );
        std::process::exit(1);
    });
    source.parse().unwrap_or_else(|e| {
        eprintln!("{} parsing '{}': {}", red("error:"), path.display(), e);
        std::process::exit(1);
    })
}

fn parse_phases(list: &str) -> Vec<i64> {
    list.split(',')
        .map(|part| {
            part.trim().parse::<i64>().unwrap_or_else(|e| {
                eprintln!("{} bad phase '{}': {}", red("error:"), part, e);
                std::process::exit(1);
            })
        })
        .collect()
}

fn cmd_run(
    file: &PathBuf,
    inputs: &[i64],
    poke: &[(usize, i64)],
    peek: Option<usize>,
    ascii: bool,
    json: bool,
) {
    let program = load_program(file);
    let mut machine = Machine::with_inputs(&program, inputs.iter().copied());
    for &(addr, value) in poke {
        machine.poke(addr, value);
    }

    println!("{} {}", status_label("Running"), file.display());
    if let Err(e) = machine.run_to_completion() {
        eprintln!("{} {}", red("runtime error:"), e);
        std::process::exit(1);
    }

    if json {
        match serde_json::to_string(machine.output()) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                eprintln!("{} rendering output as JSON: {}", red("error:"), e);
                std::process::exit(1);
            }
        }
    } else if ascii {
        for &value in machine.output() {
            match u32::try_from(value).ok().and_then(char::from_u32) {
                Some(c) if value < 128 => print!("{}", c),
                _ => println!("{}", value),
            }
        }
    } else {
        for value in machine.output() {
            println!("{}", value);
        }
    }
    if let Some(addr) = peek {
        println!("{} {}", gray(&format!("memory[{}]:", addr)), machine.peek(addr));
    }
}

fn cmd_pipeline(file: &PathBuf, phases: &str) {
    let program = load_program(file);
    let phases = parse_phases(phases);
    println!("{} {} stages", status_label("Pipelining"), phases.len());
    match run_pipeline(&program, &phases) {
        Ok(signal) => println!("{}", signal),
        Err(e) => {
            eprintln!("{} {}", red("runtime error:"), e);
            std::process::exit(1);
        }
    }
}

fn cmd_ring(file: &PathBuf, phases: &str, seed: i64) {
    let program = load_program(file);
    let phases = parse_phases(phases);
    println!("{} {} machines", status_label("Cycling"), phases.len());
    match run_feedback_ring(&program, &phases, seed) {
        Ok(signal) => println!("{}", signal),
        Err(e) => {
            eprintln!("{} {}", red("runtime error:"), e);
            std::process::exit(1);
        }
    }
}

fn cmd_net(file: &PathBuf, nodes: usize, policy: NetPolicy) {
    let program = load_program(file);
    let mut network = Network::new(&program, nodes);
    println!("{} {} nodes", status_label("Routing"), nodes);
    let result = match policy {
        NetPolicy::First => network.run_until_first_broadcast().map(|packet| packet.y),
        NetPolicy::Idle => network.run_until_repeated_idle_broadcast(),
    };
    match result {
        Ok(y) => println!("{}", y),
        Err(e) => {
            eprintln!("{} {}", red("runtime error:"), e);
            std::process::exit(1);
        }
    }
}
