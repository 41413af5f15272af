use clap::{Parser, ValueEnum};
use sekkei::prelude::*;
use std::fs;
use std::time::{Duration, Instant};

/// Compiles and runs a blueprint described as JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the blueprint JSON file
    blueprint_path: Option<String>,

    /// What to print besides the run log
    #[arg(short, long, value_enum, default_value_t = Emit::None)]
    emit: Emit,

    /// Maximum number of statements executed
    #[arg(long, default_value_t = 10_000)]
    max_steps: u64,

    /// Wall-clock budget of the run, in milliseconds
    #[arg(long)]
    deadline_ms: Option<u64>,

    /// Validate and generate only
    #[arg(long)]
    no_run: bool,

    /// List the registered node types and exit
    #[arg(long)]
    list_nodes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    None,
    /// The generated program listing
    Listing,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let catalog = NodeCatalog::new();

    if cli.list_nodes {
        for name in catalog.names() {
            println!("{}", name);
        }
        return;
    }

    let blueprint_path = cli
        .blueprint_path
        .clone()
        .unwrap_or_else(|| exit_with_error("A blueprint path is required."));

    let total_start = Instant::now();
    let json = fs::read_to_string(&blueprint_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read blueprint file '{}': {}",
            blueprint_path, e
        ))
    });
    let graph = BlueprintDefinition::from_json(&json)
        .and_then(|definition| definition.into_graph(&catalog))
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load blueprint: {}", e)));

    let limits = ExecutionLimits {
        max_steps: cli.max_steps,
        deadline: cli.deadline_ms.map(Duration::from_millis),
    };
    let mut compiler = Compiler::builder().with_limits(limits).build();
    let mut sink = ConsoleSink;

    let program = compiler
        .compile(&graph, &mut sink)
        .unwrap_or_else(|e| exit_with_error(&format!("Compilation failed: {}", e)));
    if cli.emit == Emit::Listing {
        println!("\n{}", ListingFormatter::format_program(&program));
    }
    if cli.no_run {
        return;
    }

    let outcome = smol::block_on(compiler.run(&program, &mut StdoutCapabilities, &mut sink));

    println!("\nFinished in {:?}", total_start.elapsed());
    if !outcome.is_success() {
        std::process::exit(1);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
