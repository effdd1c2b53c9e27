use clap::{Parser, Subcommand};
use nnir::catalog::{all_schemas, NodeSchema};
use nnir::{analyze, parse};
use std::fs;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

/// Validate neural-network graphs drawn in the visual editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log validation stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a graph file and print the analysis as JSON
    Check {
        /// Path to the graph JSON file, or `-` for stdin
        path: String,
    },
    /// Answer line-delimited JSON commands on stdin
    Serve,
    /// Print every node schema as JSON
    Catalog,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Check { path } => run_check(&path),
        Command::Serve => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            nnir::protocol::serve(stdin.lock(), stdout.lock())
                .unwrap_or_else(|e| exit_with_error(&format!("I/O failure: {}", e)));
        }
        Command::Catalog => {
            let schemas: Vec<&NodeSchema> = all_schemas().collect();
            print_json(&schemas);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "nnir=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_check(path: &str) {
    let json = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to read stdin: {}", e)));
        buf
    } else {
        fs::read_to_string(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to read graph file '{}': {}", path, e)))
    };

    let document = parse::parse(&json).unwrap_or_else(|errors| {
        let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
        exit_with_error(&messages.join("\n"))
    });

    let analysis = analyze(&document);
    print_json(&analysis);

    if !analysis.is_valid() {
        eprintln!("\nGraph is invalid:");
        for error in analysis.errors() {
            eprintln!("  - {}", error);
        }
        std::process::exit(1);
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
