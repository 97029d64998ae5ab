use clap::Parser;
use log::{debug, info};
use sqlnode::ast::walk::node_count;
use sqlnode::ast::{Node, Statement, StatementLike};
use sqlnode::errors::{SqlError, SqlResult};
use sqlnode::execution::{Executor, InMemoryCursorRegistry, RowLocation};
use sqlnode::pipeline::StatementTree;
use sqlnode::semantic::Binder;
use sqlnode::{frontend, read};
use std::{path::PathBuf, time::Instant};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Parses SQL into query trees and prints them",
    long_about = "Parses SQL into query trees and prints them.\n\
                 Statements are parsed, optionally bound (positioned UPDATE/DELETE\n\
                 are rewritten onto a cursor reference) and optionally executed\n\
                 against cursors given on the command line.\n\
                 \n\
                 Example usage:\n\
                 sqlnode input.sql --show-tree                 # Dump parsed trees\n\
                 sqlnode input.sql --bind --show-tree          # Dump bound trees\n\
                 sqlnode input.sql --execute --cursor cur1=42  # Run against cursor cur1 on row 42\n\
                 sqlnode input.sql --stats                     # Show node counts and timing"
)]
struct Cli {
    // The path to the .sql file
    path: PathBuf,

    // Print each tree after the last requested phase
    #[arg(long)]
    show_tree: bool,

    // Run the binder over each statement
    #[arg(short, long)]
    bind: bool,

    // Execute each bound statement (implies --bind)
    #[arg(short, long)]
    execute: bool,

    // Open cursor NAME positioned on ROW, as NAME=ROW
    #[arg(long = "cursor", value_parser = parse_cursor)]
    cursors: Vec<(String, u64)>,

    // Show node counts and timing
    #[arg(short, long)]
    stats: bool,

    // Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default)]
struct RunStats {
    parse_time: f64,
    bind_time: f64,
    statements: usize,
    parsed_nodes: usize,
    bound_nodes: usize,
}

fn parse_cursor(s: &str) -> Result<(String, u64), String> {
    let (name, row) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=ROW, got '{}'", s))?;
    let row = row
        .parse::<u64>()
        .map_err(|_| format!("invalid row number '{}'", row))?;
    Ok((name.to_string(), row))
}

// Print error message and exit with error code
fn fatal(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn parsing_phase(source: &str, stats: &mut RunStats) -> SqlResult<Vec<Statement>> {
    let start = Instant::now();
    let statements = frontend::parse(source)?;
    stats.parse_time = start.elapsed().as_secs_f64();
    stats.statements = statements.len();
    stats.parsed_nodes = statements.iter().map(|s| node_count(s)).sum();
    info!("parsed {} statements", stats.statements);
    Ok(statements)
}

fn binding_phase(
    statements: Vec<Statement>,
    stats: &mut RunStats,
) -> SqlResult<Vec<StatementTree>> {
    let start = Instant::now();
    let mut binder = Binder::new();
    let trees = statements
        .into_iter()
        .map(|statement| binder.bind(StatementTree::new(statement)))
        .collect::<SqlResult<Vec<_>>>()?;
    stats.bind_time = start.elapsed().as_secs_f64();
    stats.bound_nodes = trees.iter().map(|t| node_count(t.root())).sum();
    info!("bound {} statements, {} positioned", trees.len(), binder.rewritten());
    Ok(trees)
}

fn open_cursors(cursors: &[(String, u64)]) -> SqlResult<InMemoryCursorRegistry> {
    let mut registry = InMemoryCursorRegistry::new();
    for (name, row) in cursors {
        registry.open(name.clone(), vec![RowLocation(*row)]);
        registry.fetch_next(name)?;
    }
    Ok(registry)
}

fn execution_phase(trees: Vec<StatementTree>, registry: &InMemoryCursorRegistry) {
    let executor = Executor::new(registry);
    for tree in trees {
        let label = tree.root().statement_kind_label();
        match executor.execute(tree) {
            Ok(outcome) => {
                let rows: Vec<String> = outcome.row_locations.iter().map(|r| r.to_string()).collect();
                println!("{}: ok [{}]", outcome.statement_type, rows.join(", "));
            }
            // A failed statement does not stop the rest of the script.
            Err(e) if e.is_statement_local() => println!("{}: failed: {}", label, e),
            Err(e) => fatal(&format!("Execution failed: {}", e)),
        }
    }
}

fn print_tree(text: &str) {
    println!("{}", text);
    println!();
}

fn print_stats(stats: &RunStats) {
    println!("\n Statistics:");
    println!("  Statements:    {}", stats.statements);
    println!("  Parsed nodes:  {}", stats.parsed_nodes);
    println!("  Bound nodes:   {}", stats.bound_nodes);
    println!("  Parse time:    {:.3}s", stats.parse_time);
    println!("  Bind time:     {:.3}s", stats.bind_time);
}

fn run(args: &Cli) -> SqlResult<RunStats> {
    let mut stats = RunStats::default();
    if !args.path.exists() {
        return Err(SqlError::FileReadError(format!(
            "Input file does not exist: {}",
            args.path.display()
        )));
    }
    let source = read(&args.path)?;
    debug!("read {} bytes from {}", source.len(), args.path.display());

    let statements = parsing_phase(&source, &mut stats)?;
    if !(args.bind || args.execute) {
        if args.show_tree {
            statements.iter().for_each(|s| print_tree(&s.render_as_text()));
        }
        return Ok(stats);
    }

    let trees = binding_phase(statements, &mut stats)?;
    if args.show_tree {
        trees.iter().for_each(|t| print_tree(&t.render_as_text()));
    }

    if args.execute {
        let registry = open_cursors(&args.cursors)?;
        execution_phase(trees, &registry);
    }
    Ok(stats)
}

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(stats) => {
            if args.stats {
                print_stats(&stats);
            }
        }
        Err(e) => fatal(&e.to_string()),
    }
}
