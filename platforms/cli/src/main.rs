use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tmsim::{
    analyzer::unreachable_states, run, run_traced, to_dot, Definition, DefinitionLoader,
    MachineCatalog, Outcome, Snapshot, Trace, TuringMachineError, Verdict, DEFAULT_MAX_STEPS,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// Log what the simulator is doing (sets the filter to debug)
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a machine on one or more inputs
    Run {
        /// A definition file (.tm or .json) or the name of a built-in machine
        definition: String,

        /// An input string; may be repeated
        #[clap(short, long)]
        input: Vec<String>,

        /// A file with one input per line
        #[clap(short, long)]
        file: Option<PathBuf>,

        /// Maximum number of steps before giving up
        #[clap(short = 's', long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,

        /// Print every step of the computation
        #[clap(short, long)]
        trace: bool,
    },
    /// Print a machine as a Graphviz digraph
    Graph {
        /// A definition file (.tm or .json) or the name of a built-in machine
        definition: String,

        /// Write the graph to this file instead of stdout
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a definition without running it
    Check {
        /// A definition file (.tm or .json) or the name of a built-in machine
        definition: String,
    },
    /// List the built-in machines
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "tmsim=debug" } else { "tmsim=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command) -> Result<(), TuringMachineError> {
    match command {
        Command::Run {
            definition,
            input,
            file,
            max_steps,
            trace,
        } => {
            let definition = resolve_definition(&definition)?;
            let inputs = collect_inputs(input, file.as_deref())?;
            debug!(inputs = inputs.len(), max_steps, "running");

            if trace {
                let traces = run_traced(&definition, &inputs, max_steps)?;
                for (index, trace) in traces.into_iter().enumerate() {
                    if index > 0 {
                        println!("\n{}", "-".repeat(40));
                    }
                    print!("{}", format_trace(trace, max_steps));
                }
            } else {
                for (input, outcome) in inputs.iter().zip(run(&definition, &inputs, max_steps)?) {
                    println!("{}", format_outcome(input, &outcome));
                }
            }
        }
        Command::Graph { definition, output } => {
            let dot = to_dot(&resolve_definition(&definition)?);
            match output {
                Some(path) => fs::write(&path, dot).map_err(|e| {
                    TuringMachineError::SourceUnavailable(format!(
                        "Failed to write {}: {}",
                        path.display(),
                        e
                    ))
                })?,
                None => print!("{dot}"),
            }
        }
        Command::Check { definition } => {
            let definition = resolve_definition(&definition)?;
            println!(
                "ok: {} states, {} symbols, {} transitions",
                definition.states()?.len(),
                definition.symbols()?.len(),
                definition.transition_count()
            );

            let unreachable = unreachable_states(&definition);
            if !unreachable.is_empty() {
                println!("unreachable: {}", unreachable.join(", "));
            }
        }
        Command::List => {
            for (index, name) in MachineCatalog::names().into_iter().enumerate() {
                println!("{index}: {name}");
            }
        }
    }

    Ok(())
}

/// Loads `source` as a file if it exists, otherwise looks it up among the built-in machines.
fn resolve_definition(source: &str) -> Result<Definition, TuringMachineError> {
    let path = Path::new(source);
    if path.exists() {
        return DefinitionLoader::load(path);
    }

    MachineCatalog::get_by_name(source)
        .map(|machine| machine.definition.clone())
        .map_err(|_| {
            TuringMachineError::SourceUnavailable(format!(
                "{} is neither a readable file nor a built-in machine",
                source
            ))
        })
}

/// Gathers inputs from flags and the input file, falling back to piped stdin.
fn collect_inputs(
    mut inputs: Vec<String>,
    file: Option<&Path>,
) -> Result<Vec<String>, TuringMachineError> {
    if let Some(path) = file {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::SourceUnavailable(format!(
                "Failed to read input file {}: {}",
                path.display(),
                e
            ))
        })?;
        inputs.extend(content.lines().map(str::to_string));
    }

    if inputs.is_empty() && atty::isnt(atty::Stream::Stdin) {
        for line in io::stdin().lock().lines() {
            let line = line.map_err(|e| {
                TuringMachineError::SourceUnavailable(format!("Failed to read from stdin: {}", e))
            })?;
            inputs.push(line);
        }
    }

    if inputs.is_empty() {
        return Err(TuringMachineError::SourceUnavailable(
            "requires at least one input (use --input, --file, or pipe stdin)".to_string(),
        ));
    }

    Ok(inputs)
}

fn format_outcome(input: &str, outcome: &Outcome) -> String {
    format!("{} -> {} ({})", input, outcome.tape, outcome.verdict())
}

fn format_trace(trace: Trace, max_steps: usize) -> String {
    let summary = match trace.outcome.verdict() {
        Verdict::Accepted => format!(
            "Machine halted in {} and accepted input",
            plural(trace.outcome.steps, "step")
        ),
        Verdict::Rejected => format!(
            "Machine halted in {} and rejected input",
            plural(trace.outcome.steps, "step")
        ),
        Verdict::Undecided => format!("Machine cannot decide in {}", plural(max_steps, "step")),
    };

    let mut out = String::from("  STEP  STATE  TAPE\n");
    for snapshot in trace {
        out.push_str(&format_snapshot(&snapshot));
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&summary);
    out.push('\n');
    out
}

/// Renders a snapshot row with the cell under the head in brackets.
fn format_snapshot(snapshot: &Snapshot) -> String {
    let tape: String = snapshot
        .tape
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if i == snapshot.head {
                format!("[{c}]")
            } else {
                c.to_string()
            }
        })
        .collect();

    format!("{:>6}  {:>5}  {}", snapshot.step, snapshot.state, tape)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
