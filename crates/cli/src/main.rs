//! `oasir` command line: translate an OpenAPI document into its IR as JSON.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use oasir::{OpenApiIR, ParseResult, parse_content};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const STDIN_MARKER: &str = "-";

#[derive(Parser, Debug, Clone)]
#[command(name = "oasir", version, about = "Translate OpenAPI 3.x documents into IR", long_about = None)]
struct Cli {
    /// OpenAPI document (JSON or YAML), or `-` for stdin
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Write the IR here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,

    /// Log translation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    ExitCode::from(run(&cli))
}

fn run(cli: &Cli) -> u8 {
    match translate(cli) {
        Ok(()) => 0,
        Err(errors) => {
            for err in errors {
                eprintln!("error: {err}");
            }
            1
        }
    }
}

fn translate(cli: &Cli) -> Result<(), Vec<String>> {
    let text = read_input(&cli.input).map_err(|e| vec![e])?;

    let ir = match parse_content(&text) {
        ParseResult::Success { ir } => ir,
        ParseResult::Failure { errors } => return Err(errors),
    };
    info!(
        interfaces = ir.interfaces.len(),
        operations = ir.operation_count(),
        models = ir.models.len(),
        "Translated OpenAPI document."
    );

    let rendered = render(&ir, cli.compact).map_err(|e| vec![e])?;
    write_output(cli.output.as_deref(), &rendered).map_err(|e| vec![e])
}

fn read_input(input: &Path) -> Result<String, String> {
    if input.as_os_str() == STDIN_MARKER {
        debug!("Reading OpenAPI document from stdin.");
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("Failed to read stdin: {e}"))?;
        return Ok(text);
    }

    debug!(path = %input.display(), "Reading OpenAPI document.");
    std::fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {}: {e}", input.display()))
}

fn render(ir: &OpenApiIR, compact: bool) -> Result<String, String> {
    let rendered = if compact {
        serde_json::to_string(ir)
    } else {
        serde_json::to_string_pretty(ir)
    };
    rendered.map_err(|e| format!("Failed to serialize IR: {e}"))
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<(), String> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            debug!(path = %path.display(), "Wrote IR.");
            Ok(())
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{rendered}").map_err(|e| format!("Failed to write stdout: {e}"))
        }
    }
}

fn init_tracing(verbose: bool) {
    // OASIR_LOG takes a plain level ("debug", "warn", ...) or a full filter
    // spec like "oasir=trace"; --verbose only changes the default.
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = match std::env::var("OASIR_LOG") {
        Ok(level) if is_plain_level(&level) => format!("oasir={level}"),
        Ok(spec) => spec,
        Err(_) => format!("oasir={default_level}"),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
