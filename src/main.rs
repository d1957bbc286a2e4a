//! Purpose: `extprobe` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, runs probe commands, emits JSON on stdout.
//! Invariants: Results are JSON objects on stdout; a missing value is `{"answer":null}`.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand, ValueHint};
use clap_complete::aot::Shell;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing_subscriber::EnvFilter;

use extprobe::api::{
    to_exit_code, ApiResult, Error, ErrorKind, Module, ReadOutcome, ANSWER_RESOURCE,
};

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }
}

#[derive(Parser)]
#[command(
    name = "extprobe",
    version,
    about = "Probe a packaged native module's dispatch table and sibling data file",
    help_template = r#"{about-with-newline}
USAGE
  {usage}

COMMANDS
{subcommands}

OPTIONS
{options}

{after-help}
"#,
    after_help = r#"EXAMPLES
  $ extprobe get
  {"answer":42}
  $ extprobe --module-path /opt/ext/probe.so read
  {"answer":42}
  $ extprobe read --resource other.dat
  {"answer":null}"#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        help = "Path of the module file to probe (default: this binary)",
        value_hint = ValueHint::FilePath
    )]
    module_path: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Print the built-in answer")]
    Get,
    #[command(about = "Read the answer from a data file next to the module")]
    Read {
        #[arg(
            long,
            default_value = ANSWER_RESOURCE,
            help = "Sibling file name to read"
        )]
        resource: String,
    },
    #[command(about = "Generate shell completions")]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Serialize)]
struct AnswerReport {
    answer: Option<i64>,
}

fn run() -> Result<RunOutcome, Error> {
    let cli = Cli::parse();
    match cli.command {
        Command::Completion { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "extprobe", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Get => {
            let module = bind_module(cli.module_path)?;
            emit_answer(Some(module.get_the_answer()));
            Ok(RunOutcome::ok())
        }
        Command::Read { resource } => {
            let module = bind_module(cli.module_path)?;
            let answer = match module.read_resource(&resource)? {
                ReadOutcome::Value(value) => Some(value),
                ReadOutcome::Empty => None,
            };
            emit_answer(answer);
            Ok(RunOutcome::ok())
        }
    }
}

fn bind_module(module_path: Option<PathBuf>) -> ApiResult<Module> {
    let path = match module_path {
        Some(path) => path,
        None => std::env::current_exe().map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("failed to resolve own executable path")
                .with_source(err)
        })?,
    };
    Module::bind(path.to_string_lossy().into_owned())
}

fn emit_answer(answer: Option<i64>) {
    let report = AnswerReport { answer };
    let json =
        serde_json::to_string(&report).unwrap_or_else(|_| "{\"answer\":null}".to_string());
    println!("{json}");
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("error: {err}");
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error",
        ErrorKind::Usage => "usage error",
        ErrorKind::InvalidModulePath => "invalid module path",
        ErrorKind::Open => "open failed",
    }
    .to_string()
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = cause.source();
    }
    causes
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
