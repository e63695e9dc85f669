//! Purpose: `attropts` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, reads options, emits JSON on stdout.
//! Invariants: `read` emits exactly one JSON object on stdout when it succeeds.
//! Invariants: Non-interactive errors and notices are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod elements;

use attropts::api::{
    AttributeTarget, Error, ErrorKind, Options, OptionsRequest, options_from_json_str,
    options_to_json, to_exit_code,
};
use attropts::notice::{Notice, notice_json};
use elements::{ElementSet, element_from_flags};

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<i32, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let code = if err.kind() == ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                {
                    2
                } else {
                    0
                };
                return Ok(code);
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `attropts --help`."));
            }
        },
    };

    match cli.command {
        Command::Read(args) => run_read(args)?,
    }
    Ok(0)
}

#[derive(Parser)]
#[command(
    name = "attropts",
    version,
    about = "Read JSON options from an element attribute and merge them over defaults",
    long_about = None,
    after_help = r#"EXAMPLES
  $ attropts read --name data-options --attr 'data-options={"loop":"true","speed":"300"}' --numeric speed
  {"loop":true,"speed":300.0}
  $ attropts read --name data-slider --elements page.json --id hero --defaults '{"speed":500}'"#,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Read one attribute and print the merged options as JSON")]
    Read(ReadArgs),
}

#[derive(Args)]
struct ReadArgs {
    #[arg(long, short = 'n', value_name = "ATTR", help = "Attribute to read")]
    name: String,
    #[arg(
        long = "attr",
        value_name = "NAME=VALUE",
        conflicts_with = "elements",
        help = "Attribute on an inline target element (repeatable)"
    )]
    attrs: Vec<String>,
    #[arg(
        long,
        value_hint = ValueHint::FilePath,
        requires = "id",
        help = "JSON file mapping element ids to attribute maps"
    )]
    elements: Option<PathBuf>,
    #[arg(long, requires = "elements", help = "Element id to select from --elements")]
    id: Option<String>,
    #[arg(
        long,
        value_name = "JSON",
        conflicts_with = "defaults_file",
        help = "Default options (JSON object)"
    )]
    defaults: Option<String>,
    #[arg(long, value_hint = ValueHint::FilePath, help = "File holding default options")]
    defaults_file: Option<PathBuf>,
    #[arg(
        long = "numeric",
        value_name = "KEY",
        help = "Key whose string value is parsed as a float (repeatable)"
    )]
    numeric: Vec<String>,
    #[arg(long, help = "Log diagnostics for missing targets and attributes")]
    dev: bool,
    #[arg(long, help = "Report non-JSON attribute text as a notice on stderr")]
    report_strings: bool,
    #[arg(long, help = "Pretty-print the result")]
    pretty: bool,
}

fn run_read(args: ReadArgs) -> Result<(), Error> {
    init_tracing(args.dev);

    let defaults = load_defaults(&args)?;
    let inline = if args.attrs.is_empty() {
        None
    } else {
        Some(element_from_flags(&args.attrs)?)
    };
    let element_set = match &args.elements {
        Some(path) => Some(ElementSet::load(path)?),
        None => None,
    };

    let target: Option<&dyn AttributeTarget> = match (&inline, &element_set, &args.id) {
        (Some(element), _, _) => Some(element as &dyn AttributeTarget),
        (None, Some(set), Some(id)) => {
            let found = set.get(id);
            if found.is_none() {
                tracing::debug!(id = %id, "element id not present in element set");
            }
            found.map(|element| element as &dyn AttributeTarget)
        }
        _ => None,
    };

    let mut request = OptionsRequest::new()
        .with_optional_target(target)
        .with_attribute_name(args.name.as_str())
        .with_default_options(defaults)
        .with_numeric_values(args.numeric.iter().cloned())
        .with_dev(args.dev);
    if args.report_strings {
        let attribute = args.name.clone();
        request = request.with_on_is_string(move |raw| {
            emit_notice(&Notice::not_json("read", &attribute, raw));
        });
    }

    let options = request.read();
    emit_json(&options_to_json(&options), args.pretty)
}

fn load_defaults(args: &ReadArgs) -> Result<Options, Error> {
    if let Some(text) = &args.defaults {
        return options_from_json_str(text).map_err(|err| {
            err.with_hint("--defaults must be a JSON object, e.g. '{\"speed\":300}'.")
        });
    }
    if let Some(path) = &args.defaults_file {
        let text = std::fs::read_to_string(path).map_err(|err| {
            let kind = if err.kind() == io::ErrorKind::NotFound {
                ErrorKind::NotFound
            } else {
                ErrorKind::Io
            };
            Error::new(kind)
                .with_message("failed to read defaults file")
                .with_path(path)
                .with_source(err)
        })?;
        return options_from_json_str(&text).map_err(|err| err.with_path(path));
    }
    Ok(Options::new())
}

fn init_tracing(dev: bool) {
    let fallback = if dev { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .try_init();
}

fn emit_json(value: &Value, pretty: bool) -> Result<(), Error> {
    let encoded = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    let json = encoded.map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("json encode failed")
            .with_source(err)
    })?;
    println!("{json}");
    Ok(())
}

fn emit_notice(notice: &Notice) {
    if io::stderr().is_terminal() {
        eprintln!("notice: {} (attribute: {})", notice.message, notice.attribute);
        return;
    }
    let json = serde_json::to_string(&notice_json(notice)).unwrap_or_else(|_| {
        "{\"notice\":{\"kind\":\"internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }
    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(path) = err.path() {
        lines.push(format!("  path: {}", path.display()));
    }
    if let Some(hint) = err.hint() {
        lines.push(format!("  hint: {hint}"));
    }
    lines.join("\n")
}

fn error_message(err: &Error) -> String {
    err.message()
        .map(str::to_string)
        .unwrap_or_else(|| err.kind().as_str().to_string())
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
