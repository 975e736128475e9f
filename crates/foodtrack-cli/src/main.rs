mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, error::ErrorKind};
use foodtrack_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "foodtrack - school food surplus forecasting

Usage:
  foodtrack <command>

Start here:
  foodtrack purchase add --help
  foodtrack forecast
";

const TOP_LEVEL_HELP: &str = "foodtrack - school food surplus forecasting

USAGE: foodtrack <command>

Record what comes in and what gets eaten:
  foodtrack purchase add <food> <kg> [--expiry DATE]      Record a purchase (date defaults to today)
  foodtrack consumption add <food> <kg>                   Record consumption (date defaults to today)

Forecast today's surplus:
  foodtrack forecast                                      Per-food surplus with nearest expiry
  foodtrack forecast --expiry-boost                       Also count stock expiring within 3 days
  foodtrack forecast --as-of 2024-01-10                   Evaluate the trend at another date

Look at the data:
  foodtrack history                                       List every stored record
  foodtrack totals                                        Purchased minus consumed, per food

Data lives in $FOODTRACK_HOME (default ~/.foodtrack). Add --json to any
data command for machine-readable output, and set FOODTRACK_LOG=debug to
see what the store and forecaster are doing.
";

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let text = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&text).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::InvalidSubcommand
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };

    logging::init();
    let mode = output::mode_for_command(&cli.command);

    let dispatched = dispatch::dispatch(&cli, Local::now().date_naive());
    match dispatched {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "command failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Strips clap's trailing boilerplate (Usage line, "For more information" hint)
/// so our "What to do next" section is the single source of guidance.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

/// Maps raw args to the subcommand path used in `--help` hints.
fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let non_flags: Vec<&str> = raw_args
        .iter()
        .skip(1)
        .filter(|value| !value.starts_with('-'))
        .map(String::as_str)
        .collect();

    let hint = match non_flags.as_slice() {
        ["purchase", "add", ..] => Some("purchase add"),
        ["purchase", ..] => Some("purchase"),
        ["consumption", "add", ..] => Some("consumption add"),
        ["consumption", ..] => Some("consumption"),
        ["forecast", ..] => Some("forecast"),
        ["history", ..] => Some("history"),
        ["totals", ..] => Some("totals"),
        _ => None,
    };
    hint.map(std::string::ToString::to_string)
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if is_internal_error(error) {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

fn is_internal_error(error: &ClientError) -> bool {
    error.code.starts_with("internal_")
        || matches!(
            error.code.as_str(),
            "history_unavailable" | "history_write_failed" | "store_init_failed"
        )
}
