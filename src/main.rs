//! Terminal front end for the deskcalc calculator.
//!
//! Every input line is read as a sequence of keys (`12+3=`) or button labels
//! (`CE`, `MS`, `1/x`), and the display is printed after each line:
//!
//! ```text
//! $ deskcalc
//! 0
//! > 12+3=
//! 15
//! > * 2 =
//! 30
//! ```
//!
//! With `--expr`, a whole expression is evaluated at once.

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use deskcalc::{format_number, CalculatorModel, CalculatorViewModel, Command, Config};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Keystroke calculator
#[derive(Parser, Debug)]
#[command(name = "deskcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/deskcalc/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter, overriding the configured level (e.g. `debug`)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Evaluate a single expression and exit
    #[arg(long, short = 'e', value_name = "EXPR")]
    expr: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref()).context("cannot load configuration")?;
    init_tracing(cli.log_level.as_deref().unwrap_or(&config.logging.level))?;

    if let Some(expression) = &cli.expr {
        let result = evaluate(expression, &config);
        match &result {
            Ok(text) | Err(text) => println!("{}", text),
        }
        return Ok(ExitCode::from(exit_status(&result)));
    }

    repl(&config, io::stdin().lock(), io::stdout())?;
    Ok(ExitCode::SUCCESS)
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level).with_context(|| format!("invalid log level {}", level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

/// Evaluate `expression` and format the result, or the error, for printing
fn evaluate(expression: &str, config: &Config) -> Result<String, String> {
    CalculatorModel::new()
        .evaluate_expression(expression)
        .and_then(|value| format_number(value, config.display.significant_digits))
        .map_err(|err| format!("Error: {}", err))
}

/// Process status for an `--expr` evaluation: 0 on success, 1 on error
fn exit_status(result: &Result<String, String>) -> u8 {
    u8::from(result.is_err())
}

/// Feed every line of `input` to a calculator, printing the display after
/// each one, until end of input or `q`/`quit`
fn repl<R, W>(config: &Config, mut input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut calculator = CalculatorViewModel::with_config(config);

    writeln!(output, "{}", calculator.display_value())?;
    loop {
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            debug!("end of input");
            break;
        }
        let line = line.trim();
        if line == "q" || line == "quit" {
            break;
        }

        for command in Command::parse_line(line) {
            if let Err(err) = calculator.execute(command) {
                warn!(%err, "command rejected");
            }
        }
        writeln!(output, "{}", calculator.display_value())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{evaluate, exit_status, repl, Cli};
    use clap::Parser;
    use deskcalc::Config;

    fn session(input: &str) -> String {
        let mut output = Vec::new();
        repl(&Config::default(), input.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn expression_results() {
        let config = Config::default();
        assert_eq!(evaluate("(2 + 3) * 4", &config), Ok("20".to_string()));
        assert_eq!(evaluate("1 / 3", &config), Ok("0.333333".to_string()));
        assert_eq!(
            evaluate("10 / 0", &config),
            Err("Error: Cannot divide by zero".to_string())
        );

        let mut precise = Config::default();
        precise.display.significant_digits = 3;
        assert_eq!(evaluate("2 / 3", &precise), Ok("0.667".to_string()));
    }

    #[test]
    fn exit_codes() {
        let config = Config::default();
        assert_eq!(exit_status(&evaluate("1 + 1", &config)), 0);
        assert_eq!(exit_status(&evaluate("1 +", &config)), 1);
        assert_eq!(exit_status(&evaluate("7 // 2", &config)), 1);
    }

    #[test]
    fn session_prints_display_after_each_line() {
        assert_eq!(session("12+3=\n* 2 =\n"), "0\n> 15\n> 30\n> ");
    }

    #[test]
    fn session_stops_on_quit() {
        assert_eq!(session("7\nq\n8\n"), "0\n> 7\n> ");
        assert_eq!(session("7\nquit\n8\n"), "0\n> 7\n> ");
        assert_eq!(session(""), "0\n> ");
    }

    #[test]
    fn session_shows_errors() {
        assert_eq!(session("5/0=\n"), "0\n> Error: Cannot divide by zero\n> ");
    }

    #[test]
    fn arguments() {
        let cli = Cli::parse_from(["deskcalc", "--expr", "1+2", "--log-level", "debug"]);
        assert_eq!(cli.expr.as_deref(), Some("1+2"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(cli.config.is_none());
    }
}
