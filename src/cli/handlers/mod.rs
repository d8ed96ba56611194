use std::fs;
use std::io::{self, BufRead, Read, Write};

use tracing::info;

use crate::cli::commands::{Cli, Commands, RunArgs};
use crate::cli::output::{OutputOptions, format_status, format_view};
use crate::cli::session::{Outcome, Session, SessionError};
use crate::io::config_io;
use crate::model::store::TodoStore;

/// Error type for script and repl driving
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("line {line}: {source}")]
    Line { line: usize, source: SessionError },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let opts = OutputOptions {
        json: cli.json,
        width: cli.width,
    };

    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref(), &cwd)?;
    let session = Session::new(TodoStore::from_config(&config));

    match cli.command {
        Some(Commands::Run(args)) => cmd_run(session, args, &opts),
        Some(Commands::Repl) | None => cmd_repl(session, &opts),
    }
}

fn cmd_run(mut session: Session, args: RunArgs, opts: &OutputOptions) -> Result<(), Box<dyn std::error::Error>> {
    let script = match &args.file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("could not read {}: {}", path.display(), e))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_script(&mut session, &script, &mut out, opts)?;
    Ok(())
}

fn cmd_repl(mut session: Session, opts: &OutputOptions) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    repl(
        &mut session,
        stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
        opts,
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

/// Apply every line of `script`, stopping at the first error.
///
/// `list` and `status` lines print where they occur; the final view is
/// always printed at the end.
pub fn run_script<W: Write>(
    session: &mut Session,
    script: &str,
    out: &mut W,
    opts: &OutputOptions,
) -> Result<(), DriveError> {
    let mut printer = Printer::new(opts);
    let mut applied = 0;

    for (idx, line) in script.lines().enumerate() {
        let outcome = session
            .apply_line(line)
            .map_err(|source| DriveError::Line {
                line: idx + 1,
                source,
            })?;
        let Some(outcome) = outcome else { continue };
        applied += 1;
        match outcome {
            Outcome::Show => printer.block(out, &format_view(session.store(), opts))?,
            Outcome::Status => printer.block(out, &format_status(session.store(), opts))?,
            _ => {}
        }
    }

    printer.block(out, &format_view(session.store(), opts))?;
    info!(applied, total = session.store().len(), "script finished");
    Ok(())
}

/// Apply lines from `input` until it ends. Errors are reported on `err`
/// and the session carries on.
pub fn repl<R: BufRead, W: Write, E: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    err: &mut E,
    opts: &OutputOptions,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match session.apply_line(&line) {
            Ok(Some(outcome)) => {
                if !opts.json {
                    if let Some(msg) = outcome.message() {
                        writeln!(out, "{}", msg)?;
                    }
                }
                if outcome == Outcome::Status {
                    writeln!(out, "{}", format_status(session.store(), opts))?;
                } else if outcome.shows_view() {
                    writeln!(out, "{}", format_view(session.store(), opts))?;
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(err, "error: {}", e)?,
        }
        out.flush()?;
    }
    Ok(())
}

/// Separates text blocks with a blank line; JSON is one object per line.
struct Printer {
    json: bool,
    printed: bool,
}

impl Printer {
    fn new(opts: &OutputOptions) -> Self {
        Printer {
            json: opts.json,
            printed: false,
        }
    }

    fn block<W: Write>(&mut self, out: &mut W, text: &str) -> io::Result<()> {
        if self.printed && !self.json {
            writeln!(out)?;
        }
        self.printed = true;
        writeln!(out, "{}", text)
    }
}
