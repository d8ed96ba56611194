use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tk", about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - a todo list that lives for one session"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON (one object per printed view)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./tick.toml if present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Truncate item text to this many cells (0 = never)
    #[arg(long, global = true, default_value_t = 60)]
    pub width: usize,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a session script and print the resulting list
    Run(RunArgs),
    /// Read commands interactively from stdin (the default)
    Repl,
}

#[derive(Args)]
pub struct RunArgs {
    /// Script file, one command per line (default: stdin)
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tk", "run", "todo.txt", "--json", "-vv", "--width", "20"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.width, 20);
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.file, Some(PathBuf::from("todo.txt"))),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn no_subcommand() {
        let cli = Cli::try_parse_from(["tk"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.width, 60);
        assert!(cli.config.is_none());
    }
}
