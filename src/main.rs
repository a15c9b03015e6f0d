use anyhow::Result;
use clap::Parser;
use costbadge::cli::{Cli, handle_command};
use costbadge::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(logging::parse_log_format_from_env());

    handle_command(cli.command, !cli.no_color)
}
