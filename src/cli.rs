use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate, generate_to};
use serde::Serialize;

use crate::badge::render_service_badge;
use crate::formatting::{
    CostThresholds, CostTier, DEFAULT_HIGH_ABOVE, DEFAULT_MEDIUM_ABOVE, format_cost,
};
use crate::loading::{LOADING_OVERLAY_ID, REFRESH_CONTROL_CLASS, RefreshButton, ViewTree};
use crate::progress::SpinnerOverlay;

pub const HIGH_ABOVE_HELP: &str = "Costs strictly above this value are classified as high.";
pub const MEDIUM_ABOVE_HELP: &str =
    "Costs strictly above this value (and not high) are classified as medium.";
pub const SPINNER_MESSAGE: &str = "Loading";

#[derive(Debug, Parser)]
#[command(
    name = "costbadge",
    about = "Classify cost values, render service badges, and toggle the loading overlay markup.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    #[arg(long, global = true, help = "Disable colored output.")]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoadingElement {
    Overlay,
    Refresh,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify cost values into low, medium, and high tiers.
    Classify {
        #[arg(required = true, allow_negative_numbers = true, value_name = "COST")]
        costs: Vec<f64>,
        #[arg(long, value_name = "VALUE", default_value_t = DEFAULT_HIGH_ABOVE, help = HIGH_ABOVE_HELP)]
        high_above: f64,
        #[arg(long, value_name = "VALUE", default_value_t = DEFAULT_MEDIUM_ABOVE, help = MEDIUM_ABOVE_HELP)]
        medium_above: f64,
        #[arg(long, help = "Print the classification as a JSON array.")]
        json: bool,
    },
    /// Render a service badge markup fragment per service label.
    Badge {
        #[arg(required = true, value_name = "SERVICE")]
        services: Vec<String>,
    },
    /// Apply the loading state to the overlay and refresh control and print their markup.
    Loading {
        #[arg(long, help = "Hide the overlay and re-enable the refresh control.")]
        hide: bool,
        #[arg(
            long,
            value_enum,
            value_name = "ELEMENT",
            help = "Leave an element out of the view; the toggle then does nothing."
        )]
        omit: Vec<LoadingElement>,
        #[arg(
            long,
            value_name = "MS",
            help = "Also show a terminal spinner overlay for this many milliseconds."
        )]
        spinner_ms: Option<u64>,
    },
    /// Generate shell completion scripts, optionally installing them for the current user.
    Completions {
        #[arg(value_enum, help = "Shell to generate completions for.")]
        shell: Shell,
        #[arg(
            long,
            value_name = "DIR",
            help = "Directory to write the completion script to."
        )]
        output_dir: Option<PathBuf>,
        #[arg(
            long,
            help = "Install the completion script into the default location for the selected shell."
        )]
        install: bool,
    },
}

#[derive(Debug, Serialize)]
struct ClassifiedCost {
    cost: f64,
    tier: CostTier,
    class: &'static str,
}

pub fn handle_command(command: Commands, use_color: bool) -> Result<()> {
    match command {
        Commands::Classify {
            costs,
            high_above,
            medium_above,
            json,
        } => classify(&costs, high_above, medium_above, json),
        Commands::Badge { services } => badges(&services),
        Commands::Loading {
            hide,
            omit,
            spinner_ms,
        } => loading(!hide, &omit, spinner_ms, use_color),
        Commands::Completions {
            shell,
            output_dir,
            install,
        } => generate_completions(shell, output_dir, install),
    }
}

fn classify(costs: &[f64], high_above: f64, medium_above: f64, json: bool) -> Result<()> {
    let thresholds =
        CostThresholds::new(high_above, medium_above).context("invalid cost thresholds")?;
    let classified: Vec<ClassifiedCost> = costs
        .iter()
        .map(|&cost| {
            let tier = thresholds.classify(cost);
            ClassifiedCost {
                cost,
                tier,
                class: tier.css_class(),
            }
        })
        .collect();

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &classified)
            .context("failed to serialize classification")?;
        writeln!(stdout).context("failed to write classification")?;
    } else {
        for entry in &classified {
            writeln!(
                stdout,
                "{:>10}  {}",
                format_cost(entry.cost),
                entry.tier.paint(entry.class)
            )
            .context("failed to write classification")?;
        }
    }
    Ok(())
}

fn badges(services: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for service in services {
        writeln!(stdout, "{}", render_service_badge(service).into_string())
            .context("failed to write badge")?;
    }
    Ok(())
}

fn loading(
    visible: bool,
    omit: &[LoadingElement],
    spinner_ms: Option<u64>,
    use_color: bool,
) -> Result<()> {
    let mut tree = ViewTree::with_loading_elements();
    if omit.contains(&LoadingElement::Overlay) {
        tree.remove_overlay(LOADING_OVERLAY_ID);
    }
    if omit.contains(&LoadingElement::Refresh) {
        tree.remove_control(REFRESH_CONTROL_CLASS);
    }

    if let Some(ms) = spinner_ms {
        preview_spinner(Duration::from_millis(ms), use_color);
    }

    tree.set_loading_visible(visible);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", tree.render_loading_elements().into_string())
        .context("failed to write loading markup")?;
    Ok(())
}

fn preview_spinner(duration: Duration, use_color: bool) {
    let mut spinner = SpinnerOverlay::new(SPINNER_MESSAGE, use_color);
    let mut button = RefreshButton::default();
    crate::loading::show_loading(Some(&mut spinner), Some(&mut button));
    thread::sleep(duration);
    crate::loading::hide_loading(Some(&mut spinner), Some(&mut button));
}

fn generate_completions(shell: Shell, output_dir: Option<PathBuf>, install: bool) -> Result<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();

    let target_dir = match output_dir {
        Some(dir) => Some(dir),
        None if install => Some(default_install_dir(shell)?),
        None => None,
    };

    if let Some(dir) = target_dir {
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create completion directory {}", dir.display()))?;
        let path = generate_to(shell, &mut command, bin_name, &dir)
            .context("failed to write completion file")?;
        println!("Installed {shell:?} completions to {}", path.display());
    } else {
        let mut stdout = io::stdout().lock();
        generate(shell, &mut command, bin_name, &mut stdout);
        stdout
            .flush()
            .context("failed to flush completion output")?;
    }

    Ok(())
}

fn default_install_dir(shell: Shell) -> Result<PathBuf> {
    let home = std::env::var_os("HOME").ok_or_else(|| {
        anyhow!("HOME environment variable is not set; use --output-dir to specify a path")
    })?;
    let relative = match shell {
        Shell::Bash => ".local/share/bash-completion/completions",
        Shell::Elvish => ".elvish/lib/completions",
        Shell::Fish => ".config/fish/completions",
        Shell::PowerShell => ".local/share/powershell/Scripts",
        Shell::Zsh => ".local/share/zsh/site-functions",
        other => {
            return Err(anyhow!(
                "no default install location for {other:?}; specify --output-dir"
            ));
        }
    };
    Ok(PathBuf::from(home).join(relative))
}
