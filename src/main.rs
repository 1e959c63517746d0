mod app;
mod color;
mod data;
mod error;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eframe::egui;

use app::LaunchDashApp;
use data::filter::filter_for_scatter;
use data::loader::{DEFAULT_DATASET, load_file};
use data::model::{LaunchTable, PayloadRange, SiteSelection};
use data::summary::summarize_outcomes;
use state::DashboardState;

const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";

#[derive(Parser)]
#[command(name = "launch-dash")]
#[command(about = "Interactive dashboard over launch records", long_about = None)]
struct Cli {
    /// Launch records file (.csv, .json or .parquet)
    #[arg(short, long, default_value = DEFAULT_DATASET, global = true)]
    data: PathBuf,

    /// Print a derived table as JSON instead of opening the dashboard
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pie chart data: success counts per site, or outcomes for one site
    Summary {
        /// Site name, or ALL for every site
        #[arg(short, long, default_value = data::model::ALL_SITES_TOKEN)]
        site: String,
    },

    /// Scatter data: launches within a payload range
    Scatter {
        /// Site name, or ALL for every site
        #[arg(short, long, default_value = data::model::ALL_SITES_TOKEN)]
        site: String,

        /// Lower payload bound in kg (default: dataset minimum)
        #[arg(long)]
        low: Option<f64>,

        /// Upper payload bound in kg (default: dataset maximum)
        #[arg(long)]
        high: Option<f64>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let table = load_table(&cli.data).inspect_err(|e| log::error!("{e:#}"))?;

    match cli.command {
        None => run_dashboard(table),
        Some(Commands::Summary { site }) => {
            let site = selection_for(&table, &site);
            print_json(&summarize_outcomes(&table, &site))
        }
        Some(Commands::Scatter { site, low, high }) => {
            let site = selection_for(&table, &site);
            let full = PayloadRange::full(&table);
            let range = PayloadRange::new(low.unwrap_or(full.low), high.unwrap_or(full.high));
            print_json(&filter_for_scatter(&table, &site, range))
        }
    }
}

fn load_table(path: &Path) -> Result<LaunchTable> {
    let table = load_file(path)
        .with_context(|| format!("loading launch records from {}", path.display()))?;
    log::info!(
        "Loaded {} launches from {} across sites {:?}",
        table.len(),
        path.display(),
        table.sites()
    );
    Ok(table)
}

/// Parse a site token. Unknown sites are allowed and give empty results.
fn selection_for(table: &LaunchTable, token: &str) -> SiteSelection {
    let selection = SiteSelection::from(token);
    if let SiteSelection::Site(name) = &selection {
        if !table.has_site(name) {
            log::warn!("Unknown launch site '{name}', results will be empty");
        }
    }
    selection
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing report")?;
    println!("{json}");
    Ok(())
}

fn run_dashboard(table: LaunchTable) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    let state = DashboardState::new(table);

    eframe::run_native(
        DASHBOARD_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
