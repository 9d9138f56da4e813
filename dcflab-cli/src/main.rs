//! DcfLab CLI — valuation and sensitivity-sweep commands.
//!
//! Commands:
//! - `value` — run one valuation from a TOML scenario file, print the
//!   summary, and save artifacts
//! - `sweep` — run a sensitivity sweep around a scenario (grid or seeded
//!   random sampling) and save the sweep table

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dcflab_runner::{
    classify, run_scenario_file, save_artifacts, upside_pct, write_sweep_csv, ParamGrid,
    ScenarioConfig, SensitivitySweep, SweepResults, ValuationRun, DEFAULT_FAIR_BAND_PCT,
};

#[derive(Parser)]
#[command(name = "dcflab", about = "DcfLab CLI — DCF projection and equity valuation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one valuation from a TOML scenario file.
    Value {
        /// Path to a TOML scenario file.
        #[arg(long)]
        config: PathBuf,

        /// Current market price per share; enables the verdict line.
        #[arg(long)]
        market_price: Option<f64>,

        /// Output directory for artifacts.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,

        /// Skip writing artifacts; print the summary only.
        #[arg(long, default_value_t = false)]
        no_artifacts: bool,
    },
    /// Run a sensitivity sweep around a scenario.
    Sweep {
        /// Path to a TOML scenario file (the sweep base).
        #[arg(long)]
        config: PathBuf,

        /// Discount rates (%) to test, comma-separated (e.g. 8,10,12).
        #[arg(long)]
        discount_rates: Option<String>,

        /// Terminal growth rates (%) to test, comma-separated.
        #[arg(long)]
        terminal_growths: Option<String>,

        /// EBIT margins (%) to test, comma-separated.
        #[arg(long)]
        ebit_margins: Option<String>,

        /// Draw this many seeded random samples instead of the full grid.
        #[arg(long)]
        sample: Option<usize>,

        /// Seed for random sampling.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Disable parallel execution.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// How many top points to print.
        #[arg(long, default_value_t = 10)]
        top: usize,

        /// Output directory for sweep.csv.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Value {
            config,
            market_price,
            output_dir,
            no_artifacts,
        } => run_value(config, market_price, output_dir, no_artifacts),
        Commands::Sweep {
            config,
            discount_rates,
            terminal_growths,
            ebit_margins,
            sample,
            seed,
            sequential,
            top,
            output_dir,
        } => run_sweep(
            config,
            discount_rates,
            terminal_growths,
            ebit_margins,
            sample,
            seed,
            sequential,
            top,
            output_dir,
        ),
    }
}

fn run_value(
    config_path: PathBuf,
    market_price: Option<f64>,
    output_dir: PathBuf,
    no_artifacts: bool,
) -> Result<()> {
    let run = run_scenario_file(&config_path)?;

    print_summary(&run, market_price);

    if !no_artifacts {
        let run_dir = save_artifacts(&run, &output_dir)?;
        println!("Artifacts saved to: {}", run_dir.display());
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_sweep(
    config_path: PathBuf,
    discount_rates: Option<String>,
    terminal_growths: Option<String>,
    ebit_margins: Option<String>,
    sample: Option<usize>,
    seed: u64,
    sequential: bool,
    top: usize,
    output_dir: PathBuf,
) -> Result<()> {
    let config = ScenarioConfig::from_file(&config_path)?;
    let base = config.to_assumptions();

    let grid = ParamGrid {
        discount_rates_pct: parse_axis(discount_rates.as_deref())?,
        terminal_growths_pct: parse_axis(terminal_growths.as_deref())?,
        ebit_margins_pct: parse_axis(ebit_margins.as_deref())?,
    };
    // All axes empty and no sampling would sweep a single point; fall back
    // to the conventional grid instead.
    let grid = if grid.discount_rates_pct.is_empty()
        && grid.terminal_growths_pct.is_empty()
        && grid.ebit_margins_pct.is_empty()
    {
        ParamGrid::default_grid()
    } else {
        grid
    };

    let sweep = SensitivitySweep::new().with_parallelism(!sequential);
    let results = match sample {
        Some(n) => {
            if n == 0 {
                bail!("--sample must be at least 1");
            }
            sweep.sweep_sampled(&base, &grid, n, seed)?
        }
        None => sweep.sweep(&base, &grid)?,
    };

    print_sweep_table(&results, top);

    std::fs::create_dir_all(&output_dir)?;
    let sweep_path = output_dir.join("sweep.csv");
    write_sweep_csv(&sweep_path, &results)?;
    println!("Sweep table saved to: {}", sweep_path.display());

    Ok(())
}

/// Parse a comma-separated list of numbers; None means an empty axis.
fn parse_axis(arg: Option<&str>) -> Result<Vec<f64>> {
    let Some(arg) = arg else {
        return Ok(Vec::new());
    };
    let mut values = Vec::new();
    for part in arg.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.parse::<f64>() {
            Ok(v) => values.push(v),
            Err(_) => bail!("invalid number '{part}' in axis list"),
        }
    }
    if values.is_empty() {
        bail!("axis list '{arg}' contains no numbers");
    }
    Ok(values)
}

fn print_summary(run: &ValuationRun, market_price: Option<f64>) {
    let result = &run.result;
    let horizon = run.assumptions.horizon_years();

    println!();
    println!("=== Valuation Result ===");
    println!("Run:              {}", &run.run_id[..12.min(run.run_id.len())]);
    println!("Horizon:          {horizon} years");
    println!("Base revenue:     {:.2}", run.assumptions.base_revenue);
    println!("WACC:             {:.2}%", run.assumptions.discount_rate_pct);
    println!(
        "Terminal growth:  {:.2}%",
        run.assumptions.terminal_growth_pct
    );
    println!();
    println!("--- Breakdown ---");
    for subtotal in &result.phase_subtotals {
        println!(
            "Years {:>2}-{:<2} ({:>5.1}% growth) PV: {:>14.2}",
            subtotal.start_year,
            subtotal.end_year,
            subtotal.annual_growth_pct,
            subtotal.present_value
        );
    }
    println!("Terminal value PV:           {:>14.2}", result.terminal_value_present_value);
    println!();
    println!("Enterprise Value: {:>14.2}", result.enterprise_value);
    println!("Net Debt:         {:>14.2}", run.assumptions.net_debt);
    println!("Equity Value:     {:>14.2}", result.equity_value);
    println!("Fair Value/Share: {:>14.2}", result.fair_value_per_share);
    println!(
        "Terminal Weight:  {:>13.1}%",
        result.terminal_value_weight_pct
    );

    if let Some(price) = market_price {
        println!();
        match (
            classify(result.fair_value_per_share, price, DEFAULT_FAIR_BAND_PCT),
            upside_pct(result.fair_value_per_share, price),
        ) {
            (Some(verdict), Some(upside)) => {
                println!(
                    "Verdict:          {verdict} at {price:.2} ({upside:+.1}% vs fair value)"
                );
            }
            _ => println!("Verdict:          n/a (market price must be positive)"),
        }
    }
    println!();
}

fn print_sweep_table(results: &SweepResults, top: usize) {
    println!();
    println!("=== Sensitivity Sweep ({} points) ===", results.len());
    println!(
        "{:>8} {:>9} {:>8} {:>14} {:>14} {:>10} {:>9}",
        "WACC%", "TermG%", "Margin%", "EV", "Equity", "FV/Share", "TermWt%"
    );
    println!("{}", "-".repeat(78));
    for point in results.top_n(top) {
        println!(
            "{:>8.2} {:>9.2} {:>8.2} {:>14.2} {:>14.2} {:>10.2} {:>9.1}",
            point.assumptions.discount_rate_pct,
            point.assumptions.terminal_growth_pct,
            point.assumptions.ebit_margin_pct,
            point.result.enterprise_value,
            point.result.equity_value,
            point.result.fair_value_per_share,
            point.result.terminal_value_weight_pct,
        );
    }
}
