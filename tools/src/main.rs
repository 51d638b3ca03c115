//! gen-runner: command-line entry point for daily retail data generation.
//!
//! Usage:
//!   gen-runner 2025 3 15 --seed 42 --out ./retail_data
//!   gen-runner 2025 3 15 --config generator.json --force-master --online

use std::env;

use anyhow::Result;
use chrono::NaiveDate;
use retailitics_core::config::{GeneratorConfig, NoiseConfig};
use retailitics_core::generator::RetailDataGenerator;
use retailitics_core::online::OnlineDataGenerator;
use retailitics_core::summary::{self, DailySummary};

const USAGE: &str = "usage: gen-runner <year> <month> <day> \
    [--seed N] [--out DIR] [--config FILE] [--clean] [--force-master] [--online]";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let year: i32 = positional(&args, 1)?;
    let month: u32 = positional(&args, 2)?;
    let day: u32 = positional(&args, 3)?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| anyhow::anyhow!("not a calendar date: {year}-{month}-{day}"))?;

    let seed = parse_arg(&args, "--seed", 42u64);
    let out = args
        .windows(2)
        .find(|w| w[0] == "--out")
        .map(|w| w[1].as_str())
        .unwrap_or("./retail_data");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());
    let clean = args.iter().any(|a| a == "--clean");
    let force_master = args.iter().any(|a| a == "--force-master");
    let online = args.iter().any(|a| a == "--online");

    let mut config = match config_path {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if clean {
        config.noise = NoiseConfig::off();
    }

    println!("gen-runner");
    println!("  date:    {date}");
    println!("  seed:    {seed}");
    println!("  out:     {out}");
    println!("  config:  {}", config_path.unwrap_or("(defaults)"));
    if clean {
        println!("  noise:   off");
    }
    println!();

    let mut generator = RetailDataGenerator::open(config.clone(), seed, out)?;
    if force_master {
        generator.force_regenerate_master_data()?;
    }
    println!(
        "  master:  {} stores, {} products, {} customers",
        generator.stores().len(),
        generator.products().len(),
        generator.customers().len()
    );

    let batch = generator.generate_and_save_daily(date)?;
    if batch.is_empty() {
        println!("  {date}: already generated, files left untouched");
    } else {
        let digest = summary::summarize(&batch, generator.config().top_products_limit);
        print_day_summary(&digest);
    }

    if online {
        OnlineDataGenerator::new(config, seed).generate_all(generator.out_dir())?;
        println!("  online:  raw channel files written");
    }

    Ok(())
}

fn print_day_summary(digest: &DailySummary) {
    println!();
    println!("=== DAY SUMMARY ===");
    println!("  date:             {}", digest.date);
    println!("  transactions:     {}", digest.total_transactions);
    println!("  items sold:       {}", digest.total_items_sold);
    println!("  revenue:          ${:.2}", digest.total_revenue);
    println!("  unique customers: {}", digest.unique_customers);
    println!("  payment methods:");
    for (method, count) in &digest.payment_method_breakdown {
        println!("    {method:<14} {count}");
    }
    if let Some(top) = digest.top_products.first() {
        println!("  top product:      {} (${:.2})", top.product_name, top.revenue);
    }
}

fn positional<T: std::str::FromStr>(args: &[String], index: usize) -> Result<T> {
    args.get(index)
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| anyhow::anyhow!("{USAGE}"))
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
