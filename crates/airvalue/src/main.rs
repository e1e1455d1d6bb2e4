//! `airvalue` - CLI for air-quality lookups and household cost estimates
//!
//! This binary provides the command-line interface over the airvalue
//! library: station search, cost estimation, and AQI guidance.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use clap::Parser;
use tracing::warn;

use airvalue::awareness::{self, AqiBand, RegionGuide};
use airvalue::cli::{AwareCommand, Cli, Command, ConfigCommand, EstimateCommand, LookupCommand};
use airvalue::lookup::{LookupOutcome, REDACTION_PLACEHOLDER};
use airvalue::{init_logging, AreaLookup, Config, Error, HealthAssessment, WaqiDirectory};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Lookup(cmd) => handle_lookup(&config, &cmd).await,
        Command::Estimate(cmd) => handle_estimate(&config, &cmd).await,
        Command::Aware(cmd) => handle_aware(&cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn area_lookup(config: &Config) -> Result<AreaLookup<WaqiDirectory>, Box<dyn std::error::Error>> {
    if !config.has_token() {
        warn!("No station directory token configured; lookups will return no data");
    }
    let directory = WaqiDirectory::from_config(config)?;
    Ok(AreaLookup::new(directory, config.lookup.min_query_chars))
}

async fn handle_lookup(
    config: &Config,
    cmd: &LookupCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let lookup = area_lookup(config)?;
    let response = lookup.search(&cmd.query).await;

    if cmd.json {
        let output = serde_json::json!({
            "query": response.query,
            "suggestions": response.outcome.suggestions(),
            "message": response.outcome.message(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match &response.outcome {
        LookupOutcome::Cleared => {
            println!(
                "Type more than {} characters to search.",
                config.lookup.min_query_chars
            );
        }
        LookupOutcome::Suggestions(names) => {
            for (i, name) in names.iter().enumerate() {
                println!("{:>3}. {name}", i + 1);
            }
        }
        LookupOutcome::NoData => {
            println!("{}", LookupOutcome::NoData.message().unwrap_or_default());
        }
    }
    Ok(())
}

async fn handle_estimate(
    config: &Config,
    cmd: &EstimateCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let lookup = Arc::new(area_lookup(config)?);
    let mut form = HealthAssessment::new(lookup, &config.estimate);

    if let Some(area) = &cmd.area {
        if cmd.resolve {
            form.input_area(area).await;
            if !form.suggestions().is_empty() {
                form.select_suggestion(cmd.pick.get() - 1)?;
            }
        } else {
            form.enter_area(area);
        }
    }

    form.set_member_count(cmd.members)?;
    for (i, age) in cmd.ages.iter().enumerate() {
        form.set_age(i, *age)?;
    }
    form.set_outdoor_hours(cmd.hours)?;
    form.set_health_condition(cmd.condition.into());

    let lookup_message = form.error().map(str::to_string);
    let report = form.submit().map_err(|e| {
        if let (true, Some(message)) = (e.is_missing_area(), &lookup_message) {
            eprintln!("{message}");
        }
        e
    })?;

    let symbol = &config.estimate.currency_symbol;
    if cmd.json {
        let output = serde_json::json!({
            "report": report,
            "formatted": report.yearly_cost.map(|cost| airvalue::estimate::format_cost(cost, symbol)),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let ages: Vec<String> = report.ages.iter().map(ToString::to_string).collect();
    println!("Health Risk Estimated Cost");
    println!("--------------------------");
    println!("Area:              {}", report.area);
    println!("Family members:    {}", report.member_count);
    println!("Ages:              {}", ages.join(", "));
    println!("Hours outside:     {}", report.daily_outdoor_hours);
    println!("Health condition:  {}", report.health_condition);
    println!();
    println!("{}", report.render(symbol));
    Ok(())
}

fn handle_aware(cmd: &AwareCommand) -> Result<(), Box<dyn std::error::Error>> {
    let name = cmd.region.as_deref().unwrap_or(awareness::DEFAULT_REGION);
    let guide = awareness::region(name).ok_or_else(|| {
        let known: Vec<_> = awareness::region_names().collect();
        Error::invalid_input(format!(
            "no guide for region '{name}' (known: {})",
            known.join(", ")
        ))
    })?;

    let bands: Vec<&AqiBand> = match cmd.aqi {
        Some(aqi) => vec![awareness::classify(aqi)],
        None => awareness::AQI_BANDS.iter().collect(),
    };

    if cmd.json {
        let output = serde_json::json!({
            "region": guide,
            "bands": bands,
            "tips": &awareness::REDUCTION_TIPS,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_region(guide);
    println!();
    println!("AQI Level Guidance");
    println!("==================");
    for band in bands {
        println!();
        print_band(band);
    }
    println!();
    println!("AQI Reduction Tips");
    println!("==================");
    for group in &awareness::REDUCTION_TIPS {
        println!();
        println!("[{}]", group.title);
        for tip in group.tips {
            println!("  - {tip}");
        }
    }
    Ok(())
}

fn print_region(guide: &RegionGuide) {
    println!("Region: {}", guide.region);
    println!();
    println!("Regional Challenges:");
    for challenge in guide.challenges {
        println!("  - {challenge}");
    }
    println!("Targeted Solutions:");
    for solution in guide.solutions {
        println!("  - {solution}");
    }
}

fn print_band(band: &AqiBand) {
    println!("{} ({}-{})", band.level, band.min, band.max);
    println!("  {}", band.health_impact);
    println!("  General advice:");
    for advice in band.general_advice {
        println!("    - {advice}");
    }
    println!("  Protection measures:");
    for measure in band.protection_measures {
        println!("    - {measure}");
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            let mut shown = config.clone();
            if shown.has_token() {
                shown.lookup.token = Some(REDACTION_PLACEHOLDER.to_string());
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Lookup]");
                println!("  Endpoint:           {}", shown.lookup.endpoint);
                println!(
                    "  Token:              {}",
                    shown.lookup.token.as_deref().unwrap_or("(not set)")
                );
                println!("  Min query chars:    {}", shown.lookup.min_query_chars);
                println!("  Timeout (secs):     {}", shown.lookup.timeout_secs);
                println!();
                println!("[Estimate]");
                println!("  Default age:        {}", shown.estimate.default_age);
                println!("  Hourly rate:        {}", shown.estimate.hourly_rate);
                println!("  Months per year:    {}", shown.estimate.months_per_year);
                println!("  Currency symbol:    {}", shown.estimate.currency_symbol);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
