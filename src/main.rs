//! Demo entry point — scenario loading, building simulation, action impact,
//! and window ranking.

use std::path::Path;
use std::process;

use loadshift::building::metrics::EnergyMetrics;
use loadshift::building::simulator::LoadSimulator;
use loadshift::config::ScenarioConfig;
use loadshift::forecast::SyntheticForecast;
use loadshift::impact::aggregate::{self, Metrics};
use loadshift::impact::simulator::apply_actions;
use loadshift::io::export::export_csv;
use loadshift::window::score::WindowScorer;

/// Seed offset for the forecast RNG to avoid correlation with the building
/// simulation stream.
const FORECAST_SEED_OFFSET: u64 = 29;
/// Days used for the annual projection.
const DAYS_PER_YEAR: f64 = 365.0;
/// Sustained-block length reported alongside single-slot rankings.
const BLOCK_HOURS: usize = 4;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    hour_override: Option<u8>,
    windows_out: Option<String>,
}

fn print_help() {
    eprintln!("loadshift — building load and market-window optimization demo");
    eprintln!();
    eprintln!("Usage: loadshift [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>     Load scenario from TOML config file");
    eprintln!("  --preset <name>       Use a built-in preset (baseline)");
    eprintln!("  --seed <u64>          Override random seed");
    eprintln!("  --hour <0-23>         Override the evaluation hour");
    eprintln!("  --windows-out <path>  Export the scored windows to CSV");
    eprintln!("  --help                Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        hour_override: None,
        windows_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--hour" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --hour requires a 0-23 argument");
                    process::exit(1);
                }
                match args[i].parse::<u8>() {
                    Ok(h) if h <= 23 => cli.hour_override = Some(h),
                    _ => {
                        eprintln!("error: --hour value \"{}\" is not in 0-23", args[i]);
                        process::exit(1);
                    }
                }
            }
            "--windows-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --windows-out requires a path argument");
                    process::exit(1);
                }
                cli.windows_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn print_metrics_line(label: &str, metrics: &Metrics) {
    println!("{label:<22} {metrics}");
}

fn main() {
    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then baseline
    let mut scenario = if let Some(ref path) = cli.scenario_path {
        match ScenarioConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match ScenarioConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        ScenarioConfig::baseline()
    };

    if let Some(seed) = cli.seed_override {
        scenario.simulation.seed = seed;
    }
    if let Some(hour) = cli.hour_override {
        scenario.simulation.evaluation_hour = hour;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let scorer = match WindowScorer::new(scenario.weights, scenario.references) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let seed = scenario.simulation.seed;
    let hour = scenario.simulation.evaluation_hour;

    // Building state at the evaluation hour
    let mut simulator = LoadSimulator::new(
        scenario.building.id.clone(),
        scenario.occupancy,
        seed,
    );
    let state = simulator.simulate(&scenario.building.subsystems, hour, scenario.environment);
    let metrics = EnergyMetrics::from_state(&state, scenario.building.floor_area_sqm);

    println!("=== {} @ {:02}:00 ===", state.building_id, state.hour);
    println!("Occupancy:        {} people", state.occupancy_count);
    println!("Consumption:      {:.1} kW", state.total_consumption_kw());
    for s in &state.subsystems {
        println!(
            "  {:<20} {:>5.1}% of {:>6.1} kW ({})",
            s.id,
            s.current_load_pct,
            s.max_capacity_kw,
            if s.controllable { "controllable" } else { "fixed" }
        );
    }
    println!("\n{metrics}");

    // Apply the scenario's action plan
    let report = match apply_actions(&state, &scenario.actions, &scenario.policy) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    println!("\n--- Optimization Report ---");
    for outcome in &report.outcomes {
        println!(
            "{:<26} [{:<8}] {:>7.1} kWh ({:?})",
            outcome.action,
            outcome.target.as_str(),
            outcome.realized_savings_kwh,
            outcome.status
        );
    }
    println!(
        "Consumption: {:.1} kW -> {:.1} kW",
        report.baseline_consumption_kw, report.optimized_consumption_kw
    );
    println!("Realized savings: {:.1} kWh", report.realized_savings_kwh);

    // Projections: per day, per year, across the fleet
    let tariff = &scenario.tariff;
    let daily = aggregate::aggregate(
        report.realized_savings_kwh,
        tariff.price_per_kwh,
        tariff.carbon_kg_per_kwh,
    );
    let annual = aggregate::scale(&daily, DAYS_PER_YEAR).unwrap_or(daily);
    let fleet = aggregate::scale(&annual, f64::from(tariff.fleet_buildings)).unwrap_or(annual);

    println!("\n--- Projections ---");
    print_metrics_line("Daily:", &daily);
    print_metrics_line("Annual:", &annual);
    print_metrics_line(
        &format!("Fleet ({} bldgs):", tariff.fleet_buildings),
        &fleet,
    );

    // Rank the forecast horizon
    let mut generator = SyntheticForecast::new(
        scenario.forecast.peak_renewable_pct,
        scenario.forecast.night_renewable_pct,
        scenario.forecast.base_price_per_mwh,
        scenario.forecast.base_spot_price,
        seed.wrapping_add(FORECAST_SEED_OFFSET),
    );
    let slots = generator.generate(scenario.simulation.horizon_hours);

    let ranked = match scorer.rank(&slots, 3, 3) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    println!("\n--- Best Windows ---");
    for w in &ranked.best {
        println!(
            "{:>5.1}h-{:<5.1}h  score {:>5.1}  {:<9}  {:>4.0}% renew  {:.2} kg/kWh  ${:.0}/MWh",
            w.slot.start_hr,
            w.slot.end_hr,
            w.score,
            w.recommendation,
            w.slot.renewable_pct,
            w.slot.carbon_intensity_kg_per_kwh,
            w.slot.price_per_mwh
        );
    }
    println!("--- Avoid Windows ---");
    for w in &ranked.worst {
        println!(
            "{:>5.1}h-{:<5.1}h  score {:>5.1}  {:<9}  {:>4.0}% renew  {:.2} kg/kWh  ${:.0}/MWh",
            w.slot.start_hr,
            w.slot.end_hr,
            w.score,
            w.recommendation,
            w.slot.renewable_pct,
            w.slot.carbon_intensity_kg_per_kwh,
            w.slot.price_per_mwh
        );
    }

    if scenario.simulation.horizon_hours >= BLOCK_HOURS {
        match scorer.rank_blocks(&slots, BLOCK_HOURS, 1) {
            Ok(blocks) => {
                if let Some(block) = blocks.first() {
                    println!(
                        "\nBest {BLOCK_HOURS}h block: {:>5.1}h-{:<5.1}h  score {:.1}  {}",
                        block.slot.start_hr, block.slot.end_hr, block.score, block.recommendation
                    );
                }
            }
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    }

    // Export the full scored horizon if requested
    if let Some(ref path) = cli.windows_out {
        let all = match scorer.rank(&slots, slots.len(), 0) {
            Ok(r) => r.best,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        };
        if let Err(e) = export_csv(&all, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Windows written to {path}");
    }
}
