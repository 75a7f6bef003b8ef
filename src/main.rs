//! Dashboard demo entry point: CLI wiring and config-driven engine
//! construction.

use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;

use plugdash::config::DashboardConfig;
use plugdash::control::gateway::SwitchState;
use plugdash::control::types::{PlugId, Vendor};
use plugdash::export::{export_intervals_csv, export_samples_csv};
use plugdash::schedule::{ScheduleSummary, below_threshold};
use plugdash::sim::engine::{DemoEngine, DemoPlug};
use plugdash::sim::gateway::SimulatedGateway;
use plugdash::sim::load_curve::{Harmonic, LoadCurve};

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    telemetry_out: Option<String>,
    intervals_out: Option<String>,
    at_hour: Option<f32>,
    economy_off: Vec<usize>,
}

fn print_help() {
    eprintln!("plugdash — smart power-outlet dashboard core demo");
    eprintln!();
    eprintln!("Usage: plugdash [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load configuration from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (demo, noisy, overnight)");
    eprintln!("  --seed <u64>             Override random seed");
    eprintln!("  --telemetry-out <path>   Export day profile to CSV");
    eprintln!("  --intervals-out <path>   Export economy intervals to CSV");
    eprintln!("  --at <hour>              Simulate a timeline click at the given hour");
    eprintln!("  --economy-off <idx>      Opt plug <idx> out of economy (repeatable)");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the demo preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        telemetry_out: None,
        intervals_out: None,
        at_hour: None,
        economy_off: Vec::new(),
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
            "--telemetry-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --telemetry-out requires a path argument");
                    process::exit(1);
                }
                cli.telemetry_out = Some(args[i].clone());
            }
            "--intervals-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --intervals-out requires a path argument");
                    process::exit(1);
                }
                cli.intervals_out = Some(args[i].clone());
            }
            "--at" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --at requires an hour argument");
                    process::exit(1);
                }
                match args[i].parse::<f32>() {
                    Ok(h) if h.is_finite() => cli.at_hour = Some(h),
                    _ => {
                        eprintln!("error: --at value \"{}\" is not a valid hour", args[i]);
                        process::exit(1);
                    }
                }
            }
            "--economy-off" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --economy-off requires an index argument");
                    process::exit(1);
                }
                if let Ok(idx) = args[i].parse::<usize>() {
                    cli.economy_off.push(idx);
                } else {
                    eprintln!(
                        "error: --economy-off value \"{}\" is not a valid index",
                        args[i]
                    );
                    process::exit(1);
                }
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

/// Builds the demo engine from configuration: curve, day profile, plug
/// roster, and the in-memory gateway with every plug registered.
fn build_demo(cfg: &DashboardConfig) -> DemoEngine<SimulatedGateway> {
    let c = &cfg.curve;
    let harmonics = c
        .harmonics
        .iter()
        .map(|h| Harmonic {
            amp_w: h.amp_w,
            step_div: h.step_div,
        })
        .collect();
    let mut curve = LoadCurve::new(harmonics, c.noise_std_w, c.steps_per_hour, c.seed);
    let samples = curve.day_profile(c.hours);

    // Unknown vendors are rejected by validate() before this point.
    let vendor = Vendor::from_name(&cfg.plugs.vendor).unwrap_or(Vendor::Goodwe);

    let gateway = SimulatedGateway::new();
    let mut plugs = Vec::with_capacity(cfg.plugs.count);
    for i in 0..cfg.plugs.count {
        let id = PlugId::new(format!("plug-{:02}", i + 1));
        gateway.register(id.clone(), SwitchState::from_on(cfg.plugs.initial_on));
        plugs.push(DemoPlug {
            id,
            name: format!("Outlet {}", i + 1),
            vendor,
            economy: true,
        });
    }

    DemoEngine::new(gateway, plugs, samples, cfg.economy.threshold_w)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = parse_args();

    // Load config: --scenario takes priority, then --preset, then the demo default
    let mut config = if let Some(ref path) = cli.scenario_path {
        match DashboardConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match DashboardConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        DashboardConfig::demo()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        config.curve.seed = seed;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build the simulated day and plug roster
    let mut engine = build_demo(&config);
    for &idx in &cli.economy_off {
        if idx >= engine.plugs().len() {
            eprintln!(
                "error: --economy-off index {idx} out of range (roster has {} plugs)",
                engine.plugs().len()
            );
            process::exit(1);
        }
        engine.set_plug_economy(idx, false);
    }

    // Print the derived economy windows
    for interval in engine.intervals() {
        println!("economy window {interval}");
    }
    let summary = ScheduleSummary::from_intervals(engine.intervals(), config.curve.hours as f32);
    println!("\n{summary}");

    // Simulate a timeline click if requested
    if let Some(hour) = cli.at_hour {
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        let selection = rt.block_on(async {
            engine.refresh_all().await;
            engine.select_hour(hour).await
        });

        println!(
            "\nSelected {:.2}h: economy {}",
            hour,
            if selection.economy_active {
                "active"
            } else {
                "inactive"
            }
        );
        for (id, state) in &selection.outcomes {
            println!("  {id}: {state}");
        }
        for plug in engine.plugs().iter().filter(|p| !p.economy) {
            println!("  {}: untouched (economy opt-out)", plug.id);
        }
    }

    // Export CSVs if requested
    if let Some(ref path) = cli.telemetry_out {
        let predicate = below_threshold(engine.threshold_w());
        if let Err(e) = export_samples_csv(engine.samples(), predicate, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }
    if let Some(ref path) = cli.intervals_out {
        if let Err(e) = export_intervals_csv(engine.intervals(), Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Intervals written to {path}");
    }
}
