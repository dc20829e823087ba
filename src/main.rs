//! EV bench simulator entry point — CLI wiring and config-driven runs.

use std::path::Path;
use std::process;

use ev_sim::config::ScenarioConfig;
use ev_sim::io::export::export_csv;
use ev_sim::runner::run_scenario;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    ticks_override: Option<usize>,
    telemetry_out: Option<String>,
    #[cfg(feature = "tui")]
    tui: bool,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("ev-sim — EV powertrain bench simulator");
    eprintln!();
    eprintln!("Usage: ev-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>        Load scenario from TOML config file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline)");
    eprintln!("  --ticks <n>              Override the number of ticks to run");
    eprintln!("  --telemetry-out <path>   Export tick records to CSV");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Drive the bench interactively");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after the run");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        ticks_override: None,
        telemetry_out: None,
        #[cfg(feature = "tui")]
        tui: false,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
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
            "--ticks" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --ticks requires a count argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<usize>() {
                    cli.ticks_override = Some(n);
                } else {
                    eprintln!("error: --ticks value \"{}\" is not a valid count", args[i]);
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
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
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

    if let Some(ticks) = cli.ticks_override {
        scenario.run.ticks = ticks;
    }

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Interactive bench takes over the terminal and owns its own engine
    #[cfg(feature = "tui")]
    if cli.tui {
        let name = if cli.scenario_path.is_some() {
            "scenario"
        } else {
            cli.preset.as_deref().unwrap_or("baseline")
        };
        ev_sim::tui::run(scenario, name);
        return;
    }

    let out = run_scenario(&scenario);

    for r in &out.records {
        println!("{r}");
    }
    println!("\n{}", out.summary);

    if let Some(ref path) = cli.telemetry_out {
        if let Err(e) = export_csv(&out.records, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Telemetry written to {path}");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(ev_sim::api::AppState {
            summary: out.summary,
            final_state: out.final_state,
            records: out.records,
            waveforms: out.waveforms,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(ev_sim::api::serve(state, addr));
    }
}
