//! # Breaking Boot Host
//!
//! Command-line entry point for the harness host.

use breaking_boot_host::{HostConfig, HostMode, HostRuntime};
use services_logger::LogLevel;
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("breaking_boot_host");

    let config = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        print_usage(program);
        process::exit(1);
    });

    let runtime = HostRuntime::new(config).unwrap_or_else(|e| {
        eprintln!("Failed to create runtime: {}", e);
        process::exit(1);
    });

    if let Err(e) = runtime.run() {
        eprintln!("Runtime error: {}", e);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<HostConfig, String> {
    let mut config = HostConfig::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --script".to_string());
                }
                config.load_script(&args[i]).map_err(|e| e.to_string())?;
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --config".to_string());
                }
                config.load_settings(&args[i]).map_err(|e| e.to_string())?;
            }
            "--max-cells" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --max-cells".to_string());
                }
                let cells = args[i]
                    .parse()
                    .map_err(|_| format!("Invalid max-cells value: {}", args[i]))?;
                config.max_cells = Some(cells);
            }
            "--log-level" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --log-level".to_string());
                }
                config.log_level = LogLevel::parse(&args[i])
                    .ok_or_else(|| format!("Invalid log level: {}", args[i]))?;
            }
            "--prompt" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing value for --prompt".to_string());
                }
                config.prompt = args[i].clone();
            }
            "--read-line" => {
                config.mode = HostMode::ReadLine;
            }
            "--disabled" => {
                config.disabled = true;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other => {
                return Err(format!("Unknown option: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} [OPTIONS]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --script <FILE>      Key script file (default: read keys from stdin)");
    eprintln!("  -c, --config <FILE>      Settings overrides (JSON)");
    eprintln!("  --max-cells <N>          Line editor bound in display cells");
    eprintln!("  --disabled               Turn the feature gate off");
    eprintln!("  --read-line              Read one bounded line instead of running the menu");
    eprintln!("  --prompt <TEXT>          Prompt for --read-line (default: \"Input: \")");
    eprintln!("  --log-level <LEVEL>      debug, info, warn (default) or error");
    eprintln!("  -h, --help               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} --script scripts/support_then_normal.bbkeys", program);
    eprintln!("  {} --read-line --max-cells 6", program);
}
