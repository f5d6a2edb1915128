mod tools;

use std::env;

use adminkit::ToolsConfig;
use tracing_subscriber::EnvFilter;

/// Log filter override, e.g. `ADMINKIT_LOG=debug`.
const LOG_ENV: &str = "ADMINKIT_LOG";

fn main() {
    let args: Vec<String> = env::args().collect();

    // BusyBox-style dispatch: check ADMINKIT_CMD or argv[0]
    let cmd = env::var("ADMINKIT_CMD")
        .ok()
        .or_else(|| {
            args.first().and_then(|a| {
                let name = std::path::Path::new(a)
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(a);
                if name == "adminkit" {
                    None
                } else {
                    Some(name.to_string())
                }
            })
        })
        .unwrap_or_default();

    // If invoked as "adminkit <cmd> [args...]", shift args
    let (cmd, tool_args) = if cmd.is_empty() {
        if args.len() < 2 {
            eprintln!("Usage: adminkit <command> [args...]");
            eprintln!("Available commands:");
            print_available_commands();
            std::process::exit(1);
        }
        (args[1].clone(), &args[2..])
    } else {
        (cmd, &args[1..])
    };

    let config = match ToolsConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{cmd}: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    let exit_code = dispatch(&cmd, tool_args, &config);
    std::process::exit(exit_code);
}

fn init_tracing(config: &ToolsConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cmd: &str, args: &[String], config: &ToolsConfig) -> i32 {
    match cmd {
        "update_property" => tools::update_property::run(args, config),
        "bigfiles" => tools::bigfiles::run(args, config),
        "search" => tools::search::run(args, config),
        "lines" => tools::lines::run(args),

        _ => {
            eprintln!("adminkit: unknown command '{cmd}'");
            eprintln!("Available commands:");
            print_available_commands();
            1
        }
    }
}

fn print_available_commands() {
    for cmd in adminkit::AVAILABLE_TOOLS {
        eprintln!("  {cmd}");
    }
}
