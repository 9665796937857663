use clap::Parser;
use probe::cli::output::{format_report_json, format_report_pretty};
use probe::cli::{
    handle_check, handle_completions, handle_config_init, Cli, Commands, ConfigCommands,
    EXIT_ERROR, EXIT_HEALTHY, EXIT_UNHEALTHY,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result: Result<i32, Box<dyn std::error::Error>> = match cli.command {
        Commands::Check(args) => match handle_check(&args).await {
            Ok(report) => {
                let output: Result<String, Box<dyn std::error::Error>> = if args.json {
                    format_report_json(&report).map_err(Into::into)
                } else {
                    Ok(format_report_pretty(&report))
                };
                output.map(|text| {
                    println!("{}", text);
                    if report.healthy {
                        EXIT_HEALTHY
                    } else {
                        EXIT_UNHEALTHY
                    }
                })
            }
            Err(e) => Err(e),
        },
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args).map(|msg| {
                println!("{}", msg);
                EXIT_HEALTHY
            }),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(EXIT_HEALTHY)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}
