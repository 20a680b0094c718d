use clap::Parser;
use lotto::cli::{self, Command};
use lotto::core::config::{self, CliOverrides};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "lotto", about = "Lotto number picker with include/exclude constraints")]
struct Args {
    /// Backend base URL (overrides config file and LOTTO_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Seed for reproducible random picks
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to lotto.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("lotto.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Lotto starting up: {:?}", args.command);

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let overrides = CliOverrides {
        api_url: args.api_url,
        seed: args.seed,
    };
    let resolved = config::resolve(&file_config, &overrides);

    match cli::run(args.command, resolved).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::warn!("Exiting with error: {}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
