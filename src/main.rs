use acctmgr::cli::{self, Cli};
use acctmgr::config::Config;
use clap::Parser;
use log::info;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));

    // Log to a file (truncated on each run) so stdout stays a clean report
    let log_file = Config::get_config_dir().ok().and_then(|dir| {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(dir.join("acctmgr.log"))
            .ok()
    });
    if let Some(log_file) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    builder.init();
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);
    info!("Starting acctmgr");

    let code = match cli::run(cli).await {
        Ok(status) => status.exit_code(),
        Err(err) => {
            eprintln!(" {:#}", err);
            1
        }
    };
    std::process::exit(code);
}
