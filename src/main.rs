use clap::Parser;
use tracing::debug;

use jumpto::cli::{Cli, run_cli_command};
use jumpto::config::{get_config, init_config, update_config};
use jumpto::system::init_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_config();
    if let Some(path) = cli.store {
        let mut config = (*get_config()).clone();
        config.storage.backend = "file".to_string();
        config.storage.path = path;
        update_config(config);
    }
    let config = get_config();

    // 未显式配置时 CLI 只输出警告以上的日志，避免干扰命令输出
    let mut logging = config.logging.clone();
    if std::env::var("RUST_LOG").is_err() && logging.file.is_none() {
        logging.level = "warn".to_string();
    }
    let log_guard = match init_logging(&logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("{}", e.format_colored());
            None
        }
    };
    debug!("Using {} store at {}", config.storage.backend, config.storage.path);

    let result = run_cli_command(cli.command, &config).await;
    drop(log_guard);

    if let Err(e) = result {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
}
