use brrtrouter_resolver::{cli, logging};

fn main() -> anyhow::Result<()> {
    let mut config = logging::LogConfig::from_env();
    // Keep stdout for command output unless a level was asked for explicitly.
    if std::env::var("BRRTR_LOG_LEVEL").is_err() {
        config.log_level = "warn".to_string();
    }
    config.async_logging = false;
    logging::init_logging_with_config(&config)?;
    cli::run_cli()
}
