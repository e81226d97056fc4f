//! Validate configuration command.

use anyhow::Result;
use radar_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Ticker: {}", config.data.ticker);
    println!(
        "FRED series: {}, {}, {}",
        config.data.fred_series.total_assets,
        config.data.fred_series.treasury_general_account,
        config.data.fred_series.reverse_repo
    );
    println!("Default start: {}", config.data.default_start);
    println!("Cache TTL: {}s", config.cache.ttl_secs);
    println!(
        "Signal: SMA {} / correlation {} > {}",
        config.signal.ma_window, config.signal.correlation_window, config.signal.correlation_threshold
    );

    Ok(())
}
