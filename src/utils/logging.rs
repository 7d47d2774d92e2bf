use tracing::Level;
use crate::core::domain::Configuration;

// installs the JSON subscriber used by the catalog binary
pub fn setup_tracing(config: &Configuration) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(max_level(config.log_level.as_str()))
        // disable printing the name of the module in every log line.
        .with_target(false)
        // ANSI codes would end up verbatim in aggregated logs.
        .with_ansi(false)
        .json()
        .try_init();
}

fn max_level(level: &str) -> Level {
    match level {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use tracing::Level;
    use crate::core::domain::Configuration;
    use crate::utils::logging::{max_level, setup_tracing};

    #[tokio::test]
    async fn test_should_map_log_levels() {
        assert_eq!(Level::TRACE, max_level("trace"));
        assert_eq!(Level::DEBUG, max_level("debug"));
        assert_eq!(Level::INFO, max_level("info"));
        assert_eq!(Level::WARN, max_level("warn"));
        assert_eq!(Level::ERROR, max_level("error"));
        assert_eq!(Level::INFO, max_level("verbose"));
    }

    #[tokio::test]
    async fn test_should_setup_tracing_twice() {
        let config = Configuration::new("test");
        setup_tracing(&config);
        setup_tracing(&config);
    }
}
