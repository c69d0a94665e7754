use crate::config::LogConfig;

fn builder(config: &LogConfig) -> env_logger::Builder {
    let env = env_logger::Env::default().default_filter_or(config.filter.as_str());
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp_millis();
    builder
}

/// Installs `env_logger`. `RUST_LOG` wins over the configured filter, which
/// also lets wgpu and winit logs through when asked for. Calling this again
/// after a logger is installed does nothing.
pub fn init(config: &LogConfig) {
    if builder(config).try_init().is_err() {
        log::trace!("logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn configured_filter_applies_without_rust_log() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LogConfig {
            filter: "debug".to_string(),
        };
        assert_eq!(builder(&config).build().filter(), LevelFilter::Debug);

        let quiet = LogConfig {
            filter: "warn".to_string(),
        };
        assert_eq!(builder(&quiet).build().filter(), LevelFilter::Warn);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init(&LogConfig::default());
        init(&LogConfig::default());
        log::debug!("still logging after a second init");
    }
}
