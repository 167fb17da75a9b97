//! Layered server configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. built-in defaults
//! 2. a configuration file: the given path, or `cellagent.{toml,json,yaml}`
//!    in the working directory if present
//! 3. `CELLAGENT__*` environment variables, e.g. `CELLAGENT__PORT=8080` or
//!    `CELLAGENT__SIMULATION__CHUNK_SIZE=80`

use std::path::Path;

use cellagent_core::config::ServerConfig;
use cellagent_core::{CellAgentError, Result};
use config::{Config, ConfigError, Environment, File};

/// Environment variable holding an explicit configuration file path.
pub const CONFIG_PATH_ENV: &str = "CELLAGENT_CONFIG";

/// Load the server configuration.
///
/// An explicit `path` must exist; the implicit `cellagent.*` file is optional.
pub fn load(path: Option<&Path>) -> Result<ServerConfig> {
    let defaults = Config::try_from(&ServerConfig::default()).map_err(config_error)?;

    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("cellagent").required(false),
    };

    let config: ServerConfig = Config::builder()
        .add_source(defaults)
        .add_source(file)
        .add_source(
            Environment::with_prefix("CELLAGENT")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .and_then(Config::try_deserialize)
        .map_err(config_error)?;

    config.validate()?;
    Ok(config)
}

/// Describe where [`load`] reads its file layer from, for startup logs.
///
/// Loading happens before logging is set up, so the binary reports the
/// source once the subscriber is installed.
pub fn describe_source(path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("{} (with CELLAGENT__* overrides)", path.display()),
        None => "defaults and optional cellagent.* file (with CELLAGENT__* overrides)".to_string(),
    }
}

fn config_error(err: ConfigError) -> CellAgentError {
    CellAgentError::configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
            port = 8088
            log_level = "debug"

            [simulation]
            chunk_size = 80
            agent_gap_ms = 0
            "#,
        );

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.port, 8088);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.simulation.chunk_size, 80);
        assert_eq!(config.simulation.agent_gap_ms, 0);
        // Untouched values keep their defaults.
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.simulation.progress_steps, 20);
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let err = load(Some(Path::new("/no/such/cellagent.toml"))).unwrap_err();
        assert!(matches!(err, CellAgentError::Configuration { .. }));
    }

    #[test]
    fn test_describe_source_names_the_file_layer() {
        let described = describe_source(Some(Path::new("/etc/cellagent/server.toml")));
        assert!(described.starts_with("/etc/cellagent/server.toml"));
        assert!(describe_source(None).contains("cellagent.*"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_config(
            r"
            [simulation]
            progress_steps = 0
            ",
        );
        assert!(matches!(
            load(Some(file.path())),
            Err(CellAgentError::Validation { .. })
        ));
    }
}
