use serde::Deserialize;
use std::path::Path;

/// Server-side defaults for talking to the monitoring backend, loaded
/// from `perfgate.toml` with `PERFGATE_*` env overrides. Every field
/// can also be overridden per-request in the POST body.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GateConfig {
    /// Monitoring backend host, e.g. `abc123.live.example.com`.
    #[serde(default)]
    pub server: String,
    /// Backend environment id for multi-environment tenants. Empty
    /// means a single-environment tenant.
    #[serde(default)]
    pub env: String,
    /// Default API token, sent as `Authorization: Api-Token ...`.
    #[serde(default)]
    pub api_token: String,
}

impl GateConfig {
    /// Load config from a TOML file, then apply env overrides. Returns
    /// defaults if the file doesn't exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config = Self::parse(&contents)?;
            tracing::info!("loaded config from {}", path.display());
            config
        } else {
            tracing::info!("config file not found at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_env();

        if config.server.is_empty() {
            tracing::info!(
                "no default backend server configured; requests must supply `server` in the POST body"
            );
        } else {
            tracing::info!(server = %config.server, "default backend server configured");
        }
        if config.api_token.is_empty() {
            tracing::info!(
                "no default api_token configured; requests must supply `api_token` in the POST body"
            );
        }
        if config.env.is_empty() {
            tracing::info!(
                "no backend environment configured; multi-environment tenants must supply `env` per request"
            );
        }

        Ok(config)
    }

    fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env(&mut self) {
        for (var, field) in [
            ("PERFGATE_SERVER", &mut self.server),
            ("PERFGATE_ENV", &mut self.env),
            ("PERFGATE_API_TOKEN", &mut self.api_token),
        ] {
            if let Ok(value) = std::env::var(var) {
                if !value.is_empty() {
                    *field = value;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = GateConfig::parse("").unwrap();
        assert!(config.server.is_empty());
        assert!(config.env.is_empty());
        assert!(config.api_token.is_empty());
    }

    #[test]
    fn test_full_file_parses() {
        let config = GateConfig::parse(
            r#"
            server = "abc123.live.example.com"
            env = "prod"
            api_token = "t0ken"
            "#,
        )
        .unwrap();
        assert_eq!(config.server, "abc123.live.example.com");
        assert_eq!(config.env, "prod");
        assert_eq!(config.api_token, "t0ken");
    }

    #[test]
    fn test_partial_file_keeps_field_defaults() {
        let config = GateConfig::parse(r#"server = "abc123.live.example.com""#).unwrap();
        assert_eq!(config.server, "abc123.live.example.com");
        assert!(config.api_token.is_empty());
    }
}
