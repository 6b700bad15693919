//! Configuração do servidor lida de variáveis de ambiente (e de `.env`, via `dotenv`).

use std::env;
use std::time::Duration;

use thiserror::Error;
use wiki_core::AnalyzerConfig;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },
}

/// Configurações da aplicação.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_prefix: String,
    pub project_name: String,
    pub version: String,
    pub debug: bool,
    pub bind_addr: String,
    pub database_url: String,
    pub wikipedia_api_url: String,
    pub analysis_timeout: Duration,
    pub cors_origins: Vec<String>,
    pub analyzer: AnalyzerConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            project_name: "Wikipedia Analyzer API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            debug: false,
            bind_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite://wiki.sqlite?mode=rwc".to_string(),
            wikipedia_api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            analysis_timeout: Duration::from_secs(30),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl Settings {
    /// Lê as configurações do ambiente do processo.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Lê as configurações de uma fonte arbitrária de chave → valor.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Settings::default();

        if let Some(v) = lookup("API_PREFIX") {
            s.api_prefix = normalize_prefix(&v);
        }
        if let Some(v) = lookup("PROJECT_NAME") {
            s.project_name = v;
        }
        if let Some(v) = lookup("VERSION") {
            s.version = v;
        }
        if let Some(v) = lookup("DEBUG") {
            s.debug = parse_bool("DEBUG", &v)?;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            s.bind_addr = v;
        }
        if let Some(v) = lookup("DATABASE_URL") {
            s.database_url = v;
        }
        if let Some(v) = lookup("WIKIPEDIA_API_URL") {
            s.wikipedia_api_url = v;
        }
        if let Some(v) = lookup("ANALYSIS_TIMEOUT_SECS") {
            s.analysis_timeout = Duration::from_secs(parse_number("ANALYSIS_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = lookup("CORS_ORIGINS") {
            s.cors_origins = v
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
        }
        if let Some(v) = lookup("STOPWORD_LANGUAGE") {
            s.analyzer.language = v;
        }
        if let Some(v) = lookup("TOP_N") {
            s.analyzer.top_n = parse_number("TOP_N", &v)? as usize;
        }
        if let Some(v) = lookup("MAX_ENTITIES") {
            s.analyzer.max_entities = parse_number("MAX_ENTITIES", &v)? as usize;
        }

        Ok(s)
    }

    /// Filtro padrão de log quando `RUST_LOG` não está definido.
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// Filtro de log da inicialização. Uma configuração inválida ainda precisa ser
/// registrada, então cai no filtro `info`.
pub fn startup_log_filter(settings: &Result<Settings, ConfigError>) -> &'static str {
    settings.as_ref().map(Settings::log_filter).unwrap_or("info")
}

/// "api/" → "/api"; vazio continua vazio (rotas na raiz).
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings_from(&[]).unwrap();
        assert_eq!(s.api_prefix, "/api");
        assert_eq!(s.bind_addr, "0.0.0.0:8000");
        assert_eq!(s.analysis_timeout, Duration::from_secs(30));
        assert_eq!(s.analyzer.top_n, 10);
        assert_eq!(s.log_filter(), "info");
    }

    #[test]
    fn test_overrides() {
        let s = settings_from(&[
            ("API_PREFIX", "v1/"),
            ("DEBUG", "true"),
            ("TOP_N", "5"),
            ("MAX_ENTITIES", "7"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
        ])
        .unwrap();
        assert_eq!(s.api_prefix, "/v1");
        assert!(s.debug);
        assert_eq!(s.log_filter(), "debug");
        assert_eq!(s.analyzer.top_n, 5);
        assert_eq!(s.analyzer.max_entities, 7);
        assert_eq!(s.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_malformed_number_is_error() {
        let err = settings_from(&[("TOP_N", "ten")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "TOP_N".to_string(),
                value: "ten".to_string()
            }
        );
        assert!(settings_from(&[("DEBUG", "maybe")]).is_err());
    }

    #[test]
    fn test_startup_log_filter() {
        assert_eq!(startup_log_filter(&settings_from(&[("DEBUG", "1")])), "debug");
        assert_eq!(startup_log_filter(&settings_from(&[])), "info");
        assert_eq!(startup_log_filter(&settings_from(&[("DEBUG", "maybe"), ("TOP_N", "x")])), "info");
    }
}
