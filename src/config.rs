use std::path::PathBuf;

use url::Url;

use crate::{
    api::{models::DOWNLOAD_PATH, ApiConfig},
    domain::AppError,
    utils::{join_endpoint, sanitize_filename},
};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 8080;
const FALLBACK_PORT: u16 = 80;
const DEFAULT_PATH_PREFIX: &str = "/DPR";
const DEFAULT_FILE_NAME: &str = "download.bin";

/// Where a finished download ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    /// Write straight into a directory.
    Directory(PathBuf),
    /// Ask the user with a native save dialog.
    Dialog,
}

#[derive(Debug, Clone)]
pub struct TriggerConfig {
    pub api: ApiConfig,
    pub file_name: String,
    pub sink: SinkTarget,
}

impl TriggerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match lookup("TRIGGER_SERVER_URL") {
            Some(url) => url,
            None => {
                let host = lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
                let port = match lookup("SERVER_PORT") {
                    Some(raw) => raw.trim().parse().unwrap_or(FALLBACK_PORT),
                    None => DEFAULT_PORT,
                };
                format!("http://{}:{}", host, port)
            }
        };
        let base = Url::parse(&base)
            .map_err(|e| AppError::Config(format!("bad server url {:?}: {}", base, e)))?;
        if base.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "bad server url {:?}: missing scheme or host",
                base.as_str()
            )));
        }

        let prefix =
            lookup("TRIGGER_PATH_PREFIX").unwrap_or_else(|| DEFAULT_PATH_PREFIX.to_string());
        let endpoint = join_endpoint(&base, &prefix, DOWNLOAD_PATH)
            .map_err(|e| AppError::Config(format!("bad path prefix {:?}: {}", prefix, e)))?;

        let mut api = ApiConfig::new(endpoint);
        if let Some(value) = lookup("TRIGGER_FIELD_VALUE") {
            api.field_value = value;
        }

        let file_name = lookup("TRIGGER_FILE_NAME")
            .map(|name| sanitize_filename(&name))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        let sink = match lookup("TRIGGER_DOWNLOAD_DIR") {
            Some(dir) if !dir.trim().is_empty() => SinkTarget::Directory(PathBuf::from(dir)),
            _ => SinkTarget::Dialog,
        };

        Ok(Self {
            api,
            file_name,
            sink,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = TriggerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(
            config.api.endpoint.as_str(),
            "http://localhost:8080/DPR/download"
        );
        assert_eq!(config.api.field_value, "testdata");
        assert_eq!(config.file_name, "download.bin");
        assert_eq!(config.sink, SinkTarget::Dialog);
    }

    #[test]
    fn test_host_port_and_bad_port_fallback() {
        let config = TriggerConfig::from_lookup(lookup_from(&[
            ("SERVER_HOST", "example.internal"),
            ("SERVER_PORT", "not-a-port"),
        ]))
        .unwrap();
        assert_eq!(
            config.api.endpoint.as_str(),
            "http://example.internal/DPR/download"
        );
    }

    #[test]
    fn test_overrides() {
        let config = TriggerConfig::from_lookup(lookup_from(&[
            ("TRIGGER_SERVER_URL", "https://data.example.com"),
            ("TRIGGER_PATH_PREFIX", ""),
            ("TRIGGER_FIELD_VALUE", "other"),
            ("TRIGGER_FILE_NAME", "report/2026.csv"),
            ("TRIGGER_DOWNLOAD_DIR", "/tmp/out"),
        ]))
        .unwrap();
        assert_eq!(
            config.api.endpoint.as_str(),
            "https://data.example.com/download"
        );
        assert_eq!(config.api.field_value, "other");
        assert_eq!(config.file_name, "report_2026.csv");
        assert_eq!(
            config.sink,
            SinkTarget::Directory(PathBuf::from("/tmp/out"))
        );
    }

    #[test]
    fn test_server_url_with_path_keeps_it() {
        let config = TriggerConfig::from_lookup(lookup_from(&[(
            "TRIGGER_SERVER_URL",
            "https://data.example.com/app",
        )]))
        .unwrap();
        assert_eq!(
            config.api.endpoint.as_str(),
            "https://data.example.com/app/DPR/download"
        );
    }

    #[test]
    fn test_scheme_less_server_url_blames_server_url() {
        let err = TriggerConfig::from_lookup(lookup_from(&[(
            "TRIGGER_SERVER_URL",
            "localhost:8080",
        )]))
        .unwrap_err();
        match err {
            AppError::Config(msg) => assert!(msg.starts_with("bad server url"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_server_url() {
        let err = TriggerConfig::from_lookup(lookup_from(&[("TRIGGER_SERVER_URL", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
