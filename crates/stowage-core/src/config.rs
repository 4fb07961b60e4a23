//! Configuration module
//!
//! Configuration is read once at startup. Values come from the process
//! environment, optionally seeded from a `config.env` (or `.env`) file in the
//! working directory. Variables already present in the environment win over
//! file values.

use std::env;
use std::path::Path;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8080;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const DEFAULT_REGION: &str = "us-east-1";

/// Files probed, in order, for configuration values.
const CONFIG_FILES: [&str; 2] = ["config.env", ".env"];

/// What a successful upload answers with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadResponseMode {
    /// `{"file": "<storage key>"}`
    #[default]
    Key,
    /// `{"url": "<store location>"}`
    Location,
}

impl FromStr for UploadResponseMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "key" | "file" => Ok(UploadResponseMode::Key),
            "url" | "location" => Ok(UploadResponseMode::Location),
            _ => Err(anyhow::anyhow!(
                "UPLOAD_RESPONSE must be 'key' or 'url', got '{}'",
                s
            )),
        }
    }
}

/// S3 connection settings
#[derive(Clone, Debug, Default)]
pub struct S3Settings {
    pub bucket: Option<String>,
    pub region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub storage_backend: StorageBackend,
    pub s3: S3Settings,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: String,
    pub max_upload_size_bytes: usize,
    pub upload_response: UploadResponseMode,
    pub mime_strict: bool,
    /// Configuration file that seeded the environment, if any
    pub config_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            storage_backend: StorageBackend::S3,
            s3: S3Settings {
                region: DEFAULT_REGION.to_string(),
                ..S3Settings::default()
            },
            local_storage_path: None,
            local_storage_base_url: format!("http://localhost:{}/files", SERVER_PORT),
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            upload_response: UploadResponseMode::Key,
            mime_strict: false,
            config_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the config file (if any) and the environment.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config_file = load_config_file()?;
        let mut config = Self::from_lookup(|key| env::var(key).ok())?;
        config.config_file = config_file;
        Ok(config)
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_port = match get("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let environment = get("ENVIRONMENT")
            .or_else(|| get("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let storage_backend = get("STORAGE_BACKEND")
            .map(|s| s.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or_default();

        let endpoint = get("S3_ENDPOINT").or_else(|| {
            get("S3_DOMAIN").map(|domain| {
                if domain.starts_with("http://") || domain.starts_with("https://") {
                    domain
                } else {
                    format!("https://{}", domain)
                }
            })
        });

        let s3 = S3Settings {
            bucket: get("S3_BUCKET"),
            region: get("S3_REGION")
                .or_else(|| get("AWS_REGION"))
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint,
            access_key_id: get("AWS_ACCESS_KEY_ID"),
            secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
            session_token: get("AWS_SECURITY_TOKEN").or_else(|| get("AWS_SESSION_TOKEN")),
        };

        let max_upload_size_mb = match get("MAX_UPLOAD_SIZE_MB") {
            Some(mb) => mb
                .trim()
                .parse::<usize>()
                .map_err(|_| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a valid number"))?,
            None => MAX_UPLOAD_SIZE_MB,
        };
        let max_upload_size_bytes = max_upload_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_UPLOAD_SIZE_MB is too large"))?;

        let upload_response = get("UPLOAD_RESPONSE")
            .map(|s| s.parse::<UploadResponseMode>())
            .transpose()?
            .unwrap_or_default();

        let config = Config {
            server_port,
            environment,
            storage_backend,
            s3,
            local_storage_path: get("LOCAL_STORAGE_PATH"),
            local_storage_base_url: get("LOCAL_STORAGE_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}/files", server_port)),
            max_upload_size_bytes,
            upload_response,
            mime_strict: get("MIME_STRICT")
                .map(|s| s.trim().to_lowercase().parse().unwrap_or(false))
                .unwrap_or(false),
            config_file: None,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than zero"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3.bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Seed the environment from the first configuration file found.
fn load_config_file() -> Result<Option<String>, anyhow::Error> {
    for name in CONFIG_FILES {
        if Path::new(name).is_file() {
            dotenvy::from_filename(name)
                .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", name, e))?;
            return Ok(Some(name.to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn s3_defaults() {
        let config = Config::from_lookup(lookup(&[("S3_BUCKET", "uploads")])).unwrap();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.storage_backend, StorageBackend::S3);
        assert_eq!(config.s3.bucket.as_deref(), Some("uploads"));
        assert_eq!(config.s3.region, "us-east-1");
        assert_eq!(config.max_upload_size_bytes, 100 * 1024 * 1024);
        assert_eq!(config.upload_response, UploadResponseMode::Key);
        assert!(!config.mime_strict);
    }

    #[test]
    fn s3_requires_bucket() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("S3_BUCKET"));
    }

    #[test]
    fn local_requires_path() {
        let err = Config::from_lookup(lookup(&[("STORAGE_BACKEND", "local")])).unwrap_err();
        assert!(err.to_string().contains("LOCAL_STORAGE_PATH"));

        let config = Config::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", "/tmp/stowage"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(config.local_storage_base_url, "http://localhost:9000/files");
    }

    #[test]
    fn credentials_and_domain() {
        let config = Config::from_lookup(lookup(&[
            ("S3_BUCKET", "uploads"),
            ("S3_DOMAIN", "s3-us-west-2.amazonaws.com"),
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_SECURITY_TOKEN", "token"),
            ("AWS_REGION", "us-west-2"),
        ]))
        .unwrap();
        assert_eq!(
            config.s3.endpoint.as_deref(),
            Some("https://s3-us-west-2.amazonaws.com")
        );
        assert_eq!(config.s3.access_key_id.as_deref(), Some("AKIA"));
        assert_eq!(config.s3.secret_access_key.as_deref(), Some("secret"));
        assert_eq!(config.s3.session_token.as_deref(), Some("token"));
        assert_eq!(config.s3.region, "us-west-2");
    }

    #[test]
    fn explicit_endpoint_wins_over_domain() {
        let config = Config::from_lookup(lookup(&[
            ("S3_BUCKET", "uploads"),
            ("S3_ENDPOINT", "http://localhost:9000"),
            ("S3_DOMAIN", "ignored.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.s3.endpoint.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[("S3_BUCKET", "b"), ("PORT", "http")])).is_err());
        assert!(
            Config::from_lookup(lookup(&[("S3_BUCKET", "b"), ("UPLOAD_RESPONSE", "xml")]))
                .is_err()
        );
        assert!(
            Config::from_lookup(lookup(&[("S3_BUCKET", "b"), ("MAX_UPLOAD_SIZE_MB", "0")]))
                .is_err()
        );
        assert!(
            Config::from_lookup(lookup(&[("S3_BUCKET", "b"), ("MAX_UPLOAD_SIZE_MB", "lots")]))
                .is_err()
        );
        assert!(Config::from_lookup(lookup(&[
            ("S3_BUCKET", "b"),
            ("MAX_UPLOAD_SIZE_MB", "18446744073709551615"),
        ]))
        .is_err());
    }

    #[test]
    fn upload_response_and_strict_mime() {
        let config = Config::from_lookup(lookup(&[
            ("S3_BUCKET", "b"),
            ("UPLOAD_RESPONSE", "url"),
            ("MIME_STRICT", "TRUE"),
            ("ENVIRONMENT", "prod"),
        ]))
        .unwrap();
        assert_eq!(config.upload_response, UploadResponseMode::Location);
        assert!(config.mime_strict);
        assert_eq!(config.environment, "prod");
    }
}
