// Job configuration, read once by the hosting binary and turned into typed values.
//
// Sources
// - Environment variables prefixed KB_SYNC_, with an optional .env file loaded first.
// - Any JSON (or other serde) job definition, through Deserialize.

use crate::modules::kb_revisions::adapters::outbound::watermark_store_file::DEFAULT_REVISION_FILE_NAME;
use crate::modules::kb_revisions::adapters::outbound::workspace_marker::DEFAULT_MARKER_EXTENSION;
use crate::modules::kb_revisions::core::coordinates::{Credentials, DbOptions, KbCoordinates};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CHANGELOG_FILE_NAME: &str = "changelog.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KbSyncConfig {
    pub server_url: String,
    pub kb_name: String,
    #[serde(default)]
    pub kb_version: Option<String>,
    #[serde(default)]
    pub server_credentials: Option<Credentials>,
    #[serde(default)]
    pub db: DbOptions,
    pub builds_dir: PathBuf,
    #[serde(default = "default_revision_file_name")]
    pub revision_file_name: String,
    #[serde(default = "default_changelog_file_name")]
    pub changelog_file_name: String,
    #[serde(default = "default_marker_extension")]
    pub marker_extension: String,
}

fn default_revision_file_name() -> String {
    DEFAULT_REVISION_FILE_NAME.to_string()
}

fn default_changelog_file_name() -> String {
    DEFAULT_CHANGELOG_FILE_NAME.to_string()
}

fn default_marker_extension() -> String {
    DEFAULT_MARKER_EXTENSION.to_string()
}

impl KbSyncConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let credentials = |user_key: &str, password_key: &str| {
            get(user_key).map(|username| Credentials::new(username, get(password_key).unwrap_or_default()))
        };

        let create_in_kb_folder = match get("KB_SYNC_DB_CREATE_IN_KB_FOLDER") {
            Some(value) => parse_bool("KB_SYNC_DB_CREATE_IN_KB_FOLDER", &value)?,
            None => DbOptions::default().create_in_kb_folder,
        };

        Ok(Self {
            server_url: require("KB_SYNC_SERVER_URL")?,
            kb_name: require("KB_SYNC_KB_NAME")?,
            kb_version: get("KB_SYNC_KB_VERSION"),
            server_credentials: credentials("KB_SYNC_USERNAME", "KB_SYNC_PASSWORD"),
            db: DbOptions {
                server_instance: get("KB_SYNC_DB_SERVER_INSTANCE"),
                credentials: credentials("KB_SYNC_DB_USERNAME", "KB_SYNC_DB_PASSWORD"),
                name: get("KB_SYNC_DB_NAME"),
                create_in_kb_folder,
                ..DbOptions::default()
            },
            builds_dir: PathBuf::from(require("KB_SYNC_BUILDS_DIR")?),
            revision_file_name: get("KB_SYNC_REVISION_FILE")
                .unwrap_or_else(default_revision_file_name),
            changelog_file_name: get("KB_SYNC_CHANGELOG_FILE")
                .unwrap_or_else(default_changelog_file_name),
            marker_extension: get("KB_SYNC_MARKER_EXTENSION")
                .unwrap_or_else(default_marker_extension),
        })
    }

    pub fn coordinates(&self) -> KbCoordinates {
        let coordinates = KbCoordinates::new(&self.server_url, &self.kb_name);
        let coordinates = match &self.kb_version {
            Some(version) => coordinates.with_version(version),
            None => coordinates,
        };
        match &self.server_credentials {
            Some(credentials) => coordinates.with_credentials(credentials.clone()),
            None => coordinates,
        }
    }

    pub fn db_options(&self) -> DbOptions {
        DbOptions {
            include_all_versions: false,
            ..self.db.clone()
        }
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}
