// Typed configuration handed to the collaborators.
//
// Purpose
// - KbCoordinates: where the knowledge base lives on the remote server and who is asking.
// - DbOptions: how a first-time checkout should create the local KB database.
//
// Boundaries
// - Credentials arrive already resolved. Nothing here looks them up or validates them.
// - No command-line shaped strings: synchronizers receive these structs as-is.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KbCoordinates {
    pub server_url: String,
    pub kb_name: String,
    #[serde(default)]
    pub kb_version: Option<String>,
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

impl KbCoordinates {
    pub fn new(server_url: impl Into<String>, kb_name: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            kb_name: kb_name.into(),
            kb_version: None,
            credentials: None,
        }
    }

    pub fn with_version(mut self, kb_version: impl Into<String>) -> Self {
        let kb_version = kb_version.into();
        self.kb_version = (!kb_version.trim().is_empty()).then_some(kb_version);
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// The KB is checked out into a folder named after it, inside the job workspace.
    pub fn working_directory(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.kb_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DbOptions {
    #[serde(default)]
    pub server_instance: Option<String>,
    #[serde(default)]
    pub credentials: Option<Credentials>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_create_in_kb_folder")]
    pub create_in_kb_folder: bool,
    #[serde(default)]
    pub include_all_versions: bool,
}

fn default_create_in_kb_folder() -> bool {
    true
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            server_instance: None,
            credentials: None,
            name: None,
            create_in_kb_folder: default_create_in_kb_folder(),
            include_all_versions: false,
        }
    }
}

impl DbOptions {
    pub fn use_integrated_security(&self) -> bool {
        self.credentials.is_none()
    }

    /// Returns the options a checkout actually runs with. The database name is the configured
    /// one when present, otherwise a fresh unique name derived from the KB name.
    /// A checkout never fetches all KB versions, whatever was configured.
    pub fn with_resolved_name(&self, kb_name: &str) -> Self {
        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("GX_KB_{kb_name}_{}", Uuid::now_v7()),
        };
        Self {
            name: Some(name),
            include_all_versions: false,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod kb_coordinates_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_place_the_kb_inside_the_workspace() {
        let coordinates = KbCoordinates::new("https://kb.example.test/v1", "Sales");
        assert_eq!(
            coordinates.working_directory(Path::new("/ws/job")),
            PathBuf::from("/ws/job/Sales")
        );
    }

    #[rstest]
    #[case("Trunk", Some("Trunk"))]
    #[case("   ", None)]
    #[case("", None)]
    fn blank_versions_are_dropped(#[case] version: &str, #[case] expected: Option<&str>) {
        let coordinates = KbCoordinates::new("https://kb.example.test/v1", "Sales").with_version(version);
        assert_eq!(coordinates.kb_version.as_deref(), expected);
    }

    #[rstest]
    fn credentials_never_show_the_password_in_debug_output() {
        let credentials = Credentials::new("ci-bot", "s3cr3t");
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("ci-bot"));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[rstest]
    fn default_db_options_use_integrated_security_in_the_kb_folder() {
        let options = DbOptions::default();
        assert!(options.use_integrated_security());
        assert!(options.create_in_kb_folder);
        assert!(!options.include_all_versions);
    }

    #[rstest]
    fn it_should_keep_a_configured_database_name() {
        let options = DbOptions {
            name: Some("SalesDb".into()),
            ..DbOptions::default()
        };
        assert_eq!(options.with_resolved_name("Sales").name.as_deref(), Some("SalesDb"));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("  "))]
    fn it_should_generate_a_unique_database_name_when_none_is_configured(#[case] name: Option<&str>) {
        let options = DbOptions {
            name: name.map(String::from),
            ..DbOptions::default()
        };
        let first = options.with_resolved_name("Sales").name.unwrap();
        let second = options.with_resolved_name("Sales").name.unwrap();
        assert!(first.starts_with("GX_KB_Sales_"));
        assert_ne!(first, second);
    }

    #[rstest]
    fn a_checkout_never_fetches_all_versions() {
        let options = DbOptions {
            include_all_versions: true,
            ..DbOptions::default()
        };
        assert!(!options.with_resolved_name("Sales").include_all_versions);
    }

    #[rstest]
    fn it_should_deserialize_with_defaults() {
        let options: DbOptions = serde_json::from_str(r#"{"server_instance": "(local)"}"#).unwrap();
        assert_eq!(options.server_instance.as_deref(), Some("(local)"));
        assert!(options.create_in_kb_folder);
        assert!(options.name.is_none());
    }
}
