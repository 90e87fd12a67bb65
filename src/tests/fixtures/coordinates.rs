use crate::modules::kb_revisions::core::coordinates::{Credentials, DbOptions, KbCoordinates};

pub fn coordinates() -> KbCoordinates {
    KbCoordinates::new("https://kb-server.example.test/v18", "Billing")
        .with_version("Trunk")
        .with_credentials(Credentials::new("ci-bot", "ci-password"))
}

pub fn db_options() -> DbOptions {
    DbOptions {
        server_instance: Some("(localdb)\\ci".to_string()),
        ..DbOptions::default()
    }
}
