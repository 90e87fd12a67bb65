pub mod shared {
    pub mod core {
        pub mod cancellation;
        pub mod clock;
    }
}

pub mod modules {
    pub mod kb_revisions {
        pub mod core {
            pub mod build;
            pub mod changelog;
            pub mod coordinates;
            pub mod ports;
            pub mod revision_record;
            pub mod watermark;
        }
        pub mod use_cases {
            pub mod resolve_baseline {
                pub mod resolver;
            }
            pub mod poll_remote_revision {
                pub mod decision;
                pub mod handler;
            }
            pub mod generate_changelog {
                pub mod generator;
            }
            pub mod synchronize_workspace {
                pub mod handler;
                pub mod sync_result;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod build_history_directory;
                pub mod build_history_in_memory;
                pub mod changelog_file;
                pub mod remote_revision_source_in_memory;
                pub mod watermark_store_file;
                pub mod watermark_store_in_memory;
                pub mod workspace_marker;
                pub mod workspace_synchronizer_in_memory;
            }
        }
    }
}

pub mod shell;
