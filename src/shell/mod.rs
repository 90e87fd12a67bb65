// Composition root for the kb_revisions bounded context.
//
// Responsibilities:
// - Read config from the environment or a job definition.
// - Instantiate the file-backed adapters and the system clock.
// - Wire them, plus the host's remote source and synchronizer, into the use cases.
// - Install the tracing subscriber.

pub mod config;
pub mod telemetry;
pub mod wiring;
