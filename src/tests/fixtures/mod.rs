// Shared test fixtures, compiled only under cfg(test).
// All timestamps are offsets in seconds from a fixed instant so tests read as small numbers.

pub mod builds;
pub mod changes;
pub mod coordinates;
pub mod watermarks;
