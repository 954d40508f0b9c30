/// View components
///
/// Pure view builders; all state lives in main.rs and the session.
/// - Title bar and language toggle (header.rs)
/// - The three-state capture slot (capture_slot.rs)
/// - The analysis report panel with the score gauge (report.rs)

pub mod capture_slot;
pub mod header;
pub mod report;
