/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The analysis session state machine (session.rs)

pub mod data;
pub mod session;
