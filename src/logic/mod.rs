//! Logic modules — translates user choices into concrete actions.
//!
//! The logic layer resolves abstract selections (e.g., "Zustand", "Jest") into
//! the ordered directives the execution engine runs.
//!
//! # Modules
//!
//! - `resolver` — Selection to directive resolution

pub mod resolver;
