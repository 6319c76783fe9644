//! Civic Login TUI Library
//!
//! Terminal rendering collaborator for the `civic-login` flow: reads
//! [`civic_login::FlowView`] snapshots and the toast list, and turns key
//! presses into flow operations.

pub mod app;
pub mod logging;
pub mod ui;

pub use app::App;
