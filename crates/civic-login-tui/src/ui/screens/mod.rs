//! Screen modules for each step of the flow

pub mod credentials;
pub mod success;
pub mod token;
