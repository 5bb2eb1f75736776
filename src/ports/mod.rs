//! Port traits between the core and its collaborators.

pub mod config_port;
pub mod data_port;
pub mod report_port;
