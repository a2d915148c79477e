pub mod capability;
pub mod config;
pub mod state;
