pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod keyguard;
pub mod prompt;
pub mod protect;
pub mod store;
pub mod vault;
