pub mod config;
pub mod edit;
pub mod issues;
pub mod session;
