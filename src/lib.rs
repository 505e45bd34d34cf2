//! Ekopay — navigation core for the Ekopay app shell.

pub mod config;
pub mod error;
pub mod navigation;
pub mod navigator;
pub mod onboarding;
pub mod shell;
pub mod store;
