//! Configuration module for debrief
//!
//! Handles loading settings from a TOML file and the environment.

mod settings;

pub use settings::{Settings, API_KEY_ENV_VARS, PORT_ENV_VAR};
