//! Client configuration.
//!
//! This module provides the [`ClientConfig`] type and its loaders. Settings
//! come from a JSON file or from environment variables.

mod settings;

pub use settings::{env, ClientConfig};
