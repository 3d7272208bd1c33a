//! Environment a container is started with.

use crate::catalog::box64_preset;
use crate::config::{ContainerConfig, EnvVars};

/// Box64 preset variables first, then the record's own variables. A user
/// variable with the same name as a preset variable replaces it.
pub fn launch_env(config: &ContainerConfig) -> EnvVars {
    let mut env = EnvVars::new();
    match box64_preset(&config.box64_preset) {
        Some(preset) => {
            for (name, value) in preset.env_vars {
                env.put(name, value);
            }
        }
        None => tracing::warn!("Unknown Box64 preset '{}'", config.box64_preset),
    }
    env.extend_from(&config.env_vars);
    env
}
