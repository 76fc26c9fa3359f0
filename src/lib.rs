//! Common functionality for CLIMADA entities.
//!
//! An [`Entity`](entity::Entity) bundles the exposures, impact functions, discount rates and
//! measures needed for a risk assessment.
#![warn(missing_docs)]
use std::path::PathBuf;

pub mod cli;
pub mod disc_rates;
pub mod entity;
pub mod exposures;
pub mod id;
pub mod impact_funcs;
pub mod input;
pub mod log;
pub mod measures;
pub mod settings;
pub mod tag;
pub mod units;

#[cfg(test)]
mod fixture;

/// Get the path to the folder containing the program's configuration files
pub fn get_climada_config_dir() -> PathBuf {
    let Some(mut config_dir) = dirs::config_dir() else {
        // No sensible config dir on this platform, so fall back to the working directory
        return PathBuf::default();
    };
    config_dir.push("climada-entity");

    config_dir
}
