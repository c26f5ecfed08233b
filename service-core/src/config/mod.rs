//! Layered configuration loading.
//!
//! Settings are read from an optional configuration file (any format the
//! `config` crate recognises) and then from the process environment, with
//! environment values taking precedence. Environment keys are lowercased,
//! so `CASHFREE_APP_ID` deserializes into a `cashfree_app_id` field.

use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::de::DeserializeOwned;

/// Load settings of type `T` from `<file_stem>.{yaml,toml,json,...}` and the environment.
///
/// A `.env` file in the working directory is applied first when present.
pub fn load<T: DeserializeOwned>(file_stem: &str) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    load_from(file_stem, Environment::default())
}

/// Same as [`load`], with an explicit environment source.
pub fn load_from<T: DeserializeOwned>(
    file_stem: &str,
    environment: Environment,
) -> Result<T, AppError> {
    let config = Cfg::builder()
        .add_source(File::with_name(file_stem).required(false))
        .add_source(environment)
        .build()?;

    Ok(config.try_deserialize()?)
}
