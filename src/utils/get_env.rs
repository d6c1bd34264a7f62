use anyhow::Error;
use dotenv::dotenv;
use std::env;

pub fn get_env_var(key: &str) -> Result<String, Error> {
    dotenv().ok();
    Ok(env::var(key)?)
}

/// Like [`get_env_var`] but unset or blank values fall back to `default`.
pub fn env_var_or(key: &str, default: &str) -> String {
    match get_env_var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
        _ => default.to_string(),
    }
}

pub fn env_var_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>, Error>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get_env_var(key) {
        Ok(raw) if !raw.trim().is_empty() => Ok(Some(raw.trim().parse::<T>()?)),
        _ => Ok(None),
    }
}
