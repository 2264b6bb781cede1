//! Env-driven configuration for the admin client.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binary. Everything except the image hosting key has a default; the
//! key is only demanded by callers that talk to the image host.
use std::env;

use crate::error::{AppError, AppResult};

pub const DEFAULT_PUBLIC_API_URL: &str = "https://jalpaan-backend-server.onrender.com/";
pub const DEFAULT_IMAGE_HOSTING_URL: &str = "https://api.imgbb.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub public_api_url: String,
    pub secure_api_url: String,
    pub image_hosting_url: String,
    pub image_hosting_key: Option<String>,
    pub access_token: Option<String>,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let public_api_url = get("PUBLIC_API_URL").unwrap_or_else(|| DEFAULT_PUBLIC_API_URL.to_string());
        let secure_api_url = get("SECURE_API_URL").unwrap_or_else(|| public_api_url.clone());

        Ok(Config {
            image_hosting_url: get("IMAGE_HOSTING_URL").unwrap_or_else(|| DEFAULT_IMAGE_HOSTING_URL.to_string()),
            image_hosting_key: get("IMAGE_HOSTING_KEY"),
            access_token: get("ACCESS_TOKEN"),
            public_api_url,
            secure_api_url,
        })
    }

    /// The image hosting key, or a config error when it was never set.
    pub fn require_image_hosting_key(&self) -> AppResult<&str> {
        self.image_hosting_key
            .as_deref()
            .ok_or_else(|| AppError::Config("IMAGE_HOSTING_KEY must be set".to_string()))
    }

    pub fn print_env_vars() {
        eprintln!("PUBLIC_API_URL: {}", env::var("PUBLIC_API_URL").unwrap_or_else(|_| "<unset>".to_string()));
        eprintln!("SECURE_API_URL: {}", env::var("SECURE_API_URL").unwrap_or_else(|_| "<unset>".to_string()));
        eprintln!("IMAGE_HOSTING_URL: {}", env::var("IMAGE_HOSTING_URL").unwrap_or_else(|_| "<unset>".to_string()));
        eprintln!("IMAGE_HOSTING_KEY: {}", mask(env::var("IMAGE_HOSTING_KEY").ok()));
        eprintln!("ACCESS_TOKEN: {}", mask(env::var("ACCESS_TOKEN").ok()));
    }
}

fn mask(value: Option<String>) -> &'static str {
    match value {
        Some(v) if !v.is_empty() => "<set>",
        _ => "<unset>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_hosting_key_is_a_config_error_only_when_required() {
        let conf = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(conf.public_api_url, DEFAULT_PUBLIC_API_URL);
        assert!(matches!(conf.require_image_hosting_key(), Err(AppError::Config(_))));

        let conf = Config::from_lookup(lookup_from(&[("IMAGE_HOSTING_KEY", "  ")])).unwrap();
        assert!(matches!(conf.require_image_hosting_key(), Err(AppError::Config(_))));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let conf = Config::from_lookup(lookup_from(&[("IMAGE_HOSTING_KEY", "abc")])).unwrap();
        assert_eq!(conf.require_image_hosting_key().unwrap(), "abc");
        assert_eq!(conf.public_api_url, DEFAULT_PUBLIC_API_URL);
        assert_eq!(conf.secure_api_url, DEFAULT_PUBLIC_API_URL);
        assert_eq!(conf.image_hosting_url, DEFAULT_IMAGE_HOSTING_URL);
        assert!(conf.access_token.is_none());
    }

    #[test]
    fn secure_url_falls_back_to_public_override() {
        let conf = Config::from_lookup(lookup_from(&[
            ("IMAGE_HOSTING_KEY", "abc"),
            ("PUBLIC_API_URL", "http://localhost:5000"),
            ("ACCESS_TOKEN", "tok"),
        ]))
        .unwrap();
        assert_eq!(conf.secure_api_url, "http://localhost:5000");
        assert_eq!(conf.access_token.as_deref(), Some("tok"));
    }
}
