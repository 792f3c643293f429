//! Env-driven configuration for the service, CLI, and library.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for everything except the API key,
//! whose absence is surfaced by the Gemini client at call time.
use std::env;
use dotenv;

pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub image_model: String,
    pub text_model: String,
    pub api_host: String,
    pub api_port: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> Result<Self, env::VarError> {
        Ok(Config {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".to_string()),
            image_model: env::var("GEMINI_IMAGE_MODEL").unwrap_or_else(|_| "gemini-2.5-flash-image".to_string()),
            text_model: env::var("GEMINI_TEXT_MODEL").unwrap_or_else(|_| "gemini-3-flash-preview".to_string()),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "8190".to_string()),
        })
    }

    pub fn print_env_vars() {
        // Never echo the credential itself
        println!(
            "GEMINI_API_KEY: {}",
            if env::var("GEMINI_API_KEY").map(|k| !k.is_empty()).unwrap_or(false) { "<set>" } else { "<unset>" }
        );
        println!("GEMINI_API_URL: {}", env::var("GEMINI_API_URL").unwrap_or_else(|_| "<unset>".to_string()));
        println!("GEMINI_IMAGE_MODEL: {}", env::var("GEMINI_IMAGE_MODEL").unwrap_or_else(|_| "<unset>".to_string()));
        println!("GEMINI_TEXT_MODEL: {}", env::var("GEMINI_TEXT_MODEL").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_HOST: {}", env::var("API_HOST").unwrap_or_else(|_| "<unset>".to_string()));
        println!("API_PORT: {}", env::var("API_PORT").unwrap_or_else(|_| "<unset>".to_string()));
    }
}
