use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub mail_to: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "8000"),
            resend_api_key: read_credential("RESEND_API_KEY"),
            mail_from: try_load("MAIL_FROM", "Cotizaciones - Carmay <onboarding@resend.dev>"),
            mail_to: try_load("MAIL_TO", "ventas@plasticoscarmay.com"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

/// Reads a credential from the environment, falling back to the Docker
/// secrets path. A missing credential is reported per request as a
/// configuration error, never as a startup panic.
fn read_credential(name: &str) -> Option<String> {
    if let Ok(value) = env::var(name) {
        let value = value.trim().to_string();
        if !value.is_empty() {
            return Some(value);
        }
    }

    let path = format!("/run/secrets/{name}");

    match read_to_string(&path) {
        Ok(value) => {
            let value = value.trim().to_string();
            if value.is_empty() { None } else { Some(value) }
        }
        Err(e) => {
            warn!("Failed to read {name} from environment or {path}: {e}");
            None
        }
    }
}
