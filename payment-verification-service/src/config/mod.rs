use secrecy::Secret;
use serde::Deserialize;
use service_core::error::AppError;

pub const SERVICE_NAME: &str = "payment-verification-service";

/// API version pinned for every Cashfree request.
pub const CASHFREE_API_VERSION: &str = "2023-08-01";

const CASHFREE_PRODUCTION_URL: &str = "https://api.cashfree.com/pg";
const CASHFREE_SANDBOX_URL: &str = "https://sandbox.cashfree.com/pg";

const FALLBACK_PRODUCTION_ORIGIN: &str = "https://astrology-website.vercel.app";
const DEVELOPMENT_ORIGIN: &str = "http://localhost:3001";

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub cashfree: CashfreeConfig,
    pub runtime: RuntimeEnvironment,
    /// Deployment hostname without scheme, e.g. `my-app.vercel.app`.
    pub deployment_host: Option<String>,
    pub observability: ObservabilityConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct CashfreeConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub environment: GatewayEnvironment,
    pub api_base_url: String,
    pub api_version: String,
}

#[derive(Clone, Debug)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatewayEnvironment {
    Production,
    Sandbox,
}

impl GatewayEnvironment {
    /// `live` selects production; every other value, including none, is sandbox.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("live") => Self::Production,
            _ => Self::Sandbox,
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => CASHFREE_PRODUCTION_URL,
            Self::Sandbox => CASHFREE_SANDBOX_URL,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    Production,
    Development,
}

impl RuntimeEnvironment {
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("production") => Self::Production,
            _ => Self::Development,
        }
    }
}

/// Flat view of the environment as the `config` crate sees it.
#[derive(Deserialize, Debug)]
pub struct EnvSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub cashfree_app_id: String,
    #[serde(default)]
    pub cashfree_secret_key: String,
    pub cashfree_environment: Option<String>,
    pub cashfree_base_url: Option<String>,
    pub app_environment: Option<String>,
    pub vercel_url: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for EnvSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cashfree_app_id: String::new(),
            cashfree_secret_key: String::new(),
            cashfree_environment: None,
            cashfree_base_url: None,
            app_environment: None,
            vercel_url: None,
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info,payment_verification_service=debug".to_string()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let settings: EnvSettings = service_core::config::load("configuration")?;
        Ok(Self::from_settings(settings))
    }

    pub fn from_settings(settings: EnvSettings) -> Self {
        let environment = GatewayEnvironment::from_flag(settings.cashfree_environment.as_deref());
        let api_base_url = non_empty(settings.cashfree_base_url)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| environment.base_url().to_string());

        Self {
            server: ServerConfig {
                host: settings.host,
                port: settings.port,
            },
            cashfree: CashfreeConfig {
                client_id: settings.cashfree_app_id,
                client_secret: Secret::new(settings.cashfree_secret_key),
                environment,
                api_base_url,
                api_version: CASHFREE_API_VERSION.to_string(),
            },
            runtime: RuntimeEnvironment::from_flag(settings.app_environment.as_deref()),
            deployment_host: non_empty(settings.vercel_url),
            observability: ObservabilityConfig {
                log_level: settings.log_level,
                otlp_endpoint: non_empty(settings.otlp_endpoint),
            },
        }
    }

    /// The single browser origin allowed to call this service.
    pub fn cors_origin(&self) -> String {
        match self.runtime {
            RuntimeEnvironment::Production => match &self.deployment_host {
                Some(host) => format!("https://{}", host),
                None => FALLBACK_PRODUCTION_ORIGIN.to_string(),
            },
            RuntimeEnvironment::Development => DEVELOPMENT_ORIGIN.to_string(),
        }
    }
}
