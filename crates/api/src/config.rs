use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Origin used to build absolute checkout return URLs.
    pub public_base_url: String,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Payment provider configuration.
    pub payments: PaymentConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `PUBLIC_BASE_URL`      | `http://localhost:3000`    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            public_base_url,
            jwt: JwtConfig::from_env(),
            payments: PaymentConfig::from_env(),
        }
    }
}

/// Payment provider settings.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// API secret key. Without it checkout and product registration fail.
    pub secret_key: Option<String>,
    /// Webhook signing secret. `None` puts the webhook in development mode
    /// (payloads accepted without signature verification).
    pub webhook_secret: Option<String>,
    /// Provider API origin.
    pub api_base: String,
    /// ISO currency code for prices and checkout sessions.
    pub currency: String,
    /// Accepted signature timestamp skew in seconds.
    pub webhook_tolerance_secs: i64,
}

impl PaymentConfig {
    /// Load payment configuration from environment variables.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `STRIPE_SECRET_KEY`     | unset                    |
    /// | `STRIPE_WEBHOOK_SECRET` | unset (development mode) |
    /// | `STRIPE_API_BASE`       | `https://api.stripe.com` |
    /// | `PAYMENT_CURRENCY`      | `aud`                    |
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            secret_key: non_empty("STRIPE_SECRET_KEY"),
            webhook_secret: non_empty("STRIPE_WEBHOOK_SECRET"),
            api_base: non_empty("STRIPE_API_BASE")
                .unwrap_or_else(|| emporium_payments::stripe::DEFAULT_API_BASE.to_string()),
            currency: non_empty("PAYMENT_CURRENCY")
                .map(|c| c.to_lowercase())
                .unwrap_or_else(|| "aud".to_string()),
            webhook_tolerance_secs: emporium_payments::signature::DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Whether webhooks are accepted without signature verification.
    pub fn is_development_mode(&self) -> bool {
        self.webhook_secret.is_none()
    }
}
