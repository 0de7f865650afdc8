/// Centralized environment configuration.
/// All env vars and defaults are defined here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL. Required.
    pub database_url: String,

    /// Address the HTTP server binds to.
    /// Default: 0.0.0.0:3000
    pub bind_addr: String,

    /// Name of the cookie carrying the session id set by the portal's login flow.
    /// Default: session_id
    pub session_cookie: String,

    /// Maximum pooled database connections.
    /// Default: 5
    pub db_max_connections: u32,
}

impl Config {
    /// Build config from environment variables.
    /// Returns an error if required vars are missing.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env")?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let session_cookie = std::env::var("SESSION_COOKIE")
            .unwrap_or_else(|_| "session_id".to_string());

        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()
            .map_err(|_| "DB_MAX_CONNECTIONS must be a positive integer")?;
        if db_max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be a positive integer".to_string());
        }

        Ok(Self {
            database_url,
            bind_addr,
            session_cookie,
            db_max_connections,
        })
    }

    /// Config for tests. Uses in-memory database URL.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            session_cookie: "session_id".to_string(),
            db_max_connections: 1,
        }
    }
}
