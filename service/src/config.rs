use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;

const DEFAULT_DATABASE_URL: &str = "sqlite://delivery_network.db?mode=rwc";

// Development-only fallback. Deployments must set TOKEN_SIGNING_KEY; rotating
// it invalidates every outstanding session token.
const DEFAULT_TOKEN_SIGNING_KEY: &str = "COSMIC_KEY";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// A list of full CORS origin URLs that allowed to receive server responses.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Sets the database URL to connect to
    #[arg(short, long, env, default_value = DEFAULT_DATABASE_URL)]
    database_url: Option<String>,

    /// Maximum number of database connections in the pool
    #[arg(long, env, default_value_t = 10)]
    pub db_max_connections: u32,

    /// Timeout in seconds for establishing a new database connection
    #[arg(long, env, default_value_t = 8)]
    pub db_connect_timeout_secs: u64,

    /// Timeout in seconds for acquiring a connection from the pool
    #[arg(long, env, default_value_t = 8)]
    pub db_acquire_timeout_secs: u64,

    /// Symmetric key used to sign and verify session access tokens. Process-wide,
    /// loaded once at startup.
    #[arg(long, env = "TOKEN_SIGNING_KEY", default_value = DEFAULT_TOKEN_SIGNING_KEY)]
    token_signing_key: Option<String>,

    /// The host interface to listen for incoming connections on
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections on
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level filter threshold for the application
    #[arg(short, long, env, default_value = "info")]
    pub log_level_filter: LevelFilter,
}

impl Config {
    pub fn new() -> Self {
        // Load environment variables from a .env file if one exists before
        // clap resolves env-backed arguments.
        dotenv().ok();
        Config::parse()
    }

    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    pub fn token_signing_key(&self) -> &str {
        self.token_signing_key
            .as_deref()
            .unwrap_or(DEFAULT_TOKEN_SIGNING_KEY)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["delivery_network_api"])
    }
}
