/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Number of sample forecasts generated at startup.
    pub seed_count: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
            seed_count: std::env::var("SEED_COUNT")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .expect("SEED_COUNT must be a non-negative integer"),
        }
    }
}
