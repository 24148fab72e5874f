use serde::Deserialize;

const CONFIG_FILE: &str = "playspark.toml";

/// Top-level server configuration, loaded from `playspark.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub web_root: String,
    pub limits: LimitsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            web_root: "web".to_string(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Storage and request-size limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Stored game ideas kept before the oldest are evicted.
    pub max_stored_games: usize,
    /// Games returned by `/api/games/recent` without a `limit`.
    pub recent_default: usize,
    /// Upper bound on `/api/games/recent?limit=`.
    pub recent_max: usize,
    pub max_transcript_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_stored_games: 500,
            recent_default: 5,
            recent_max: 10,
            max_transcript_chars: 2000,
        }
    }
}

impl ServerConfig {
    /// Problems that make the config unusable, one line each.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            problems.push(format!(
                "listen_addr {:?} is not a valid socket address",
                self.listen_addr
            ));
        }
        for (name, value) in [
            ("limits.max_stored_games", self.limits.max_stored_games),
            ("limits.recent_default", self.limits.recent_default),
            ("limits.recent_max", self.limits.recent_max),
            ("limits.max_transcript_chars", self.limits.max_transcript_chars),
        ] {
            if value == 0 {
                problems.push(format!("{name} must be > 0"));
            }
        }
        if self.limits.recent_default > self.limits.recent_max {
            problems.push("limits.recent_default must not exceed limits.recent_max".to_string());
        }
        problems
    }

    /// Validate configuration, exiting on anything unusable.
    pub fn validate(&self) {
        let problems = self.problems();
        for problem in &problems {
            tracing::error!("{problem}");
        }
        if !problems.is_empty() {
            std::process::exit(1);
        }
    }

    /// Parse a config file body.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from `playspark.toml` if it exists, then apply env var overrides.
    pub fn load() -> Self {
        let mut config = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {CONFIG_FILE}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {CONFIG_FILE}: {e}, using defaults");
                    ServerConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No {CONFIG_FILE} found, using defaults");
                ServerConfig::default()
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply `PLAYSPARK_*` overrides read through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = var("PLAYSPARK_LISTEN_ADDR")
            && !addr.is_empty()
        {
            self.listen_addr = addr;
        }
        if let Some(root) = var("PLAYSPARK_WEB_ROOT")
            && !root.is_empty()
        {
            self.web_root = root;
        }
        if let Some(val) = var("PLAYSPARK_MAX_STORED_GAMES")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.max_stored_games = n;
        }
        if let Some(val) = var("PLAYSPARK_RECENT_LIMIT")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.recent_default = n;
        }
    }
}
