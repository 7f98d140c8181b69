use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3000;

/// Runtime settings, read from the process environment at startup.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Upstream credential. `None` is a reported condition, not a startup error.
    pub gemini_api_key: Option<String>,
    pub port: u16,
    /// Built client assets to serve as the router fallback.
    pub static_dir: Option<PathBuf>,
    /// Forward the client's prior turns upstream instead of a single turn.
    pub forward_history: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            gemini_api_key: non_blank("GEMINI_API_KEY"),
            port: non_blank("PORT")
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(DEFAULT_PORT),
            static_dir: non_blank("STATIC_DIR").map(PathBuf::from),
            forward_history: non_blank("RELAY_FORWARD_HISTORY")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
