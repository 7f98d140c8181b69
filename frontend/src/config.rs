/// Deployment settings, fixed at build time.
///
/// Running against a local relay or a hosted one, and where the logo is
/// served from, are configuration rather than separate components.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    pub asset_base: String,
    pub send_history: bool,
}

const DEFAULT_API_BASE: &str = "http://localhost:3000";
const DEFAULT_ASSET_BASE: &str = "./assets";
const LOGO_FILE: &str = "EmraldAI.png";

impl ClientConfig {
    pub fn from_build_env() -> Self {
        Self::resolve(
            option_env!("EMERALD_API_BASE"),
            option_env!("EMERALD_ASSET_BASE"),
            option_env!("EMERALD_SEND_HISTORY"),
        )
    }

    fn resolve(api_base: Option<&str>, asset_base: Option<&str>, send_history: Option<&str>) -> Self {
        Self {
            api_base: api_base.unwrap_or(DEFAULT_API_BASE).trim_end_matches('/').to_string(),
            asset_base: asset_base.unwrap_or(DEFAULT_ASSET_BASE).trim_end_matches('/').to_string(),
            send_history: matches!(send_history, Some("1" | "true")),
        }
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.api_base)
    }

    pub fn logo_url(&self) -> String {
        format!("{}/{LOGO_FILE}", self.asset_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_local_relay() {
        let config = ClientConfig::resolve(None, None, None);
        assert_eq!(config.chat_url(), "http://localhost:3000/api/chat");
        assert_eq!(config.logo_url(), "./assets/EmraldAI.png");
        assert!(!config.send_history);
    }

    #[test]
    fn hosted_deployment_uses_same_origin() {
        let config = ClientConfig::resolve(Some(""), Some("/static/"), Some("true"));
        assert_eq!(config.chat_url(), "/api/chat");
        assert_eq!(config.logo_url(), "/static/EmraldAI.png");
        assert!(config.send_history);
    }
}
