//! App Configuration
//!
//! Settings baked in at build time. The auth provider values come from
//! `CHIP_RANKER_SUPABASE_URL` / `CHIP_RANKER_SUPABASE_ANON_KEY`; when either is
//! missing, auth calls fail with a "not configured" error.

use std::str::FromStr;

use tracing::Level;

/// Filename of the downloaded ranking
pub const EXPORT_FILENAME: &str = "chip-flavor-ranking.json";

/// Filename of the downloaded diagnostic log
pub const LOG_FILENAME: &str = "chip-ranker-log.txt";

/// Resolved application settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub log_level: Level,
    pub log_capacity: usize,
    /// Echo log lines to the browser console as well as the buffer
    pub log_echo: bool,
    pub export_filename: &'static str,
    pub toast_duration_ms: u32,
    /// Start with the demonstration flavors instead of an empty list
    pub seed_demo_flavors: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            log_level: Level::INFO,
            log_capacity: 500,
            log_echo: true,
            export_filename: EXPORT_FILENAME,
            toast_duration_ms: 4000,
            seed_demo_flavors: true,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        Self::from_values(
            option_env!("CHIP_RANKER_SUPABASE_URL"),
            option_env!("CHIP_RANKER_SUPABASE_ANON_KEY"),
            option_env!("CHIP_RANKER_LOG_LEVEL"),
            option_env!("CHIP_RANKER_LOG_ECHO"),
        )
    }

    fn from_values(
        url: Option<&str>,
        anon_key: Option<&str>,
        log_level: Option<&str>,
        log_echo: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            supabase_url: non_blank(url).map(|u| u.trim_end_matches('/').to_string()),
            supabase_anon_key: non_blank(anon_key).map(str::to_string),
            log_level: log_level
                .and_then(|raw| Level::from_str(raw.trim()).ok())
                .unwrap_or(defaults.log_level),
            log_echo: match non_blank(log_echo).map(str::to_ascii_lowercase).as_deref() {
                Some("0" | "false" | "off" | "no") => false,
                _ => defaults.log_echo,
            },
            ..defaults
        }
    }

    /// Both auth settings present
    pub fn auth_configured(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_values(None, None, None, None);
        assert!(!config.auth_configured());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.export_filename, "chip-flavor-ranking.json");
        assert!(config.log_echo);
    }

    #[test]
    fn test_values_are_normalized() {
        let config = AppConfig::from_values(
            Some("https://demo.supabase.co/"),
            Some("anon"),
            Some("debug"),
            Some("off"),
        );
        assert!(config.auth_configured());
        assert_eq!(config.supabase_url.as_deref(), Some("https://demo.supabase.co"));
        assert_eq!(config.log_level, Level::DEBUG);
        assert!(!config.log_echo);
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let config = AppConfig::from_values(Some("  "), Some("key"), Some("loud"), Some("maybe"));
        assert!(!config.auth_configured());
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.log_echo);
    }
}
