use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Browser and timing configuration for a harvest run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Page navigation timeout in seconds (default: 60)
    pub navigation_timeout_secs: u64,

    /// Wait for the results list to render, in seconds (default: 30)
    pub results_timeout_secs: u64,

    /// Wait for a listing's detail view to render, in seconds (default: 60)
    pub detail_timeout_secs: u64,

    /// Upper bound on a single field read in milliseconds (default: 5000)
    pub field_timeout_ms: u64,

    /// Interval between element presence checks in milliseconds (default: 100)
    pub poll_interval_ms: u64,

    /// Extra Chrome command line switches
    pub args: Vec<String>,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            navigation_timeout_secs: 60,
            results_timeout_secs: 30,
            detail_timeout_secs: 60,
            field_timeout_ms: 5000,
            poll_interval_ms: 100,
            args: vec![
                "--no-sandbox".to_string(),
                "--disable-gpu".to_string(),
                "--disable-dev-shm-usage".to_string(),
                "--disable-blink-features=AutomationControlled".to_string(),
            ],
            user_agent: Some(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

impl BrowserSettings {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn results_timeout(&self) -> Duration {
        Duration::from_secs(self.results_timeout_secs)
    }

    pub fn detail_timeout(&self) -> Duration {
        Duration::from_secs(self.detail_timeout_secs)
    }

    pub fn field_timeout(&self) -> Duration {
        Duration::from_millis(self.field_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_values() {
        let settings = BrowserSettings::default();
        assert!(settings.headless);
        assert_eq!(settings.navigation_timeout_secs, 60);
        assert_eq!(settings.results_timeout_secs, 30);
        assert_eq!(settings.detail_timeout_secs, 60);
        assert_eq!(settings.field_timeout_ms, 5000);
        assert!(settings.user_agent.is_some());
        assert!(settings.args.iter().any(|a| a == "--no-sandbox"));
    }

    #[test]
    fn test_durations() {
        let settings = BrowserSettings::default();
        assert_eq!(settings.navigation_timeout(), Duration::from_secs(60));
        assert_eq!(settings.results_timeout(), Duration::from_secs(30));
        assert_eq!(settings.field_timeout(), Duration::from_millis(5000));
    }

    #[test]
    fn test_poll_interval_never_zero() {
        let settings = BrowserSettings {
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.poll_interval(), Duration::from_millis(1));
    }
}
