//! Default values.
//!
//! These reproduce the behavior of a run with no config file at all.

use crate::schema::*;
use badges_common::{DEFAULT_GITHUB_ENDPOINT, DEFAULT_VIEWS_BASE_URL, DEFAULT_WAKATIME_BASE_URL};

/// Default WakaTime cache location
pub const DEFAULT_WAKA_CACHE_PATH: &str = ".github/waka-template/waka_data.json";

/// GitHub-style green heatmap scale
pub const DEFAULT_HEATMAP_COLORS: [&str; 5] = ["#ebedf0", "#c6e48b", "#7bc96f", "#239a3b", "#196127"];

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubSettings::default(),
            wakatime: WakaTimeSettings::default(),
            views: ViewsSettings::default(),
            output: OutputSettings::default(),
            theme: ThemeSettings::default(),
            retry: RetrySettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GITHUB_ENDPOINT.to_string(),
            token: None,
            user: None,
            repository: None,
            timeout_secs: 30,
        }
    }
}

impl Default for WakaTimeSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WAKATIME_BASE_URL.to_string(),
            api_key: None,
            username: None,
            timeout_secs: 12,
            cache_path: DEFAULT_WAKA_CACHE_PATH.to_string(),
        }
    }
}

impl Default for ViewsSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_VIEWS_BASE_URL.to_string(),
            label: "Profile views".to_string(),
            color: "0e75b6".to_string(),
            style: "flat".to_string(),
            timeout_secs: 20,
            snapshot_path: ".github/profile-views.json".to_string(),
            history_path: ".github/profile-views-history.json".to_string(),
            svg_path: ".github/profile-views.svg".to_string(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            streak_svg: "streak.svg".to_string(),
            streak_state: "streak_state.json".to_string(),
            monthly_svg: "./assets/contrib-monthly.svg".to_string(),
            line_svg: "./Assets/contrib-daily-line.svg".to_string(),
            waka_svg: "wakatime.svg".to_string(),
            waka_png: "wakatime.png".to_string(),
        }
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            heatmap_colors: DEFAULT_HEATMAP_COLORS.iter().map(|c| c.to_string()).collect(),
            line_color: "#1e40af".to_string(),
            card_background: "#0f2527".to_string(),
            accent_color: "#f6a936".to_string(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            github_attempts: 4,
            github_base_delay_ms: 700,
            wakatime_attempts: 4,
            wakatime_base_delay_ms: 1000,
            wakatime_jitter_ms: 400,
            views_attempts: 3,
            views_delay_ms: 3000,
        }
    }
}
