//! # Badges Graphs
//!
//! Turns contribution calendars and WakaTime statistics into profile badge
//! images.
//!
//! - [`streak`] holds the persisted streak state and the continuation check.
//! - [`calendar`] densifies GitHub calendars for the chart renderers.
//! - [`waka`] normalizes WakaTime stats and resolves the live/cache/placeholder
//!   fallback chain.
//! - The renderers ([`StreakCard`], [`MonthlyHeatmap`], [`DailyLineChart`],
//!   [`WakaStatsCard`], [`WakaHoursCard`], [`WakaPngCard`]) implement
//!   [`BadgeRenderer`].
//! - [`sanitize`] scrubs SVG files before they are committed and
//!   [`history`] keeps the profile-views log.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod calendar;
pub mod heatmap;
pub mod history;
pub mod line_chart;
pub mod renderer;
pub mod sanitize;
pub mod streak;
pub mod streak_card;
pub mod svg;
pub mod waka;
pub mod waka_card;
pub mod waka_png;

pub use calendar::{fill_range, fill_year, max_count, YearContributions};
pub use heatmap::{HeatmapStyle, MonthlyHeatmap};
pub use history::{append_history, load_history, ViewsEntry, ViewsSnapshot, MAX_HISTORY_ENTRIES};
pub use line_chart::{DailyLineChart, LineChartStyle};
pub use renderer::{parse_color, BadgeRenderer};
pub use sanitize::{sanitize_file, sanitize_svg};
pub use streak::{canonical_streak, continue_streak, StreakState};
pub use streak_card::{CardStyle, StreakCard};
pub use svg::SvgDocument;
pub use waka::{
    language_color, normalize, profile_url, resolve_stats, LanguageShare, ResolvedStats, StatsSource,
    WakaSummary,
};
pub use waka_card::{WakaHoursCard, WakaStatsCard};
pub use waka_png::WakaPngCard;
