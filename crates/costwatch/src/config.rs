use std::{env, str::FromStr, time::Duration};

use costwatch_core::costs::YearBounds;

/// When a created cost invalidates its cached report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidationMode {
    /// Respond first, invalidate on a background task.
    ///
    /// A read racing the task can still be served the stale report. Pending
    /// tasks are awaited on graceful shutdown.
    #[default]
    Deferred,
    /// Invalidate before responding. Failures are returned to the caller.
    Inline,
}

impl FromStr for InvalidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deferred" => Ok(Self::Deferred),
            "inline" => Ok(Self::Inline),
            other => Err(format!("unknown invalidation mode: {other}")),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "costwatch.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Maximum number of reports kept by the in-memory backend (default: 10,000)
    #[allow(dead_code)]
    pub report_cache_max_entries: usize,
    /// Oldest year accepted when creating a cost (default: 1970)
    pub cost_min_year: i32,
    /// Oldest year accepted when reading a report (default: 1970)
    pub report_min_year: i32,
    /// Latest year accepted on both paths (default: 2100)
    pub max_year: i32,
    /// Report invalidation ordering (default: deferred)
    pub invalidation_mode: InvalidationMode,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "costwatch.db")
    /// - `REPORT_CACHE_MAX_ENTRIES` - In-memory report capacity (default: 10,000)
    /// - `COST_MIN_YEAR` - Minimum year for new costs (default: 1970)
    /// - `REPORT_MIN_YEAR` - Minimum year for report reads (default: 1970)
    /// - `MAX_YEAR` - Maximum year for both (default: 2100)
    /// - `INVALIDATION_MODE` - `deferred` or `inline` (default: deferred)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        let config = Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "costwatch.db".to_string()),
            report_cache_max_entries: parse_var("REPORT_CACHE_MAX_ENTRIES", 10_000),
            cost_min_year: parse_var("COST_MIN_YEAR", 1970),
            report_min_year: parse_var("REPORT_MIN_YEAR", 1970),
            max_year: parse_var("MAX_YEAR", 2100),
            invalidation_mode: env::var("INVALIDATION_MODE")
                .ok()
                .and_then(|v| match v.parse() {
                    Ok(mode) => Some(mode),
                    Err(err) => {
                        tracing::warn!(error = %err, "Ignoring INVALIDATION_MODE");
                        None
                    }
                })
                .unwrap_or_default(),
            request_timeout_seconds: parse_var("REQUEST_TIMEOUT_SECONDS", 10),
        };

        for (name, min) in config.inverted_year_bounds() {
            tracing::warn!(
                min_var = name,
                min,
                max_year = config.max_year,
                "Minimum year is above MAX_YEAR, every request on this path will be rejected"
            );
        }

        config
    }

    /// Minimum-year settings that exceed `max_year`, by variable name.
    pub fn inverted_year_bounds(&self) -> Vec<(&'static str, i32)> {
        [
            ("COST_MIN_YEAR", self.cost_min_year),
            ("REPORT_MIN_YEAR", self.report_min_year),
        ]
        .into_iter()
        .filter(|(_, min)| *min > self.max_year)
        .collect()
    }

    /// Year bounds applied when creating costs.
    pub fn cost_year_bounds(&self) -> YearBounds {
        YearBounds::new(self.cost_min_year, self.max_year)
    }

    /// Year bounds applied when reading reports.
    pub fn report_year_bounds(&self) -> YearBounds {
        YearBounds::new(self.report_min_year, self.max_year)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    parse_value(name, env::var(name).ok(), default)
}

/// Parses a raw variable value, warning and falling back to `default` when
/// it does not parse.
fn parse_value<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring unparseable value, using default");
            default
        }
    }
}
