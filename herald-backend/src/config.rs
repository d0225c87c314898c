use std::env;
use std::time::Duration;

use crate::auth::AdminSet;
use crate::broadcast::RenderMode;
use crate::error::HeraldError;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const BOT_TOKEN: &str = "BOT_TOKEN";
    pub const ADMIN_IDS: &str = "ADMIN_IDS";
    pub const COOLDOWN: &str = "COOLDOWN";
    pub const FAILURE_DELAY: &str = "FAILURE_DELAY";
    pub const FOOTER: &str = "FOOTER";
    pub const DB_PATH: &str = "DB_PATH";
    pub const PARSE_MODE: &str = "PARSE_MODE";
}

/// Default values
pub mod defaults {
    pub const ADMIN_IDS: &[u64] = &[1672972729];
    /// Seconds to wait after each successful send (anti flood)
    pub const COOLDOWN_SECS: f64 = 1.2;
    /// Seconds to wait after a failed send
    pub const FAILURE_DELAY_SECS: f64 = 0.3;
    pub const FOOTER: &str = "⚠️ For educational purposes only. This is not financial advice.";
    pub const DB_PATH: &str = "./data/subs.db";
    pub const PARSE_MODE: &str = "markdown";
}

#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub admins: AdminSet,
    pub cooldown: Duration,
    pub failure_delay: Duration,
    /// Appended to every broadcast; empty disables the footer
    pub footer: String,
    pub db_path: String,
    pub render_mode: RenderMode,
}

impl Config {
    pub fn from_env() -> Result<Self, HeraldError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup.
    /// `from_env` passes `std::env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, HeraldError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup(env_vars::BOT_TOKEN)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                HeraldError::Configuration(format!(
                    "{} is missing. Set it as an environment variable.",
                    env_vars::BOT_TOKEN
                ))
            })?;

        let render_mode = match lookup(env_vars::PARSE_MODE) {
            Some(raw) => RenderMode::parse(&raw).unwrap_or_else(|| {
                log::warn!(
                    "Unknown {} '{}', falling back to {}",
                    env_vars::PARSE_MODE,
                    raw,
                    defaults::PARSE_MODE
                );
                RenderMode::Markdown
            }),
            None => RenderMode::Markdown,
        };

        Ok(Self {
            bot_token,
            admins: parse_admin_ids(lookup(env_vars::ADMIN_IDS).as_deref()),
            cooldown: parse_secs(lookup(env_vars::COOLDOWN).as_deref(), defaults::COOLDOWN_SECS),
            failure_delay: parse_secs(
                lookup(env_vars::FAILURE_DELAY).as_deref(),
                defaults::FAILURE_DELAY_SECS,
            ),
            footer: lookup(env_vars::FOOTER).unwrap_or_else(|| defaults::FOOTER.to_string()),
            db_path: lookup(env_vars::DB_PATH)
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| defaults::DB_PATH.to_string()),
            render_mode,
        })
    }
}

/// Parse a comma-separated list of numeric user IDs.
///
/// Non-numeric entries are dropped. When the variable is unset or nothing
/// valid remains, the default admin set is used.
pub fn parse_admin_ids(raw: Option<&str>) -> AdminSet {
    let parsed: Vec<u64> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|s| s.parse().ok())
        .collect();

    if parsed.is_empty() {
        if raw.is_some() {
            log::warn!(
                "{} contains no valid user IDs, using default admin set",
                env_vars::ADMIN_IDS
            );
        }
        return AdminSet::new(defaults::ADMIN_IDS.iter().copied());
    }

    AdminSet::new(parsed)
}

/// Seconds as a `Duration`; unparsable, negative or out-of-range values use `default`.
fn parse_secs(raw: Option<&str>, default: f64) -> Duration {
    let fallback = Duration::from_secs_f64(default);
    let Some(raw) = raw else {
        return fallback;
    };
    match raw
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    {
        Some(duration) => duration,
        None => {
            log::warn!("Invalid delay '{}', using {}s", raw, default);
            fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_configuration_error() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(HeraldError::Configuration(_))));

        let result = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "   ")]));
        assert!(matches!(result, Err(HeraldError::Configuration(_))));
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.cooldown, Duration::from_millis(1200));
        assert_eq!(config.failure_delay, Duration::from_millis(300));
        assert_eq!(config.footer, defaults::FOOTER);
        assert_eq!(config.db_path, defaults::DB_PATH);
        assert_eq!(config.render_mode, RenderMode::Markdown);
        assert!(config.admins.is_admin(1672972729));
        assert_eq!(config.admins.len(), 1);
    }

    #[test]
    fn test_empty_footer_is_kept_empty() {
        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "t"), ("FOOTER", "")])).unwrap();
        assert_eq!(config.footer, "");
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("ADMIN_IDS", "10, 20"),
            ("COOLDOWN", "0.5"),
            ("FAILURE_DELAY", "0"),
            ("DB_PATH", "/tmp/herald/subs.db"),
            ("PARSE_MODE", "html"),
        ]))
        .unwrap();
        assert!(config.admins.is_admin(10));
        assert!(config.admins.is_admin(20));
        assert!(!config.admins.is_admin(1672972729));
        assert_eq!(config.cooldown, Duration::from_millis(500));
        assert_eq!(config.failure_delay, Duration::ZERO);
        assert_eq!(config.db_path, "/tmp/herald/subs.db");
        assert_eq!(config.render_mode, RenderMode::Html);
    }

    #[test]
    fn test_invalid_cooldown_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "t"), ("COOLDOWN", "fast")])).unwrap();
        assert_eq!(config.cooldown, Duration::from_millis(1200));

        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "t"), ("COOLDOWN", "-1")])).unwrap();
        assert_eq!(config.cooldown, Duration::from_millis(1200));

        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "t"), ("COOLDOWN", "1e300")])).unwrap();
        assert_eq!(config.cooldown, Duration::from_millis(1200));
    }

    #[test]
    fn test_out_of_range_failure_delay_falls_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("BOT_TOKEN", "t"),
            ("FAILURE_DELAY", "1e300"),
        ]))
        .unwrap();
        assert_eq!(config.failure_delay, Duration::from_millis(300));

        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "t"), ("FAILURE_DELAY", "NaN")])).unwrap();
        assert_eq!(config.failure_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_unknown_parse_mode_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("BOT_TOKEN", "t"), ("PARSE_MODE", "bbcode")])).unwrap();
        assert_eq!(config.render_mode, RenderMode::Markdown);
    }

    #[test]
    fn test_parse_admin_ids_drops_malformed_entries() {
        let admins = parse_admin_ids(Some("1, two, 3,,-4"));
        assert!(admins.is_admin(1));
        assert!(admins.is_admin(3));
        assert_eq!(admins.len(), 2);
    }

    #[test]
    fn test_parse_admin_ids_falls_back_when_nothing_valid() {
        let admins = parse_admin_ids(Some("abc,def"));
        assert!(admins.is_admin(1672972729));
        assert_eq!(admins.len(), 1);

        let admins = parse_admin_ids(None);
        assert!(admins.is_admin(1672972729));
    }
}
