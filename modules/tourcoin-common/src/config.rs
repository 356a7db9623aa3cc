use std::env;
use std::str::FromStr;

use crate::error::TourcoinError;
use crate::geo::{ProximityPolicy, DEFAULT_PROXIMITY_THRESHOLD_KM, EARTH_RADIUS_KM};

/// Coins paid for a fresh visit.
pub const DEFAULT_VISIT_REWARD: i64 = 10;

/// Coins paid once, when a user first covers every stop of a route.
pub const DEFAULT_COMPLETION_BONUS: i64 = 100;

/// Coin amounts granted by the check-in workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardPolicy {
    pub visit_coins: i64,
    pub completion_bonus: i64,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            visit_coins: DEFAULT_VISIT_REWARD,
            completion_bonus: DEFAULT_COMPLETION_BONUS,
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Database
    pub database_url: String,
    pub db_max_connections: u32,

    // Server
    pub host: String,
    pub port: u16,

    // Check-in rules
    pub proximity: ProximityPolicy,
    pub rewards: RewardPolicy,

    // CORS
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self, TourcoinError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TourcoinError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                TourcoinError::Config("DATABASE_URL environment variable is required".into())
            })?;

        let proximity = ProximityPolicy {
            earth_radius_km: parse_or(&lookup, "EARTH_RADIUS_KM", EARTH_RADIUS_KM)?,
            threshold_km: parse_or(&lookup, "PROXIMITY_THRESHOLD_KM", DEFAULT_PROXIMITY_THRESHOLD_KM)?,
        };
        let proximity_valid = proximity.earth_radius_km.is_finite()
            && proximity.earth_radius_km > 0.0
            && proximity.threshold_km.is_finite()
            && proximity.threshold_km >= 0.0;
        if !proximity_valid {
            return Err(TourcoinError::Config(
                "EARTH_RADIUS_KM must be positive and PROXIMITY_THRESHOLD_KM non-negative".into(),
            ));
        }

        let rewards = RewardPolicy {
            visit_coins: parse_or(&lookup, "VISIT_REWARD_COINS", DEFAULT_VISIT_REWARD)?,
            completion_bonus: parse_or(&lookup, "ROUTE_COMPLETION_BONUS", DEFAULT_COMPLETION_BONUS)?,
        };
        if rewards.visit_coins < 0 || rewards.completion_bonus < 0 {
            return Err(TourcoinError::Config("coin rewards cannot be negative".into()));
        }

        Ok(Self {
            database_url,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 5000)?,
            proximity,
            rewards,
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, TourcoinError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| TourcoinError::Config(format!("{key} has an invalid value: {raw:?}"))),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/tourcoin")])).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.proximity, ProximityPolicy::default());
        assert_eq!(config.rewards, RewardPolicy::default());
        assert!(config.allowed_origins.is_empty());
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, TourcoinError::Config(_)));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/tourcoin"),
            ("PORT", "8080"),
            ("PROXIMITY_THRESHOLD_KM", "0.25"),
            ("EARTH_RADIUS_KM", "6378.1"),
            ("VISIT_REWARD_COINS", "5"),
            ("ROUTE_COMPLETION_BONUS", "50"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.proximity.threshold_km, 0.25);
        assert_eq!(config.proximity.earth_radius_km, 6378.1);
        assert_eq!(config.rewards.visit_coins, 5);
        assert_eq!(config.rewards.completion_bonus, 50);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/tourcoin"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn negative_rewards_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/tourcoin"),
            ("VISIT_REWARD_COINS", "-1"),
        ]))
        .unwrap_err();
        assert!(matches!(err, TourcoinError::Config(_)));
    }
}
