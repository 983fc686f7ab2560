//! Runtime configuration read from `PMSC_*` environment variables.

use std::path::PathBuf;

use tracing::warn;

use crate::keybindings::KeyPolicy;

pub const ENV_KEY_POLICY: &str = "PMSC_KEY_POLICY";
pub const ENV_AUTOPLAY: &str = "PMSC_AUTOPLAY";
pub const ENV_ASSET_DIR: &str = "PMSC_ASSET_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub key_policy: KeyPolicy,
    /// Start videos as soon as their entry opens
    pub autoplay: bool,
    /// Directory relative media paths are resolved against
    pub asset_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_policy: KeyPolicy::default(),
            autoplay: true,
            asset_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Invalid values are logged and
    /// replaced by their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_KEY_POLICY) {
            match value.parse::<KeyPolicy>() {
                Ok(policy) => config.key_policy = policy,
                Err(err) => warn!("{}: {}, using {}", ENV_KEY_POLICY, err, config.key_policy),
            }
        }

        if let Some(value) = lookup(ENV_AUTOPLAY) {
            match parse_flag(&value) {
                Some(flag) => config.autoplay = flag,
                None => warn!("{}: not a boolean: {:?}", ENV_AUTOPLAY, value),
            }
        }

        if let Some(value) = lookup(ENV_ASSET_DIR).filter(|v| !v.trim().is_empty()) {
            config.asset_dir = PathBuf::from(value);
        }

        config
    }

    /// Resolve a catalog media reference against the asset directory
    pub fn resolve_asset(&self, reference: &str) -> PathBuf {
        self.asset_dir.join(reference)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.key_policy, KeyPolicy::SlidesFirst);
        assert!(config.autoplay);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            (ENV_KEY_POLICY, "entries"),
            (ENV_AUTOPLAY, "off"),
            (ENV_ASSET_DIR, "/srv/site"),
        ]));
        assert_eq!(config.key_policy, KeyPolicy::EntriesFirst);
        assert!(!config.autoplay);
        assert_eq!(
            config.resolve_asset("videos/a.mp4"),
            PathBuf::from("/srv/site/videos/a.mp4")
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            (ENV_KEY_POLICY, "diagonal"),
            (ENV_AUTOPLAY, "maybe"),
            (ENV_ASSET_DIR, "  "),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag(""), None);
    }
}
