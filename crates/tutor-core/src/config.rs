//! Configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults, `config.toml`, `config.<env>.toml`
//! and `APP_*` env vars into [`Settings`].

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::types::MatchOptions;

pub struct Config {
    figment: Figment,
    base: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data: DataSettings,
    pub search: SearchSettings,
    pub fallback: FallbackSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub curriculum_path: String,
    pub help_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            curriculum_path: "data/curriculum.json".to_string(),
            help_path: "data/help.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Approx,
    Tantivy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub backend: Backend,
    pub threshold: f64,
    pub min_term_len: usize,
    pub min_term_share: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let opts = MatchOptions::default();
        Self {
            backend: Backend::Approx,
            threshold: opts.threshold,
            min_term_len: opts.min_term_len,
            min_term_share: opts.min_term_share,
        }
    }
}

impl SearchSettings {
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            threshold: self.threshold,
            min_term_len: self.min_term_len,
            min_term_share: self.min_term_share,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackSettings {
    pub preview_chars: usize,
}

impl Default for FallbackSettings {
    fn default() -> Self { Self { preview_chars: 160 } }
}

impl Config {
    /// Load `config.toml` + `config.<RUST_ENV>.toml` from the working directory,
    /// then `APP_*` env vars (`__` separates nested keys).
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_from(Path::new("."), &env_name)
    }

    pub fn load_from(dir: &Path, env_name: &str) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(dir.join("config.toml")));
        match env_name {
            "dev" | "development" => {
                figment = figment.merge(Toml::file(dir.join("config.dev.toml")))
            }
            "prod" | "production" => {
                figment = figment.merge(Toml::file(dir.join("config.prod.toml")))
            }
            "test" | "testing" => {
                figment = figment.merge(Toml::file(dir.join("config.test.toml")))
            }
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment, base: dir.to_path_buf() };
        config.settings()?.search.match_options().validate()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    pub fn settings(&self) -> anyhow::Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))
    }

    /// Resolve a configured path against the directory the config was loaded from.
    pub fn resolve<S: AsRef<str>>(&self, p: S) -> PathBuf { resolve_with_base(&self.base, p) }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
