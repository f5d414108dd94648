use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::classify::rules::RuleSet;
use crate::error::SyncError;

pub const CONFIG_FILE: &str = "quiz_sync";
pub const ENV_PREFIX: &str = "QUIZ_SYNC";

/// Paths and rule selection. Layered: defaults, then `quiz_sync.toml` in the
/// working directory if present, then `QUIZ_SYNC_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub html_file: PathBuf,
    pub js_file: PathBuf,
    pub preview_file: PathBuf,
    pub rules: String,
}

impl Settings {
    pub fn load() -> Result<Self, SyncError> {
        let settings = Self::builder()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, SyncError> {
        Ok(Config::builder()
            .set_default("html_file", "index.html")?
            .set_default("js_file", "recommendation_engine.js")?
            .set_default("preview_file", "tool_analysis_preview.json")?
            .set_default("rules", "standard")?)
    }

    pub fn rule_set(&self) -> Result<RuleSet, SyncError> {
        RuleSet::by_name(&self.rules).ok_or_else(|| SyncError::UnknownRules(self.rules.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings: Settings = Settings::builder().unwrap().build().unwrap().try_deserialize().unwrap();
        assert_eq!(settings.html_file, PathBuf::from("index.html"));
        assert_eq!(settings.js_file, PathBuf::from("recommendation_engine.js"));
        assert_eq!(settings.preview_file, PathBuf::from("tool_analysis_preview.json"));
        assert_eq!(settings.rule_set().unwrap().name, "standard");
    }

    #[test]
    fn overrides_layer_on_defaults() {
        let settings: Settings = Settings::builder()
            .unwrap()
            .set_override("rules", "audit")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.rule_set().unwrap().name, "audit");
        assert_eq!(settings.html_file, PathBuf::from("index.html"));
    }

    #[test]
    fn unknown_rules_rejected() {
        let settings = Settings {
            html_file: "index.html".into(),
            js_file: "engine.js".into(),
            preview_file: "preview.json".into(),
            rules: "fuzzy".to_string(),
        };
        assert!(matches!(settings.rule_set(), Err(SyncError::UnknownRules(r)) if r == "fuzzy"));
    }
}
