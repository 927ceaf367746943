//! Generator configuration: named vocabulary lists plus the patterns that combine them.

mod defaults;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::template::{Template, TemplateError};

pub const CONFIG_ENV: &str = "KWGEN_CONFIG";

/// Named word lists. Ordered by name so saved configs diff cleanly.
pub type Vocabulary = BTreeMap<String, Vec<String>>;

/// Errors returned while loading or validating a generator config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{owner} contains a line break in {text:?}. Keywords are written one per line.")]
    LineBreak { owner: String, text: String },

    #[error("Pattern '{pattern}' references unknown vocabulary list '{list}'")]
    UnknownList { pattern: String, list: String },

    #[error("Pattern '{pattern}': template '{template}' uses slot '{{{slot}}}' that no list binds")]
    UnknownSlot {
        pattern: String,
        template: String,
        slot: String,
    },

    #[error("Pattern '{pattern}' binds slot '{slot}' more than once")]
    DuplicateSlot { pattern: String, slot: String },

    #[error("Pattern '{pattern}' references lists but has no templates")]
    MissingTemplates { pattern: String },

    #[error("Pattern '{pattern}' has no lists, templates, or phrases")]
    EmptyPattern { pattern: String },

    #[error("Duplicate pattern name '{pattern}'")]
    DuplicatePattern { pattern: String },

    #[error("Pattern '{pattern}': {source}")]
    Template {
        pattern: String,
        source: TemplateError,
    },

    #[error("Cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// One list consumed by a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListRef {
    /// Vocabulary list name
    pub list: String,
    /// Placeholder name used in templates (default: the list name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
    /// Use only the first N entries of the list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl ListRef {
    pub fn new(list: &str, slot: &str) -> Self {
        Self {
            list: list.to_string(),
            slot: (slot != list).then(|| slot.to_string()),
            limit: None,
        }
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn slot_name(&self) -> &str {
        self.slot.as_deref().unwrap_or(&self.list)
    }

    /// The referenced words after applying `limit`.
    pub fn select<'a>(&self, words: &'a [String]) -> &'a [String] {
        match self.limit {
            Some(n) => &words[..n.min(words.len())],
            None => words,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pattern {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<ListRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub templates: Vec<String>,
    /// Literal phrases included verbatim
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phrases: Vec<String>,
}

impl Pattern {
    /// Parse and check every template against the pattern's bound slots.
    pub fn compile(&self) -> Result<Vec<Template>, ConfigError> {
        let mut bound = HashSet::new();
        for r in &self.lists {
            if !bound.insert(r.slot_name()) {
                return Err(ConfigError::DuplicateSlot {
                    pattern: self.name.clone(),
                    slot: r.slot_name().to_string(),
                });
            }
        }

        self.templates
            .iter()
            .map(|src| {
                let template = Template::parse(src).map_err(|source| ConfigError::Template {
                    pattern: self.name.clone(),
                    source,
                })?;
                if let Some(slot) = template.slots().find(|s| !bound.contains(s)) {
                    return Err(ConfigError::UnknownSlot {
                        pattern: self.name.clone(),
                        template: src.clone(),
                        slot: slot.to_string(),
                    });
                }
                Ok(template)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub vocabulary: Vocabulary,
    #[serde(default)]
    pub patterns: Vec<Pattern>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            lists = config.vocabulary.len(),
            patterns = config.patterns.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Load from `path`, else from `KWGEN_CONFIG`, else the built-in default.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve_with(path, std::env::var(CONFIG_ENV).ok())
    }

    fn resolve_with(path: Option<&Path>, env_value: Option<String>) -> Result<Self, ConfigError> {
        let from_env = env_value
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        match path.map(Path::to_path_buf).or(from_env) {
            Some(p) => Self::load(&p),
            None => {
                debug!("no config file given, using built-in default");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        let mut json = serde_json::to_string_pretty(self)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        json.push('\n');
        std::fs::write(path, json).map_err(write_err)
    }

    /// Fail fast on the first structural problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.compile().map(|_| ())
    }

    /// Validate and return each pattern's parsed templates, in pattern order.
    pub fn compile(&self) -> Result<Vec<Vec<Template>>, ConfigError> {
        for (name, words) in &self.vocabulary {
            reject_line_breaks(words, || format!("Vocabulary list '{name}'"))?;
        }

        let mut names = HashSet::new();
        let mut compiled = Vec::with_capacity(self.patterns.len());
        for pattern in &self.patterns {
            if !names.insert(pattern.name.as_str()) {
                return Err(ConfigError::DuplicatePattern {
                    pattern: pattern.name.clone(),
                });
            }
            if pattern.lists.is_empty()
                && pattern.templates.is_empty()
                && pattern.phrases.is_empty()
            {
                return Err(ConfigError::EmptyPattern {
                    pattern: pattern.name.clone(),
                });
            }
            if !pattern.lists.is_empty() && pattern.templates.is_empty() {
                return Err(ConfigError::MissingTemplates {
                    pattern: pattern.name.clone(),
                });
            }
            if let Some(r) = pattern
                .lists
                .iter()
                .find(|r| !self.vocabulary.contains_key(&r.list))
            {
                return Err(ConfigError::UnknownList {
                    pattern: pattern.name.clone(),
                    list: r.list.clone(),
                });
            }
            let owner = || format!("Pattern '{}'", pattern.name);
            reject_line_breaks(&pattern.templates, owner)?;
            reject_line_breaks(&pattern.phrases, owner)?;
            compiled.push(pattern.compile()?);
        }
        Ok(compiled)
    }
}

fn reject_line_breaks(texts: &[String], owner: impl Fn() -> String) -> Result<(), ConfigError> {
    match texts.iter().find(|t| t.contains(['\n', '\r'])) {
        Some(text) => Err(ConfigError::LineBreak {
            owner: owner(),
            text: text.clone(),
        }),
        None => Ok(()),
    }
}

impl Default for Config {
    fn default() -> Self {
        defaults::zaragoza()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(|w| w.to_string()).collect()
    }

    fn config_with(pattern: Pattern) -> Config {
        let mut vocabulary = Vocabulary::new();
        vocabulary.insert("tipos".into(), words(&["piso", "habitacion"]));
        Config {
            vocabulary,
            patterns: vec![pattern],
        }
    }

    fn pattern(lists: Vec<ListRef>, templates: &[&str]) -> Pattern {
        Pattern {
            name: "p".into(),
            lists,
            templates: words(templates),
            phrases: vec![],
        }
    }

    #[test]
    fn default_config_is_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn default_config_limits_core_housing_types() {
        let cfg = Config::default();
        assert_eq!(cfg.patterns.len(), 13);
        let barrio = cfg.patterns.iter().find(|p| p.name == "tipo_barrio").unwrap();
        assert_eq!(barrio.lists[0].limit, Some(4));
    }

    #[test]
    fn unknown_list_names_the_list() {
        let cfg = config_with(pattern(vec![ListRef::new("barrios", "barrio")], &["{barrio}"]));
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownList { ref list, .. } if list == "barrios"));
        assert!(err.to_string().contains("'barrios'"), "got: {err}");
    }

    #[test]
    fn unknown_slot_is_rejected() {
        let cfg = config_with(pattern(vec![ListRef::new("tipos", "tipo")], &["{tipo} {barrio}"]));
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::UnknownSlot { ref slot, .. }) if slot == "barrio"
        ));
    }

    #[test]
    fn duplicate_slot_is_rejected() {
        let cfg = config_with(pattern(
            vec![ListRef::new("tipos", "tipo"), ListRef::new("tipos", "tipo")],
            &["{tipo}"],
        ));
        assert!(matches!(cfg.validate(), Err(ConfigError::DuplicateSlot { .. })));
    }

    #[test]
    fn same_list_twice_under_different_slots_is_allowed() {
        let cfg = config_with(pattern(
            vec![ListRef::new("tipos", "a"), ListRef::new("tipos", "b")],
            &["{a} o {b}"],
        ));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn lists_without_templates_are_rejected() {
        let cfg = config_with(pattern(vec![ListRef::new("tipos", "tipo")], &[]));
        assert!(matches!(cfg.validate(), Err(ConfigError::MissingTemplates { .. })));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let cfg = config_with(pattern(vec![], &[]));
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyPattern { .. })));
    }

    #[test]
    fn duplicate_pattern_name_is_rejected() {
        let mut cfg = config_with(pattern(vec![ListRef::new("tipos", "tipo")], &["{tipo}"]));
        cfg.patterns.push(cfg.patterns[0].clone());
        assert!(matches!(cfg.validate(), Err(ConfigError::DuplicatePattern { .. })));
    }

    #[test]
    fn template_syntax_error_is_wrapped() {
        let cfg = config_with(pattern(vec![ListRef::new("tipos", "tipo")], &["{tipo"]));
        assert!(matches!(cfg.validate(), Err(ConfigError::Template { .. })));
    }

    #[test]
    fn slot_defaults_to_list_name() {
        let r = ListRef::new("tipos", "tipos");
        assert_eq!(r.slot, None);
        assert_eq!(r.slot_name(), "tipos");
    }

    #[test]
    fn limit_selects_prefix() {
        let ws = words(&["a", "b", "c"]);
        assert_eq!(ListRef::new("x", "x").limit(2).select(&ws), &ws[..2]);
        assert_eq!(ListRef::new("x", "x").limit(10).select(&ws), &ws[..]);
        assert_eq!(ListRef::new("x", "x").select(&ws), &ws[..]);
    }

    #[test]
    fn parses_minimal_json() {
        let json = r#"{
            "vocabulary": {"tipos": ["piso"]},
            "patterns": [
                {"name": "p", "lists": [{"list": "tipos", "slot": "tipo", "limit": 4}], "templates": ["{tipo} zaragoza"]},
                {"name": "q", "phrases": ["badi zaragoza"]}
            ]
        }"#;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.patterns[0].lists[0].limit, Some(4));
        assert_eq!(cfg.patterns[1].phrases, vec!["badi zaragoza"]);
        cfg.validate().unwrap();
    }

    #[test]
    fn rejects_unknown_fields() {
        let json = r#"{"vocabulary": {}, "patterns": [], "extra": 1}"#;
        assert!(serde_json::from_str::<Config>(json).is_err());
    }

    #[test]
    fn save_then_load_preserves_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kwgen.json");
        let cfg = Config::default();
        cfg.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), cfg);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn load_reports_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.json");
        std::fs::write(&path, r#"{"patterns": [{"name": "q", "phrases": ["a"]}]}"#).unwrap();
        let cfg = Config::resolve(Some(path.as_path())).unwrap();
        assert_eq!(cfg.patterns.len(), 1);
    }

    fn small_configs(dir: &Path) -> (PathBuf, PathBuf) {
        let explicit = dir.join("explicit.json");
        let from_env = dir.join("env.json");
        std::fs::write(&explicit, r#"{"patterns": [{"name": "explicit", "phrases": ["a"]}]}"#)
            .unwrap();
        std::fs::write(&from_env, r#"{"patterns": [{"name": "env", "phrases": ["b"]}]}"#).unwrap();
        (explicit, from_env)
    }

    #[test]
    fn resolve_with_env_value_loads_that_file() {
        let dir = tempfile::tempdir().unwrap();
        let (_, from_env) = small_configs(dir.path());
        let env_value = format!("  {}\n", from_env.display());
        let cfg = Config::resolve_with(None, Some(env_value)).unwrap();
        assert_eq!(cfg.patterns[0].name, "env");
    }

    #[test]
    fn resolve_with_explicit_path_beats_env_value() {
        let dir = tempfile::tempdir().unwrap();
        let (explicit, from_env) = small_configs(dir.path());
        let env_value = Some(from_env.display().to_string());
        let cfg = Config::resolve_with(Some(explicit.as_path()), env_value).unwrap();
        assert_eq!(cfg.patterns[0].name, "explicit");
    }

    #[test]
    fn resolve_with_blank_env_value_uses_builtin() {
        assert_eq!(Config::resolve_with(None, Some("   ".into())).unwrap(), Config::default());
        assert_eq!(Config::resolve_with(None, None).unwrap(), Config::default());
    }

    // The only test that touches the process environment.
    #[test]
    fn resolve_reads_config_env_var() {
        let dir = tempfile::tempdir().unwrap();
        let (explicit, from_env) = small_configs(dir.path());

        unsafe { std::env::set_var(CONFIG_ENV, &from_env) };
        let via_env = Config::resolve(None);
        let via_flag = Config::resolve(Some(explicit.as_path()));
        unsafe { std::env::set_var(CONFIG_ENV, " ") };
        let blank = Config::resolve(None);
        unsafe { std::env::remove_var(CONFIG_ENV) };

        assert_eq!(via_env.unwrap().patterns[0].name, "env");
        assert_eq!(via_flag.unwrap().patterns[0].name, "explicit");
        assert_eq!(blank.unwrap(), Config::default());
    }

    #[test]
    fn line_break_in_vocabulary_word_is_rejected() {
        let mut cfg = config_with(pattern(vec![ListRef::new("tipos", "tipo")], &["{tipo}"]));
        cfg.vocabulary.insert("w".into(), words(&["piso\nzaragoza"]));
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::LineBreak { .. }));
        assert!(err.to_string().contains("'w'"), "got: {err}");
    }

    #[test]
    fn line_break_in_phrase_or_template_is_rejected() {
        let mut cfg = config_with(pattern(vec![ListRef::new("tipos", "tipo")], &["{tipo}\r"]));
        let err = cfg.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::LineBreak { ref owner, .. } if owner.contains("'p'")),
            "got: {err}"
        );

        cfg.patterns[0].templates = words(&["{tipo}"]);
        cfg.patterns[0].phrases = words(&["piso", "piso\nzaragoza"]);
        assert!(matches!(cfg.validate(), Err(ConfigError::LineBreak { .. })));
    }

    #[test]
    fn compile_returns_templates_per_pattern() {
        let compiled = Config::default().compile().unwrap();
        assert_eq!(compiled.len(), 13);
        assert_eq!(compiled[0].len(), 2);
        assert!(compiled.last().unwrap().is_empty());
    }
}
