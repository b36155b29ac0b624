use richtext_html_engine::{OffsetUnit, Options, StyleSpec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// `default_block_tag = "div"` replaces the fallback tag, `false` drops it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultBlockTag {
    Tag(String),
    Enabled(bool),
}

/// A single wrapper tag or a list of them, outermost first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockTags {
    One(String),
    Nested(Vec<String>),
}

impl BlockTags {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            BlockTags::One(tag) => vec![tag],
            BlockTags::Nested(tags) => tags,
        }
    }
}

/// Overrides for the conversion defaults. Unset fields keep the engine's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_print: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_unit: Option<OffsetUnit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escape_quotes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_break: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preserve_whitespace: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_block_tag: Option<DefaultBlockTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub block_tags: BTreeMap<String, BlockTags>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub list_wrappers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub inline_styles: BTreeMap<String, StyleSpec>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        // Expand shell variables and tilde in the given path
        let config_path =
            Self::expand_path(config_path).unwrap_or_else(|| config_path.to_path_buf());
        if !config_path.exists() {
            log::debug!("no config file at {}", config_path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        log::debug!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/richtext-html");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    /// Layers the configured values over `options`.
    pub fn apply(self, mut options: Options) -> Options {
        if let Some(pretty_print) = self.pretty_print {
            options.pretty_print = pretty_print;
        }
        if let Some(max_depth) = self.max_depth {
            options.max_depth = max_depth;
        }
        if let Some(offset_unit) = self.offset_unit {
            options.offset_unit = offset_unit;
        }
        if let Some(escape_quotes) = self.escape_quotes {
            options.escape_quotes = escape_quotes;
        }
        if let Some(line_break) = self.line_break {
            options.line_break = line_break;
        }
        if let Some(empty_placeholder) = self.empty_placeholder {
            options.empty_placeholder = empty_placeholder;
        }
        if let Some(preserve_whitespace) = self.preserve_whitespace {
            options.preserve_whitespace = preserve_whitespace;
        }
        match self.default_block_tag {
            Some(DefaultBlockTag::Tag(tag)) => options.default_block_tag = Some(tag),
            Some(DefaultBlockTag::Enabled(false)) => options.default_block_tag = None,
            Some(DefaultBlockTag::Enabled(true)) | None => {}
        }
        if let Some(style_order) = self.style_order {
            options.style_order = Some(style_order);
        }
        for (block_type, tags) in self.block_tags {
            options.block_tags.insert(block_type, tags.into_vec());
        }
        options.list_wrappers.extend(self.list_wrappers);
        options.inline_styles.extend(self.inline_styles);
        options
    }
}
