//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::{Path, PathBuf};

use crate::{
    Config, ParserSettings,
    parse::{RawConfig, RawParserSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For each setting, the first file that defines it
/// wins; keyword lists replace each other rather than accumulating.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut parser = ParserSettings::default();

    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.parser {
            apply_raw_parser(&mut parser, raw);
        }
    }

    Config {
        parser,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(Path::to_path_buf),
    }
}

/// Applies raw parser settings to result, overwriting any present values.
fn apply_raw_parser(result: &mut ParserSettings, raw: &RawParserSettings) {
    if let Some(ref v) = raw.allowed_keywords {
        result.allowed_keywords.clone_from(v);
    }
    if let Some(v) = raw.rewrite_spires {
        result.rewrite_spires = v;
    }
}
