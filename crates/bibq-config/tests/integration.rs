//! Integration tests for bibq-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge.

#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use bibq_config::{CONFIG_FILENAME, Config, ConfigError, is_global_config};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    /// Owned temporary directory.
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn no_config_returns_default() {
    let config = Config::load_from_files(&[]).unwrap();
    assert!(config.parser.allowed_keywords.is_empty());
    assert!(config.parser.rewrite_spires);
    assert!(config.config_root.is_none());
    assert!(config.sources.is_empty());
}

#[test]
fn single_config() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        r#"
root = true

[parser]
allowed_keywords = ["title", "author"]
"#,
    );

    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.parser.allowed_keywords, vec!["title", "author"]);
    assert!(config.parser.rewrite_spires);
    assert_eq!(config.config_root.as_deref(), Some(env.path()));
    assert_eq!(config.sources, vec![env.path().join(CONFIG_FILENAME)]);
}

#[test]
fn nested_configs_merge_closest_first() {
    let env = TestEnv::new();
    env.create_file(
        CONFIG_FILENAME,
        r#"
root = true

[parser]
allowed_keywords = ["title"]
rewrite_spires = false
"#,
    );
    env.create_file(
        "project/.bibq.toml",
        r#"
[parser]
allowed_keywords = ["author", "year"]
"#,
    );
    let cwd = env.create_dir("project/src");

    let config = Config::load(&cwd).unwrap();
    assert_eq!(config.parser.allowed_keywords, vec!["author", "year"]);
    assert!(!config.parser.rewrite_spires);
    assert_eq!(config.config_root, Some(env.path().join("project")));
    assert_eq!(config.sources.len(), 2);
}

#[test]
fn root_config_hides_parents() {
    let env = TestEnv::new();
    env.create_file(CONFIG_FILENAME, "[parser]\nrewrite_spires = false\n");
    env.create_file("project/.bibq.toml", "root = true\n");

    let config = Config::load(&env.path().join("project")).unwrap();
    assert!(config.parser.rewrite_spires);
    assert_eq!(config.sources.len(), 1);
}

#[test]
fn invalid_config_reports_path() {
    let env = TestEnv::new();
    let path = env.create_file(CONFIG_FILENAME, "root = true\n[parser\n");

    let err = Config::load(env.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn keyword_string_in_discovered_file() {
    let env = TestEnv::new();
    env.create_file("a/.bibq.toml", "[parser]\nallowed_keywords = \"title\"\n");
    let cwd = env.create_dir("a/b");

    let config = Config::load(&cwd).unwrap();
    let local: Vec<_> = config
        .sources
        .iter()
        .filter(|p| !is_global_config(p))
        .collect();
    assert_eq!(local, vec![&env.path().join("a/.bibq.toml")]);
    assert_eq!(config.parser.allowed_keywords, vec!["title"]);
}
