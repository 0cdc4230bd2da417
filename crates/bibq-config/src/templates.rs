//! Configuration templates for `bibq init`.
//!
//! Templates are valid TOML and returned as commented-out example
//! configurations.

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = r#"# bibq configuration for this directory tree.

# Stop looking for configuration in parent directories and ~/.bibq.toml.
root = false

[parser]
# Field keywords accepted in `keyword:value` queries. Anything else followed
# by a colon is treated as part of a plain value. MARC tags such as 999C5 are
# always accepted. Leave empty to accept any keyword.
allowed_keywords = ["title", "author", "year", "abstract", "keyword"]

# Rewrite SPIRES mnemonics (`find a ellis`) to canonical field names.
rewrite_spires = true
"#;

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = r#"# Global bibq configuration, used when no closer .bibq.toml sets a value.

[parser]
# Field keywords accepted in `keyword:value` queries. Leave empty to accept any.
allowed_keywords = []

# Rewrite SPIRES mnemonics (`find a ellis`) to canonical field names.
rewrite_spires = true
"#;

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Converts a valid TOML template into a commented-out example config.
///
/// Lines that are already comments are preserved as-is. Non-comment, non-empty
/// lines get a "# " prefix. Empty lines are preserved.
fn comment_template(template: &str) -> String {
    let mut result = String::with_capacity(template.len() + template.lines().count() * 2);
    for line in template.lines() {
        if !line.is_empty() && !line.starts_with('#') {
            result.push_str("# ");
        }
        result.push_str(line);
        result.push('\n');
    }
    result
}
