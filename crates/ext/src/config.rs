//! Binding configuration
//!
//! The names the extension registers under. Defaults reproduce the
//! classic layout, `Extension::Fibonacci.nth_fibonacci`; an embedding host
//! can override any of them from TOML:
//!
//! ```toml
//! module = "Native"
//! class = "Fib"
//! method = "compute"
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Names used when registering the extension with a host
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionConfig {
    /// Top-level module (a constant name)
    pub module: String,
    /// Class defined under `module` (a constant name)
    pub class: String,
    /// Singleton method defined on `class`
    pub method: String,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        ExtensionConfig {
            module: "Extension".to_string(),
            class: "Fibonacci".to_string(),
            method: "nth_fibonacci".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read extension config: {}", e),
            ConfigError::Parse(e) => write!(f, "failed to parse extension config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid extension config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl ExtensionConfig {
    /// Parse and validate a config from TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Check every name is one the host will accept
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_constant("module", &self.module)?;
        validate_constant("class", &self.class)?;
        validate_method(&self.method)
    }

    /// `Module::Class`
    pub fn qualified_class(&self) -> String {
        format!("{}::{}", self.module, self.class)
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn validate_constant(field: &str, name: &str) -> Result<(), ConfigError> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => {}
        Some(_) => {
            return Err(ConfigError::Invalid(format!(
                "{} '{}' must start with an uppercase letter",
                field, name
            )));
        }
        None => return Err(ConfigError::Invalid(format!("{} name is empty", field))),
    }
    if let Some(c) = chars.find(|c| !is_ident_char(*c)) {
        return Err(ConfigError::Invalid(format!(
            "invalid character '{}' in {} '{}'",
            c, field, name
        )));
    }
    Ok(())
}

fn validate_method(name: &str) -> Result<(), ConfigError> {
    let body = name
        .strip_suffix('?')
        .or_else(|| name.strip_suffix('!'))
        .unwrap_or(name);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        Some(_) => {
            return Err(ConfigError::Invalid(format!(
                "method '{}' must start with a lowercase letter or '_'",
                name
            )));
        }
        None => return Err(ConfigError::Invalid("method name is empty".to_string())),
    }
    if let Some(c) = chars.find(|c| !is_ident_char(*c)) {
        return Err(ConfigError::Invalid(format!(
            "invalid character '{}' in method '{}'",
            c, name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_names() {
        let config = ExtensionConfig::default();
        assert_eq!(config.qualified_class(), "Extension::Fibonacci");
        assert_eq!(config.method, "nth_fibonacci");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ExtensionConfig::parse("").unwrap();
        assert_eq!(config, ExtensionConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = ExtensionConfig::parse("module = \"Native\"\n").unwrap();
        assert_eq!(config.module, "Native");
        assert_eq!(config.class, "Fibonacci");
    }

    #[test]
    fn test_predicate_and_bang_methods() {
        assert!(ExtensionConfig::parse("method = \"fib?\"").is_ok());
        assert!(ExtensionConfig::parse("method = \"fib!\"").is_ok());
        assert!(ExtensionConfig::parse("method = \"_fib2\"").is_ok());
    }

    #[test]
    fn test_rejects_lowercase_module() {
        let err = ExtensionConfig::parse("module = \"extension\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("uppercase"));
    }

    #[test]
    fn test_rejects_bad_characters() {
        assert!(ExtensionConfig::parse("class = \"Fib-Calc\"").is_err());
        assert!(ExtensionConfig::parse("method = \"nth fib\"").is_err());
        assert!(ExtensionConfig::parse("method = \"fib?!\"").is_err());
        assert!(ExtensionConfig::parse("method = \"\"").is_err());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = ExtensionConfig::parse("arity = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
