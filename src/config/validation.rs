//! Policy file validation.
//!
//! Checks that need no SPDX table: regex syntax, empty fields, and the reason
//! requirement on transitive ignores. Identifier checks happen when the file
//! is converted with [`PolicyFile::into_policy`].

use super::types::{AllowSection, IdPattern, IgnoreEntry, PolicyFile};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for PolicyFile {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = self.allow.validate();
        for (i, entry) in self.ignore.iter().enumerate() {
            errors.extend(entry.validate().into_iter().map(|e| ConfigError {
                field: format!("ignore[{i}].{}", e.field),
                message: e.message,
            }));
        }
        errors
    }
}

impl Validatable for AllowSection {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (i, identifier) in self.identifiers.iter().enumerate() {
            if identifier.trim().is_empty() {
                errors.push(ConfigError {
                    field: format!("allow.identifiers[{i}]"),
                    message: "SPDX identifier must not be empty".to_string(),
                });
            }
        }

        for (i, allowed) in self.urls.iter().enumerate() {
            if allowed.url.trim().is_empty() {
                errors.push(ConfigError {
                    field: format!("allow.urls[{i}].url"),
                    message: "URL must not be empty".to_string(),
                });
            }
        }

        for (i, allowed) in self.dependencies.iter().enumerate() {
            for (name, value) in [
                ("group", &allowed.group),
                ("artifact", &allowed.artifact),
                ("version", &allowed.version),
            ] {
                if value.trim().is_empty() {
                    errors.push(ConfigError {
                        field: format!("allow.dependencies[{i}].{name}"),
                        message: format!("{name} must not be empty"),
                    });
                }
            }
        }

        errors
    }
}

impl Validatable for IgnoreEntry {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(validate_pattern("group", &self.group));
        if let Some(ref artifact) = self.artifact {
            errors.extend(validate_pattern("artifact", artifact));
        }

        if self.transitive && self.reason.is_none() {
            let target = match &self.artifact {
                Some(artifact) => format!("{}:{artifact}", self.group),
                None => self.group.to_string(),
            };
            errors.push(ConfigError {
                field: "reason".to_string(),
                message: format!(
                    "Transitive dependency ignore on '{target}' is dangerous and requires a reason string"
                ),
            });
        }
        errors
    }
}

fn validate_pattern(field: &str, pattern: &IdPattern) -> Option<ConfigError> {
    match pattern {
        IdPattern::Literal(literal) if literal.trim().is_empty() => Some(ConfigError {
            field: field.to_string(),
            message: "id must not be empty".to_string(),
        }),
        IdPattern::Literal(_) => None,
        IdPattern::Regex { .. } => pattern.to_id().err().map(|e| ConfigError {
            field: field.to_string(),
            message: format!("invalid regex: {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{AllowedDependency, AllowedUrl};

    #[test]
    fn test_default_policy_file_is_valid() {
        assert!(PolicyFile::default().is_valid());
    }

    #[test]
    fn test_allow_section_empty_fields() {
        let section = AllowSection {
            identifiers: vec!["MIT".to_string(), " ".to_string()],
            urls: vec![AllowedUrl {
                url: String::new(),
                reason: None,
            }],
            dependencies: vec![AllowedDependency {
                group: "g".to_string(),
                artifact: "a".to_string(),
                version: String::new(),
                reason: None,
            }],
        };
        let fields: Vec<String> = section.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "allow.identifiers[1]",
                "allow.urls[0].url",
                "allow.dependencies[0].version"
            ]
        );
    }

    #[test]
    fn test_ignore_entry_errors_are_field_scoped() {
        let file = PolicyFile {
            ignore: vec![
                IgnoreEntry {
                    group: IdPattern::Literal("ok".to_string()),
                    artifact: None,
                    transitive: false,
                    reason: None,
                },
                IgnoreEntry {
                    group: IdPattern::Literal("com.example".to_string()),
                    artifact: Some(IdPattern::Regex {
                        regex: "[".to_string(),
                    }),
                    transitive: true,
                    reason: None,
                },
            ],
            ..PolicyFile::default()
        };
        let errors = file.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "ignore[1].artifact");
        assert_eq!(errors[1].field, "ignore[1].reason");
        assert!(errors[1].message.contains("'com.example:/[/'"));
    }
}
