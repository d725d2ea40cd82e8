use std::fmt;
use thiserror::Error;

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub path: &'static str,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Rejection of a create or update payload for one entity
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{entity} validation failed: {}", join_errors(.errors))]
pub struct ValidationError {
    pub entity: &'static str,
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Whether `path` is among the failed fields
    #[cfg(test)]
    pub fn has_path(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }
}

fn join_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Collects field failures for one payload so that every problem is
/// reported at once.
///
/// Missing values come back as `T::default()`; callers must call
/// [`Validator::finish`] before using anything the validator returned.
#[derive(Debug)]
pub struct Validator {
    entity: &'static str,
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new(entity: &'static str) -> Self {
        Self { entity, errors: Vec::new() }
    }

    /// A required value of any type
    pub fn required<T: Default>(&mut self, path: &'static str, value: Option<T>) -> T {
        match value {
            Some(value) => value,
            None => {
                self.missing(path);
                T::default()
            }
        }
    }

    /// A required string; blank strings count as missing
    pub fn required_text(&mut self, path: &'static str, value: Option<String>) -> String {
        match value {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                self.missing(path);
                String::new()
            }
        }
    }

    /// A required string in a partial update: absent is fine, blank is not
    pub fn non_blank(&mut self, path: &'static str, value: Option<&String>) {
        if let Some(value) = value {
            if value.trim().is_empty() {
                self.push(path, format!("Path `{}` cannot be empty.", path));
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                entity: self.entity,
                errors: self.errors,
            })
        }
    }

    fn missing(&mut self, path: &'static str) {
        self.push(path, format!("Path `{}` is required.", path));
    }

    fn push(&mut self, path: &'static str, reason: String) {
        self.errors.push(FieldError { path, reason });
    }
}
