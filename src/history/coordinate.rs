//! Package coordinates
//!
//! A coordinate names one distributable artifact:
//! `group:name[:extension[:classifier]]:version`. The history store treats
//! it as opaque apart from parsing and printing it back out unchanged.

use crate::error::{HistoryError, HistoryResult};
use std::fmt;
use std::str::FromStr;

/// Fully-qualified artifact identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub group: String,
    pub name: String,
    pub extension: Option<String>,
    pub classifier: Option<String>,
    pub version: String,
}

impl Coordinate {
    /// Create a plain `group:name:version` coordinate
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            extension: None,
            classifier: None,
            version: version.into(),
        }
    }

    /// The `group:name` part, which is what users usually type
    pub fn identity(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }
}

impl FromStr for Coordinate {
    type Err = HistoryError;

    fn from_str(s: &str) -> HistoryResult<Self> {
        let parts: Vec<&str> = s.split(':').collect();

        if let Some(bad) = parts
            .iter()
            .find(|p| p.is_empty() || p.chars().any(char::is_whitespace))
        {
            let reason = if bad.is_empty() {
                "empty segment".to_string()
            } else {
                format!("segment '{}' contains whitespace", bad)
            };
            return Err(HistoryError::coordinate(s, reason));
        }

        match parts.as_slice() {
            [group, name, version] => Ok(Self::new(*group, *name, *version)),
            [group, name, extension, version] => Ok(Self {
                extension: Some(extension.to_string()),
                ..Self::new(*group, *name, *version)
            }),
            [group, name, extension, classifier, version] => Ok(Self {
                extension: Some(extension.to_string()),
                classifier: Some(classifier.to_string()),
                ..Self::new(*group, *name, *version)
            }),
            _ => Err(HistoryError::coordinate(
                s,
                format!("expected 3 to 5 ':'-separated segments, found {}", parts.len()),
            )),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)?;
        if let Some(extension) = &self.extension {
            write!(f, ":{}", extension)?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        write!(f, ":{}", self.version)
    }
}
