use serde::Deserialize;
use std::fmt;

/// Validated `theme.key` address inside a color theme document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorPath {
    theme: String,
    key: String,
}

impl ColorPath {
    pub fn new(theme: &str, key: &str) -> Option<Self> {
        if is_valid_segment(theme) && is_valid_segment(key) {
            Some(Self {
                theme: theme.to_string(),
                key: key.to_string(),
            })
        } else {
            None
        }
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Dotted path used as the update target.
    pub fn dotted(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.theme(), self.key())
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.trim().is_empty()
        && !segment.contains('.')
        && !segment.starts_with('$')
        && segment != "_id"
}

/// Body of `PUT /colors/{id}/{theme}/{key}`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ColorUpdateRequest {
    #[serde(rename = "newColor")]
    pub new_color: Option<String>,
}
