use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Project fields that accept single-element appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectArrayField {
    FrontendTech,
    BackendTech,
    Features,
    Challenges,
}

impl ProjectArrayField {
    pub const ALL: [ProjectArrayField; 4] = [
        ProjectArrayField::FrontendTech,
        ProjectArrayField::BackendTech,
        ProjectArrayField::Features,
        ProjectArrayField::Challenges,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectArrayField::FrontendTech => "frontendTech",
            ProjectArrayField::BackendTech => "backendTech",
            ProjectArrayField::Features => "features",
            ProjectArrayField::Challenges => "challenges",
        }
    }
}

impl FromStr for ProjectArrayField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|f| f.as_str() == s).ok_or(())
    }
}

impl fmt::Display for ProjectArrayField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `PUT /projects/{id}/add/{field}`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct AddItemRequest {
    #[serde(rename = "newItem")]
    pub new_item: Option<String>,
}
