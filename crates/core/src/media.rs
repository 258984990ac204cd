//! Media asset vocabulary shared between the store backends and the API.

use serde::{Deserialize, Serialize};

/// The kind of binary payload a project may own. Determines which
/// subdirectory (or key prefix) the backend files it under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
}

impl AssetKind {
    /// Stable prefix used in references: `images/...` or `videos/...`.
    pub fn prefix(self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Video => "videos",
        }
    }
}

impl std::str::FromStr for AssetKind {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(AssetKind::Image),
            "video" => Ok(AssetKind::Video),
            other => Err(crate::error::CoreError::Validation(format!(
                "Unknown asset kind '{other}'. Must be 'image' or 'video'"
            ))),
        }
    }
}
