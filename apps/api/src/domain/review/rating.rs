use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

/// A reviewer's reaction to one artwork.
///
/// On the wire a rating is `"yes"`, `"maybe"` or `"no"`. A missing, `null`
/// or empty rating means the artwork has not been rated yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Rating {
    #[default]
    #[serde(rename = "")]
    Unrated,
    Yes,
    Maybe,
    No,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unrated => "",
            Self::Yes => "yes",
            Self::Maybe => "maybe",
            Self::No => "no",
        }
    }

    pub fn is_rated(&self) -> bool {
        !matches!(self, Self::Unrated)
    }

    pub fn is_unrated(&self) -> bool {
        matches!(self, Self::Unrated)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `null` as well as the string forms.
pub fn deserialize_rating<'de, D>(deserializer: D) -> Result<Rating, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Rating>::deserialize(deserializer)?.unwrap_or_default())
}
