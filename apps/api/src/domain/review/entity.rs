use super::rating::{Rating, deserialize_rating};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// Rating, comment and last-modified time for one artwork.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ArtworkResponse {
    #[serde(
        default,
        deserialize_with = "deserialize_rating",
        skip_serializing_if = "Rating::is_unrated"
    )]
    pub rating: Rating,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ArtworkResponse {
    /// The comment, if it has any non-whitespace content.
    pub fn comment_text(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|comment| !comment.is_empty())
    }

    /// An entry with neither rating nor comment counts as not yet reviewed.
    pub fn is_reviewed(&self) -> bool {
        self.rating.is_rated() || self.comment_text().is_some()
    }
}

/// Yes/maybe/no counts over a set of responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingTally {
    pub yes: usize,
    pub maybe: usize,
    pub no: usize,
}

impl RatingTally {
    pub fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Yes => self.yes += 1,
            Rating::Maybe => self.maybe += 1,
            Rating::No => self.no += 1,
            Rating::Unrated => {}
        }
    }

    pub fn rated(&self) -> usize {
        self.yes + self.maybe + self.no
    }
}

impl<'a> FromIterator<&'a ArtworkResponse> for RatingTally {
    fn from_iter<I: IntoIterator<Item = &'a ArtworkResponse>>(iter: I) -> Self {
        let mut tally = Self::default();
        for response in iter {
            tally.record(response.rating);
        }
        tally
    }
}

/// All responses of one reviewing session, keyed by artwork id.
///
/// Keys are kept sorted so serialized output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseCollection(BTreeMap<String, ArtworkResponse>);

impl ResponseCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rating for an artwork. An existing comment survives unless a
    /// replacement is given.
    pub fn record_rating(
        &mut self,
        artwork_id: &str,
        rating: Rating,
        comment: Option<String>,
        at: DateTime<Utc>,
    ) {
        let entry = self.0.entry(artwork_id.to_string()).or_default();
        entry.rating = rating;
        if comment.is_some() {
            entry.comment = comment;
        }
        entry.timestamp = Some(at);
    }

    /// Sets the comment for an artwork, keeping its rating.
    pub fn record_comment(&mut self, artwork_id: &str, comment: String, at: DateTime<Utc>) {
        let entry = self.0.entry(artwork_id.to_string()).or_default();
        entry.comment = Some(comment);
        entry.timestamp = Some(at);
    }

    pub fn get(&self, artwork_id: &str) -> Option<&ArtworkResponse> {
        self.0.get(artwork_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArtworkResponse)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn into_entries(self) -> BTreeMap<String, ArtworkResponse> {
        self.0
    }

    /// Number of entries that carry a rating or a comment.
    pub fn reviewed_count(&self) -> usize {
        self.0.values().filter(|response| response.is_reviewed()).count()
    }

    pub fn tally(&self) -> RatingTally {
        self.0.values().collect()
    }
}

impl From<BTreeMap<String, ArtworkResponse>> for ResponseCollection {
    fn from(entries: BTreeMap<String, ArtworkResponse>) -> Self {
        Self(entries)
    }
}

impl FromIterator<(String, ArtworkResponse)> for ResponseCollection {
    fn from_iter<I: IntoIterator<Item = (String, ArtworkResponse)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
