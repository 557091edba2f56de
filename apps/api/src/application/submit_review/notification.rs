use crate::domain::{
    catalog::category_title,
    review::{RatingTally, ResponseCollection},
    shared::timestamp::{to_display_string, to_iso_string},
    submission::{Submission, SubmissionError},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "notification.html";

#[derive(Debug, Serialize)]
struct CommentedItem<'a> {
    artwork_id: &'a str,
    rating: &'static str,
    comment: &'a str,
}

#[derive(Debug, Default, Serialize)]
struct CategorySection<'a> {
    title: &'static str,
    tally: RatingTally,
    commented: Vec<CommentedItem<'a>>,
}

#[derive(Serialize)]
struct NotificationView<'a> {
    reviewer_name: &'a str,
    reviewer_email: Option<&'a str>,
    submitted_at: String,
    total_responses: usize,
    tally: RatingTally,
    categories: Vec<CategorySection<'a>>,
    feedback: Option<&'a str>,
    image_urls: &'a [String],
    received_at: String,
}

/// Renders the HTML body of the notification e-mail.
///
/// All reviewer-supplied text is HTML-escaped by the template engine.
pub struct NotificationRenderer {
    tera: Tera,
}

impl NotificationRenderer {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(
            TEMPLATE_NAME,
            include_str!("../../../templates/notification.html"),
        )?;
        Ok(Self { tera })
    }

    pub fn render(
        &self,
        submission: &Submission,
        image_urls: &[String],
        received_at: DateTime<Utc>,
    ) -> Result<String, SubmissionError> {
        let view = NotificationView {
            reviewer_name: &submission.reviewer_name,
            reviewer_email: submission.reviewer_email.as_deref(),
            submitted_at: to_display_string(&submission.submitted_at),
            total_responses: submission.responses.reviewed_count(),
            tally: submission.responses.tally(),
            categories: category_sections(&submission.responses),
            feedback: submission.feedback(),
            image_urls,
            received_at: to_iso_string(&received_at),
        };
        let context = Context::from_serialize(&view)?;
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}

/// Groups reviewed entries by category title, sorted by title. Only entries
/// with a comment are listed individually.
fn category_sections(responses: &ResponseCollection) -> Vec<CategorySection<'_>> {
    let mut sections: BTreeMap<&'static str, CategorySection<'_>> = BTreeMap::new();

    for (id, response) in responses.iter().filter(|(_, r)| r.is_reviewed()) {
        let title = category_title(id);
        let section = sections.entry(title).or_insert_with(|| CategorySection {
            title,
            ..Default::default()
        });
        section.tally.record(response.rating);
        if let Some(comment) = response.comment_text() {
            section.commented.push(CommentedItem {
                artwork_id: id,
                rating: response.rating.as_str(),
                comment,
            });
        }
    }

    sections.into_values().collect()
}
