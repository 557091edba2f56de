//! Spreadsheet attachment for a submission.
//!
//! The layout is one fully quoted row per response, followed by plain
//! `label,value` blocks for the summary, the free-text feedback and the
//! archived image URLs. No cell ever spans more than one physical line.

use crate::domain::{
    catalog::category_title,
    review::ArtworkResponse,
    shared::timestamp::to_iso_string,
    submission::{Submission, SubmissionError},
};
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use lazy_static::lazy_static;
use regex::Regex;
use std::io::Write;

lazy_static! {
    static ref LINE_BREAK: Regex = Regex::new(r"\r\n|\r|\n").unwrap();
}

pub const HEADER: [&str; 5] = ["Category", "Image ID", "Rating", "Comment", "Timestamp"];

/// Replaces every line break with a single space.
pub fn flatten(text: &str) -> String {
    LINE_BREAK.replace_all(text, " ").into_owned()
}

pub fn render_csv(submission: &Submission, image_urls: &[String]) -> Result<String, SubmissionError> {
    let mut out = Vec::new();

    let mut rows: Vec<(&'static str, &str, &ArtworkResponse)> = submission
        .responses
        .iter()
        .map(|(id, response)| (category_title(id), id.as_str(), response))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(b.1)));

    {
        let mut header = section_writer(&mut out, QuoteStyle::Necessary);
        header.write_record(HEADER)?;
        header.flush().map_err(csv::Error::from)?;
    }
    {
        let mut body = section_writer(&mut out, QuoteStyle::Always);
        for (category, id, response) in rows {
            let comment = flatten(response.comment.as_deref().unwrap_or_default());
            let timestamp = response
                .timestamp
                .as_ref()
                .map(to_iso_string)
                .unwrap_or_default();
            body.write_record([
                category,
                id,
                response.rating.as_str(),
                comment.as_str(),
                timestamp.as_str(),
            ])?;
        }
        body.flush().map_err(csv::Error::from)?;
    }

    let tally = submission.responses.tally();
    out.write_all(b"\n\n--- SUMMARY ---\n").map_err(csv::Error::from)?;
    let summary = [
        ("Reviewer", flatten(&submission.reviewer_name)),
        ("Submitted", to_iso_string(&submission.submitted_at)),
        (
            "Total Responses",
            submission.responses.reviewed_count().to_string(),
        ),
        ("Thumbs Up (Yes)", tally.yes.to_string()),
        ("Maybe", tally.maybe.to_string()),
        ("Thumbs Down (No)", tally.no.to_string()),
    ];
    {
        let mut block = section_writer(&mut out, QuoteStyle::Necessary);
        for (label, value) in &summary {
            block.write_record([*label, value.as_str()])?;
        }
        block.flush().map_err(csv::Error::from)?;
    }

    if let Some(feedback) = submission.feedback() {
        out.write_all(b"\n\n--- ADDITIONAL FEEDBACK ---\n")
            .map_err(csv::Error::from)?;
        let mut block = section_writer(&mut out, QuoteStyle::Always);
        block.write_record([flatten(feedback)])?;
        block.flush().map_err(csv::Error::from)?;
    }

    if !image_urls.is_empty() {
        out.write_all(b"\n\n--- UPLOADED REFERENCE IMAGES ---\n")
            .map_err(csv::Error::from)?;
        let mut block = section_writer(&mut out, QuoteStyle::Necessary);
        for (index, url) in image_urls.iter().enumerate() {
            block.write_record([format!("Image {}", index + 1).as_str(), url.as_str()])?;
        }
        block.flush().map_err(csv::Error::from)?;
    }

    String::from_utf8(out)
        .map_err(|e| SubmissionError::UnexpectedFailure(format!("CSV is not UTF-8: {}", e)))
}

/// Each block has a fixed quoting style and column count.
fn section_writer(out: &mut Vec<u8>, style: QuoteStyle) -> Writer<&mut Vec<u8>> {
    WriterBuilder::new()
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out)
}
