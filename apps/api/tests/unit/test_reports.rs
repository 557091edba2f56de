use art_review_api::{
    application::submit_review::{
        assembler::SubmissionAssembler, backup::render_backup, csv_report::render_csv,
    },
    domain::{
        review::{Rating, ResponseCollection},
        submission::Submission,
    },
};
use chrono::{TimeZone, Utc};

fn jane_doe() -> Submission {
    let at = Utc.with_ymd_and_hms(2025, 1, 15, 14, 30, 0).unwrap();
    let mut responses = ResponseCollection::new();
    responses.record_rating("surr-10", Rating::No, None, at);
    responses.record_rating(
        "impr-3",
        Rating::Yes,
        Some("Love the light,\nespecially \"dawn\"".into()),
        at,
    );

    Submission::try_from(
        SubmissionAssembler::new("Jane Doe")
            .responses(responses)
            .feedback("Great picks.\r\nMore colour please.")
            .build_at(at),
    )
    .expect("valid submission")
}

#[test]
fn csv_report_matches_expected_layout() {
    let csv = render_csv(&jane_doe(), &[]).expect("renders");
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "Category,Image ID,Rating,Comment,Timestamp");
    assert_eq!(
        lines[1],
        "\"Impressionist\",\"impr-3\",\"yes\",\"Love the light, especially \"\"dawn\"\"\",\"2025-01-15T14:30:00.000Z\""
    );
    assert!(lines[2].starts_with("\"Surrealism\",\"surr-10\",\"no\",\"\""));
    assert!(csv.contains("--- SUMMARY ---\nReviewer,Jane Doe\n"));
    assert!(csv.contains("Total Responses,2\n"));
    assert!(csv.contains("--- ADDITIONAL FEEDBACK ---\n\"Great picks. More colour please.\"\n"));
    assert!(!csv.contains("--- UPLOADED REFERENCE IMAGES ---"));
}

#[test]
fn backup_is_stable_for_identical_input() {
    let processed = Utc.with_ymd_and_hms(2025, 1, 15, 14, 31, 0).unwrap();
    let submission = jane_doe();
    assert_eq!(
        render_backup(&submission, &[], processed).unwrap(),
        render_backup(&submission.clone(), &[], processed).unwrap()
    );
}
