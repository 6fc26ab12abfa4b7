//! Folding everything the flat record cannot hold into the `Notes` column.
//!
//! Blocks appear in a fixed order and are joined by [`NOTES_DELIMITER`].
//! Empty blocks are dropped, so the delimiter never leads, trails, or
//! repeats.

use super::fields::Claimed;
use super::format::format_field_value;
use super::otp::{OtpClaim, otp_payload};
use crate::export::{Designation, Details, LoginField, Overview, Section, SectionField};
use tracing::debug;

pub const NOTES_DELIMITER: &str = "---";

const OTP_PRESENT: &str = "OTP field present";

pub fn compose_notes(
    overview: &Overview,
    details: &Details,
    claimed: &Claimed,
    otp: Option<OtpClaim>,
) -> String {
    let blocks = [
        free_text(details),
        tags(overview),
        other_login_fields(&details.login_fields, claimed),
        section_fields(&details.sections, otp),
        additional_urls(overview, claimed),
        history(details),
    ];

    blocks
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(NOTES_DELIMITER)
}

fn free_text(details: &Details) -> Option<String> {
    details
        .notes_plain
        .as_deref()
        .filter(|notes| !notes.trim().is_empty())
        .map(str::to_string)
}

fn tags(overview: &Overview) -> Option<String> {
    let tags: Vec<&str> = overview
        .tags
        .iter()
        .map(String::as_str)
        .filter(|tag| !tag.is_empty())
        .collect();
    join_lines(tags, ", ")
}

fn other_login_fields(fields: &[LoginField], claimed: &Claimed) -> Option<String> {
    let lines: Vec<String> = fields
        .iter()
        .enumerate()
        .filter(|(index, _)| !claimed.is_login_field_claimed(*index))
        .filter(|(_, field)| !field.value().is_empty())
        .map(|(_, field)| labeled(&login_field_label(field), field.value()))
        .collect();
    join_lines(lines, "\n")
}

/// `name`, else the designation, else the field id.
fn login_field_label(field: &LoginField) -> String {
    let designation = match field.designation() {
        Designation::Username => Some("username"),
        Designation::Password => Some("password"),
        Designation::Other => field.designation.as_deref(),
    };

    [field.name.as_deref(), designation, field.id.as_deref()]
        .into_iter()
        .flatten()
        .find(|label| !label.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn section_fields(sections: &[Section], otp: Option<OtpClaim>) -> Option<String> {
    let mut lines = Vec::new();

    for (s, section) in sections.iter().enumerate() {
        for (f, field) in section.fields.iter().enumerate() {
            if otp == Some(OtpClaim { section: s, field: f }) {
                continue;
            }

            let Some(rendered) = render_section_field(field) else {
                debug!(
                    kind = field.value.kind(),
                    "section field has no displayable value"
                );
                continue;
            };

            lines.push(labeled(&section_field_label(section, field), &rendered));
        }
    }

    join_lines(lines, "\n")
}

fn render_section_field(field: &SectionField) -> Option<String> {
    if field.is_otp() {
        return Some(
            otp_payload(field)
                .unwrap_or(OTP_PRESENT)
                .to_string(),
        );
    }
    format_field_value(&field.value)
}

fn section_field_label(section: &Section, field: &SectionField) -> String {
    let section_title = section.title.as_deref().unwrap_or("");
    let field_title = field.title.as_deref().unwrap_or("");

    match (section_title.is_empty(), field_title.is_empty()) {
        (false, false) => format!("{section_title} - {field_title}"),
        (_, false) => field_title.to_string(),
        (_, true) => String::new(),
    }
}

fn additional_urls(overview: &Overview, claimed: &Claimed) -> Option<String> {
    let lines: Vec<String> = overview
        .urls
        .iter()
        .enumerate()
        .filter(|(index, _)| claimed.url != Some(*index))
        .filter(|(_, entry)| !entry.url.is_empty())
        .map(|(_, entry)| labeled(&entry.label, &entry.url))
        .collect();
    join_lines(lines, "\n")
}

fn history(details: &Details) -> Option<String> {
    match details.password_history.len() {
        0 => None,
        1 => Some("Password history: 1 entry".to_string()),
        n => Some(format!("Password history: {n} entries")),
    }
}

fn labeled(label: &str, value: &str) -> String {
    if label.is_empty() {
        value.to_string()
    } else {
        format!("{label}: {value}")
    }
}

fn join_lines<S: AsRef<str>>(lines: Vec<S>, separator: &str) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    Some(
        lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(separator),
    )
}
