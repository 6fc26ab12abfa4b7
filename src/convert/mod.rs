mod fields;
mod format;
mod notes;
mod otp;
mod walker;

pub use walker::{SchemaError, SkippedItems, WalkOptions, walk};

use crate::export::{Details, Overview};
use serde::Serialize;

/// One output row. Field order is the CSV column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password: String,
    #[serde(rename = "Notes")]
    pub notes: String,
    #[serde(rename = "OTPAuth")]
    pub otp_auth: String,
}

pub fn build_record(overview: &Overview, details: &Details) -> Record {
    let primary = fields::extract_primary_fields(overview, details);
    let otp = otp::resolve_otp(&details.sections, &primary.title);
    let notes = notes::compose_notes(
        overview,
        details,
        &primary.claimed,
        otp.as_ref().map(|resolved| resolved.claim),
    );

    Record {
        title: primary.title,
        url: primary.url,
        username: primary.username,
        password: primary.password,
        notes,
        otp_auth: otp.map(|resolved| resolved.uri).unwrap_or_default(),
    }
}
