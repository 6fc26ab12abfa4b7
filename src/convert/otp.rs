//! One-time-password lookup.
//!
//! The first OTP field of an item claims the `OTPAuth` column. Complete
//! `otpauth://` URIs are kept verbatim; bare base32 secrets are wrapped into
//! a key URI (<https://github.com/google/google-authenticator/wiki/Key-Uri-Format>)
//! with the RFC 6238 defaults below.

use crate::export::{FieldValue, Section, SectionField};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const DEFAULT_ALGORITHM: &str = "SHA1";
pub const DEFAULT_DIGITS: u32 = 6;
pub const DEFAULT_PERIOD: u32 = 30;

const OTPAUTH_SCHEME: &str = "otpauth://";

/// RFC 3986 unreserved characters stay as-is in the label.
const LABEL_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Position of the OTP field that owns the canonical slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpClaim {
    pub section: usize,
    pub field: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOtp {
    pub uri: String,
    pub claim: OtpClaim,
}

pub fn resolve_otp(sections: &[Section], title: &str) -> Option<ResolvedOtp> {
    sections.iter().enumerate().find_map(|(s, section)| {
        section.fields.iter().enumerate().find_map(|(f, field)| {
            let payload = otp_payload(field)?;
            Some(ResolvedOtp {
                uri: otpauth_uri(payload, title),
                claim: OtpClaim {
                    section: s,
                    field: f,
                },
            })
        })
    })
}

/// Raw secret or URI of an OTP field, if it has one.
pub fn otp_payload(field: &SectionField) -> Option<&str> {
    if !field.is_otp() {
        return None;
    }

    let raw = match &field.value {
        FieldValue::Totp(s) | FieldValue::String(s) | FieldValue::Concealed(s) => s.trim(),
        _ => return None,
    };

    if raw.is_empty() { None } else { Some(raw) }
}

pub fn otpauth_uri(payload: &str, title: &str) -> String {
    if is_otpauth_uri(payload) {
        return payload.to_string();
    }

    let secret: String = payload
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    let label = utf8_percent_encode(title, LABEL_ENCODE_SET);

    format!(
        "{OTPAUTH_SCHEME}totp/{label}?secret={secret}&algorithm={DEFAULT_ALGORITHM}&digits={DEFAULT_DIGITS}&period={DEFAULT_PERIOD}"
    )
}

fn is_otpauth_uri(payload: &str) -> bool {
    payload
        .get(..OTPAUTH_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(OTPAUTH_SCHEME))
}
