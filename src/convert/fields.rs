use crate::export::{Designation, Details, LoginField, Overview};

/// The four columns pulled straight out of an item, plus which source
/// entries they consumed so the rest can be demoted into the notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimaryFields {
    pub title: String,
    pub url: String,
    pub username: String,
    pub password: String,
    pub claimed: Claimed,
}

/// Indexes into `overview.urls` and `details.loginFields`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Claimed {
    pub url: Option<usize>,
    pub username: Option<usize>,
    pub password: Option<usize>,
}

impl Claimed {
    pub fn is_login_field_claimed(&self, index: usize) -> bool {
        self.username == Some(index) || self.password == Some(index)
    }
}

pub fn extract_primary_fields(overview: &Overview, details: &Details) -> PrimaryFields {
    let (url, url_index) = primary_url(overview);
    let username = first_designated(&details.login_fields, Designation::Username);
    let password = first_designated(&details.login_fields, Designation::Password);

    PrimaryFields {
        title: overview.title.clone().unwrap_or_default(),
        url,
        username: login_value(&details.login_fields, username),
        password: login_value(&details.login_fields, password),
        claimed: Claimed {
            url: url_index,
            username,
            password,
        },
    }
}

/// `overview.url`, else the first non-empty entry of `overview.urls`.
fn primary_url(overview: &Overview) -> (String, Option<usize>) {
    if let Some(url) = overview.url.as_deref().filter(|u| !u.is_empty()) {
        let index = overview.urls.iter().position(|entry| entry.url == url);
        return (url.to_string(), index);
    }

    match overview.urls.iter().position(|entry| !entry.url.is_empty()) {
        Some(index) => (overview.urls[index].url.clone(), Some(index)),
        None => (String::new(), None),
    }
}

fn first_designated(fields: &[LoginField], designation: Designation) -> Option<usize> {
    fields
        .iter()
        .position(|field| field.designation() == designation)
}

fn login_value(fields: &[LoginField], index: Option<usize>) -> String {
    index
        .and_then(|i| fields.get(i))
        .map(|field| field.value().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(overview: serde_json::Value, details: serde_json::Value) -> PrimaryFields {
        let overview: Overview = serde_json::from_value(overview).unwrap();
        let details: Details = serde_json::from_value(details).unwrap();
        extract_primary_fields(&overview, &details)
    }

    #[test]
    fn extracts_all_primary_fields() {
        let fields = extract(
            json!({"title": "Example Site", "url": "https://example.com"}),
            json!({"loginFields": [
                {"designation": "username", "value": "bob"},
                {"designation": "password", "value": "secret1"}
            ]}),
        );

        assert_eq!(fields.title, "Example Site");
        assert_eq!(fields.url, "https://example.com");
        assert_eq!(fields.username, "bob");
        assert_eq!(fields.password, "secret1");
        assert_eq!(fields.claimed.username, Some(0));
        assert_eq!(fields.claimed.password, Some(1));
    }

    #[test]
    fn missing_fields_degrade_to_empty_strings() {
        let fields = extract(json!({}), json!({}));
        assert_eq!(fields, PrimaryFields::default());
    }

    #[test]
    fn url_falls_back_to_first_non_empty_url_entry() {
        let fields = extract(
            json!({"url": "", "urls": [{"url": ""}, {"label": "site", "url": "https://b.example"}]}),
            json!({}),
        );
        assert_eq!(fields.url, "https://b.example");
        assert_eq!(fields.claimed.url, Some(1));
    }

    #[test]
    fn primary_url_claims_matching_url_entry() {
        let fields = extract(
            json!({"url": "https://b.example", "urls": [
                {"url": "https://a.example"},
                {"url": "https://b.example"}
            ]}),
            json!({}),
        );
        assert_eq!(fields.url, "https://b.example");
        assert_eq!(fields.claimed.url, Some(1));
    }

    #[test]
    fn first_designated_login_field_wins() {
        let fields = extract(
            json!({}),
            json!({"loginFields": [
                {"designation": "", "name": "remember", "value": "✓"},
                {"designation": "username", "value": "first"},
                {"designation": "username", "value": "second"}
            ]}),
        );
        assert_eq!(fields.username, "first");
        assert_eq!(fields.claimed.username, Some(1));
        assert!(fields.claimed.is_login_field_claimed(1));
        assert!(!fields.claimed.is_login_field_claimed(2));
    }
}
