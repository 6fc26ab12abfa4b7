use serde::Deserialize;
use serde_json::Value;

/// Root of a 1PUX `export.data` document.
///
/// Required containers are kept as `Option` so the walker can report which
/// level of the hierarchy is missing instead of a bare serde error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportDocument {
    #[serde(default)]
    pub accounts: Option<Vec<Account>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub attrs: Option<AccountAttrs>,
    #[serde(default)]
    pub vaults: Option<Vec<Vault>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAttrs {
    #[serde(default)]
    pub account_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Vault {
    #[serde(default)]
    pub attrs: Option<VaultAttrs>,
    #[serde(default)]
    pub items: Option<Vec<Item>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VaultAttrs {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    #[default]
    Active,
    Archived,
    Trashed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub state: ItemState,
    #[serde(default)]
    pub overview: Option<Overview>,
    #[serde(default)]
    pub details: Option<Details>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Overview {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub urls: Vec<OverviewUrl>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An entry of `overview.urls`. Older exports store these as bare strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawOverviewUrl")]
pub struct OverviewUrl {
    pub label: String,
    pub url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOverviewUrl {
    Bare(String),
    Labeled {
        #[serde(default)]
        label: Option<String>,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<RawOverviewUrl> for OverviewUrl {
    fn from(raw: RawOverviewUrl) -> Self {
        match raw {
            RawOverviewUrl::Bare(url) => OverviewUrl {
                label: String::new(),
                url,
            },
            RawOverviewUrl::Labeled { label, url } => OverviewUrl {
                label: label.unwrap_or_default(),
                url: url.unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Details {
    #[serde(default)]
    pub notes_plain: Option<String>,
    #[serde(default)]
    pub login_fields: Vec<LoginField>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub password_history: Vec<CredentialHistoryEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Designation {
    Username,
    Password,
    Other,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginField {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
}

impl LoginField {
    pub fn designation(&self) -> Designation {
        match self.designation.as_deref() {
            Some("username") => Designation::Username,
            Some("password") => Designation::Password,
            _ => Designation::Other,
        }
    }

    pub fn value(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Vec<SectionField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionField {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub value: FieldValue,
}

impl SectionField {
    /// OTP fields are tagged `totp`, or carry 1Password's `TOTP_` id prefix.
    pub fn is_otp(&self) -> bool {
        matches!(self.value, FieldValue::Totp(_))
            || self
                .id
                .as_deref()
                .is_some_and(|id| id.starts_with("TOTP_"))
    }
}

/// Typed payload of a section field. The JSON form is a single-key object
/// whose key is the type tag, e.g. `{"concealed": "hunter2"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum FieldValue {
    Concealed(String),
    String(String),
    Address(Address),
    Menu(String),
    Totp(String),
    SsoLogin(SsoLogin),
    Other { kind: String, payload: Value },
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Other {
            kind: String::new(),
            payload: Value::Null,
        }
    }
}

impl FieldValue {
    pub fn kind(&self) -> &str {
        match self {
            FieldValue::Concealed(_) => "concealed",
            FieldValue::String(_) => "string",
            FieldValue::Address(_) => "address",
            FieldValue::Menu(_) => "menu",
            FieldValue::Totp(_) => "totp",
            FieldValue::SsoLogin(_) => "ssoLogin",
            FieldValue::Other { kind, .. } => kind,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        let map = match value {
            Value::String(s) => return FieldValue::String(s),
            Value::Object(map) if map.len() == 1 => map,
            other => {
                return FieldValue::Other {
                    kind: String::new(),
                    payload: other,
                };
            }
        };

        let Some((kind, payload)) = map.into_iter().next() else {
            return FieldValue::default();
        };

        let typed = match (kind.as_str(), &payload) {
            ("concealed", Value::String(s)) => Some(FieldValue::Concealed(s.clone())),
            ("string", Value::String(s)) => Some(FieldValue::String(s.clone())),
            ("menu", Value::String(s)) => Some(FieldValue::Menu(s.clone())),
            ("totp" | "otp", Value::String(s)) => Some(FieldValue::Totp(s.clone())),
            ("address", Value::Object(_)) => serde_json::from_value(payload.clone())
                .ok()
                .map(FieldValue::Address),
            ("ssoLogin", Value::Object(_)) => serde_json::from_value(payload.clone())
                .ok()
                .map(FieldValue::SsoLogin),
            _ => None,
        };

        typed.unwrap_or(FieldValue::Other { kind, payload })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SsoLogin {
    #[serde(default)]
    pub provider: Option<String>,
}

/// Only the number of history entries ends up in the output.
#[derive(Debug, Clone, Default, Deserialize)]
#[allow(dead_code)]
pub struct CredentialHistoryEntry {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
}
