use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use super::{Record, build_record};
use crate::export::{Details, ExportDocument, Item, ItemState, Overview};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaLevel {
    Document,
    Account,
    Vault,
    Item,
}

impl fmt::Display for SchemaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchemaLevel::Document => "document",
            SchemaLevel::Account => "account",
            SchemaLevel::Vault => "vault",
            SchemaLevel::Item => "item",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed export: {level} is missing `{path}`")]
pub struct SchemaError {
    pub level: SchemaLevel,
    pub path: String,
}

impl SchemaError {
    fn missing(level: SchemaLevel, path: String) -> Self {
        Self { level, path }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkOptions {
    pub include_archived: bool,
}

/// Items left out by the inclusion policy, per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedItems {
    pub archived: usize,
    pub trashed: usize,
    pub unknown: usize,
}

impl SkippedItems {
    pub fn total(&self) -> usize {
        self.archived + self.trashed + self.unknown
    }
}

struct QualifiedItem<'a> {
    overview: &'a Overview,
    details: &'a Details,
}

/// Lazy record sequence over a validated document, in account, vault, item
/// order. Walk the document again to restart.
pub struct Records<'a> {
    items: std::vec::IntoIter<QualifiedItem<'a>>,
    skipped: SkippedItems,
}

impl Records<'_> {
    pub fn skipped(&self) -> SkippedItems {
        self.skipped
    }
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        self.items
            .next()
            .map(|item| build_record(item.overview, item.details))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

/// Validates the whole hierarchy up front so a structural error never
/// leaves partial output behind, then hands back the qualifying items.
pub fn walk(document: &ExportDocument, options: WalkOptions) -> Result<Records<'_>, SchemaError> {
    let accounts = document
        .accounts
        .as_deref()
        .ok_or_else(|| SchemaError::missing(SchemaLevel::Document, "accounts".to_string()))?;

    let mut items = Vec::new();
    let mut skipped = SkippedItems::default();

    for (a, account) in accounts.iter().enumerate() {
        let account_path = format!("accounts[{a}]");
        let vaults = account.vaults.as_deref().ok_or_else(|| {
            SchemaError::missing(SchemaLevel::Account, format!("{account_path}.vaults"))
        })?;

        debug!(
            account = account
                .attrs
                .as_ref()
                .and_then(|attrs| attrs.account_name.as_deref())
                .unwrap_or(""),
            vaults = vaults.len(),
            "walking account"
        );

        for (v, vault) in vaults.iter().enumerate() {
            let vault_path = format!("{account_path}.vaults[{v}]");
            let vault_items = vault.items.as_deref().ok_or_else(|| {
                SchemaError::missing(SchemaLevel::Vault, format!("{vault_path}.items"))
            })?;

            debug!(
                vault = vault
                    .attrs
                    .as_ref()
                    .and_then(|attrs| attrs.name.as_deref())
                    .unwrap_or(""),
                items = vault_items.len(),
                "walking vault"
            );

            for (i, item) in vault_items.iter().enumerate() {
                let item_path = format!("{vault_path}.items[{i}]");
                let qualified = qualify(item, &item_path)?;

                if includes(item.state, options, &mut skipped) {
                    items.push(qualified);
                } else if item.state == ItemState::Unknown {
                    warn!(
                        item = item.uuid.as_deref().unwrap_or(&item_path),
                        "skipping item with unrecognized state"
                    );
                }
            }
        }
    }

    Ok(Records {
        items: items.into_iter(),
        skipped,
    })
}

fn qualify<'a>(item: &'a Item, item_path: &str) -> Result<QualifiedItem<'a>, SchemaError> {
    let overview = item.overview.as_ref().ok_or_else(|| {
        SchemaError::missing(SchemaLevel::Item, format!("{item_path}.overview"))
    })?;
    let details = item.details.as_ref().ok_or_else(|| {
        SchemaError::missing(SchemaLevel::Item, format!("{item_path}.details"))
    })?;
    Ok(QualifiedItem { overview, details })
}

/// Active items always qualify, archived ones only on request. Trashed and
/// unrecognized states never do.
fn includes(state: ItemState, options: WalkOptions, skipped: &mut SkippedItems) -> bool {
    match state {
        ItemState::Active => true,
        ItemState::Archived if options.include_archived => true,
        ItemState::Archived => {
            skipped.archived += 1;
            false
        }
        ItemState::Trashed => {
            skipped.trashed += 1;
            false
        }
        ItemState::Unknown => {
            skipped.unknown += 1;
            false
        }
    }
}
