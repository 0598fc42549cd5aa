//! # Owner Audit
//!
//! Checks every owner descriptor in a catalog on its own, outside the item
//! contract: the `owner` of each collection record and the `authorData` of
//! each item, when present. Uses the same compiled owner schema that the
//! model, space and collection variants embed.

use serde::Serialize;
use serde_json::Value;

use crate::aggregate::collection_items;
use crate::diagnostic::Diagnostic;
use crate::validate::{ItemValidator, ValidationResult};

/// Which kind of descriptor a check was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum OwnerSite {
    /// `collections[i].owner`
    CollectionOwner,
    /// `collections[i].items[j].authorData`
    ItemAuthorData,
}

/// One checked descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCheck {
    /// Where the descriptor sits.
    pub site: OwnerSite,
    /// Path label used in diagnostics.
    pub path: String,
    /// The validation result.
    #[serde(flatten)]
    pub result: ValidationResult,
}

/// Totals over an owner audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerAuditSummary {
    /// Collection records in the input.
    pub total_collections: usize,
    /// Collection records carrying an `owner` key.
    pub collections_with_owner: usize,
    /// Items carrying an `authorData` key.
    pub items_with_author_data: usize,
    /// Collection owners that validated cleanly.
    pub valid_owners: usize,
    /// Item author descriptors that validated cleanly.
    pub valid_author_data: usize,
    /// Diagnostics across all checks.
    pub total_error_count: usize,
}

impl OwnerAuditSummary {
    /// Fold one check into the totals.
    pub fn record(mut self, check: &OwnerCheck) -> Self {
        let valid = check.result.is_valid;
        match check.site {
            OwnerSite::CollectionOwner => {
                self.collections_with_owner += 1;
                self.valid_owners += usize::from(valid);
            }
            OwnerSite::ItemAuthorData => {
                self.items_with_author_data += 1;
                self.valid_author_data += usize::from(valid);
            }
        }
        self.total_error_count += check.result.error_count();
        self
    }

    /// `true` when no descriptor produced a diagnostic.
    pub fn all_conform(&self) -> bool {
        self.total_error_count == 0
    }
}

/// Full result of an owner audit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OwnerAuditReport {
    /// Totals.
    pub summary: OwnerAuditSummary,
    /// Every check, in input order.
    pub checks: Vec<OwnerCheck>,
}

impl OwnerAuditReport {
    /// Every diagnostic, in input order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.checks.iter().flat_map(|c| c.result.diagnostics.iter())
    }
}

/// Audit every owner descriptor in `collections`.
pub fn audit_owners(validator: &ItemValidator<'_>, collections: &[Value]) -> OwnerAuditReport {
    let mut checks = Vec::new();

    for (index, collection) in collections.iter().enumerate() {
        if let Some(owner) = collection.get("owner") {
            let path = format!("collections[{index}].owner");
            checks.push(OwnerCheck {
                site: OwnerSite::CollectionOwner,
                result: validator.validate_owner(owner, &path),
                path,
            });
        }

        for (item_index, item) in collection_items(collection).into_iter().flatten().enumerate() {
            if let Some(author) = item.get("authorData") {
                let path = format!("collections[{index}].items[{item_index}].authorData");
                checks.push(OwnerCheck {
                    site: OwnerSite::ItemAuthorData,
                    result: validator.validate_owner(author, &path),
                    path,
                });
            }
        }
    }

    let summary = checks.iter().fold(
        OwnerAuditSummary {
            total_collections: collections.len(),
            ..OwnerAuditSummary::default()
        },
        OwnerAuditSummary::record,
    );

    tracing::info!(
        owners = summary.collections_with_owner,
        author_data = summary.items_with_author_data,
        errors = summary.total_error_count,
        "owner audit complete"
    );

    OwnerAuditReport { summary, checks }
}
