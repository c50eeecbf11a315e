use std::fmt;

use tracing::debug;

use crate::catalog::{ProductSnapshot, ProductVariant};
use crate::core::formatter::format_variants;

/// Category of the first buyer-visible difference found between snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    VariantCount,
    OptionCount,
    OptionName,
    OptionValuesCount,
    OptionValue,
    VariantOptions,
    VariantTitle,
    Error,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::VariantCount => "variant_count",
            ChangeKind::OptionCount => "option_count",
            ChangeKind::OptionName => "option_name",
            ChangeKind::OptionValuesCount => "option_values_count",
            ChangeKind::OptionValue => "option_value",
            ChangeKind::VariantOptions => "variant_options",
            ChangeKind::VariantTitle => "variant_title",
            ChangeKind::Error => "error",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of comparing two snapshots of the same product.
///
/// `old_summary` and `new_summary` carry the rendered variant summaries of
/// each side for logging; `detail` describes the first difference found.
#[derive(Debug, Clone)]
pub struct ChangeReport {
    pub has_changes: bool,
    pub kind: Option<ChangeKind>,
    pub detail: String,
    pub old_summary: String,
    pub new_summary: String,
}

/// Decide whether the buyer-visible variant surface changed between two
/// snapshots of the same product.
///
/// Differences are checked in a fixed precedence order (variant count,
/// option count, option names, option values, variant slots, variant
/// titles), short-circuiting on the first hit so the report is
/// deterministic even when several differences exist at once. All
/// comparisons are positional: options and variants are paired by list
/// index, not matched by name or id, so a mid-list insertion reports as
/// pervasive change.
///
/// Fails open: with no old snapshot to compare against, the report claims
/// a change of kind `error`. An unnecessary re-render is harmless; a missed
/// change leaves stale copy live.
pub fn compare_snapshots(old: Option<&ProductSnapshot>, new: &ProductSnapshot) -> ChangeReport {
    let new_summary = format_variants(&new.variants, &new.options);
    let old_summary = old
        .map(|snapshot| format_variants(&snapshot.variants, &snapshot.options))
        .unwrap_or_default();

    let (has_changes, kind, detail) = match old {
        Some(old) => match find_first_change(old, new) {
            Some((kind, detail)) => (true, Some(kind), detail),
            None => (false, None, String::new()),
        },
        None => (
            true,
            Some(ChangeKind::Error),
            "no stored snapshot to compare against".to_string(),
        ),
    };

    if let Some(kind) = kind {
        debug!("Snapshot comparison hit {}: {}", kind, detail);
    }

    ChangeReport {
        has_changes,
        kind,
        detail,
        old_summary,
        new_summary,
    }
}

fn find_first_change(old: &ProductSnapshot, new: &ProductSnapshot) -> Option<(ChangeKind, String)> {
    if old.variants.len() != new.variants.len() {
        return Some((
            ChangeKind::VariantCount,
            format!(
                "variant count changed from {} to {}",
                old.variants.len(),
                new.variants.len()
            ),
        ));
    }

    if old.options.len() != new.options.len() {
        return Some((
            ChangeKind::OptionCount,
            format!(
                "option count changed from {} to {}",
                old.options.len(),
                new.options.len()
            ),
        ));
    }

    for (index, (old_option, new_option)) in old.options.iter().zip(&new.options).enumerate() {
        if old_option.name != new_option.name {
            return Some((
                ChangeKind::OptionName,
                format!(
                    "option {} renamed from \"{}\" to \"{}\"",
                    index + 1,
                    old_option.name,
                    new_option.name
                ),
            ));
        }
    }

    for (old_option, new_option) in old.options.iter().zip(&new.options) {
        if old_option.values.len() != new_option.values.len() {
            return Some((
                ChangeKind::OptionValuesCount,
                format!(
                    "option \"{}\" value count changed from {} to {}",
                    new_option.name,
                    old_option.values.len(),
                    new_option.values.len()
                ),
            ));
        }

        for (old_value, new_value) in old_option.values.iter().zip(&new_option.values) {
            if old_value != new_value {
                return Some((
                    ChangeKind::OptionValue,
                    format!(
                        "option \"{}\" value changed from \"{}\" to \"{}\"",
                        new_option.name, old_value, new_value
                    ),
                ));
            }
        }
    }

    for (index, (old_variant, new_variant)) in old.variants.iter().zip(&new.variants).enumerate() {
        if slot_values(old_variant) != slot_values(new_variant) {
            return Some((
                ChangeKind::VariantOptions,
                format!(
                    "variant {} options changed from \"{}\" to \"{}\"",
                    index + 1,
                    slot_display(old_variant),
                    slot_display(new_variant)
                ),
            ));
        }

        if old_variant.title != new_variant.title {
            return Some((
                ChangeKind::VariantTitle,
                format!(
                    "variant {} title changed from \"{}\" to \"{}\"",
                    index + 1,
                    old_variant.title,
                    new_variant.title
                ),
            ));
        }
    }

    None
}

fn slot_values(variant: &ProductVariant) -> [Option<&str>; 3] {
    [
        variant.option1.as_deref(),
        variant.option2.as_deref(),
        variant.option3.as_deref(),
    ]
}

fn slot_display(variant: &ProductVariant) -> String {
    slot_values(variant)
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" / ")
}
