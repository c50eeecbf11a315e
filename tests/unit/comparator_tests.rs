use varsync::catalog::{ProductOption, ProductSnapshot, ProductVariant};
use varsync::core::comparator::{ChangeKind, compare_snapshots};

fn option(name: &str, values: &[&str]) -> ProductOption {
    ProductOption {
        name: name.to_string(),
        values: values.iter().map(|v| v.to_string()).collect(),
    }
}

fn variant(id: i64, title: &str, slots: &[&str]) -> ProductVariant {
    let slot = |index: usize| slots.get(index).map(|v| v.to_string());
    ProductVariant {
        id,
        title: title.to_string(),
        option1: slot(0),
        option2: slot(1),
        option3: slot(2),
        sku: None,
        price: None,
        inventory_quantity: None,
    }
}

fn snapshot(options: Vec<ProductOption>, variants: Vec<ProductVariant>) -> ProductSnapshot {
    ProductSnapshot {
        id: 42,
        title: "Widget".to_string(),
        options,
        variants,
        body_html: None,
    }
}

#[test]
fn test_identical_snapshots_report_no_changes() {
    let current = snapshot(
        vec![option("Size", &["Small", "Medium"])],
        vec![
            variant(1, "Small", &["Small"]),
            variant(2, "Medium", &["Medium"]),
        ],
    );

    let report = compare_snapshots(Some(&current), &current);

    assert!(!report.has_changes);
    assert_eq!(report.kind, None);
    assert!(report.detail.is_empty());
}

#[test]
fn test_variant_count_change() {
    let old = snapshot(vec![], vec![variant(1, "A", &[]), variant(2, "B", &[])]);
    let new = snapshot(
        vec![],
        vec![
            variant(1, "A", &[]),
            variant(2, "B", &[]),
            variant(3, "C", &[]),
        ],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert!(report.has_changes);
    assert_eq!(report.kind, Some(ChangeKind::VariantCount));
    assert_eq!(report.kind.map(|k| k.as_str()), Some("variant_count"));
}

#[test]
fn test_variant_count_takes_precedence() {
    // Option name differs too, but the variant count check fires first.
    let old = snapshot(
        vec![option("Size", &["Small"])],
        vec![variant(1, "Small", &["Small"])],
    );
    let new = snapshot(
        vec![option("Fit", &["Small"])],
        vec![
            variant(1, "Small", &["Small"]),
            variant(2, "Large", &["Large"]),
        ],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert_eq!(report.kind, Some(ChangeKind::VariantCount));
}

#[test]
fn test_option_count_change() {
    let old = snapshot(
        vec![option("Size", &["Small"])],
        vec![variant(1, "Small", &["Small"])],
    );
    let new = snapshot(
        vec![option("Size", &["Small"]), option("Material", &["Gold"])],
        vec![variant(1, "Small / Gold", &["Small", "Gold"])],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert_eq!(report.kind, Some(ChangeKind::OptionCount));
}

#[test]
fn test_option_rename() {
    let old = snapshot(
        vec![option("Size", &["Small"])],
        vec![variant(1, "Small", &["Small"])],
    );
    let new = snapshot(
        vec![option("Fit", &["Small"])],
        vec![variant(1, "Small", &["Small"])],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert_eq!(report.kind, Some(ChangeKind::OptionName));
    assert!(report.detail.contains("Size"));
    assert!(report.detail.contains("Fit"));
}

#[test]
fn test_option_names_checked_before_values() {
    // First option's values differ, second option is renamed: the name pass
    // runs over all options before any value is compared.
    let old = snapshot(
        vec![option("Size", &["Small"]), option("Color", &["Red"])],
        vec![variant(1, "Small / Red", &["Small", "Red"])],
    );
    let new = snapshot(
        vec![option("Size", &["Medium"]), option("Colour", &["Red"])],
        vec![variant(1, "Small / Red", &["Small", "Red"])],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert_eq!(report.kind, Some(ChangeKind::OptionName));
}

#[test]
fn test_option_value_count_change() {
    let old = snapshot(
        vec![option("Size", &["Small"])],
        vec![variant(1, "Small", &["Small"])],
    );
    let new = snapshot(
        vec![option("Size", &["Small", "Large"])],
        vec![variant(1, "Small", &["Small"])],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert_eq!(report.kind, Some(ChangeKind::OptionValuesCount));
}

#[test]
fn test_option_value_change() {
    let old = snapshot(
        vec![option("Material", &["Gold"])],
        vec![variant(1, "Gold", &["Gold"])],
    );
    let new = snapshot(
        vec![option("Material", &["Platinum"])],
        vec![variant(1, "Gold", &["Gold"])],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert!(report.has_changes);
    assert_eq!(report.kind, Some(ChangeKind::OptionValue));
    assert!(report.detail.contains("Gold"));
    assert!(report.detail.contains("Platinum"));
}

#[test]
fn test_variant_slot_change() {
    let old = snapshot(
        vec![option("Material", &["Gold", "Silver"])],
        vec![variant(1, "Ring", &["Gold"])],
    );
    let new = snapshot(
        vec![option("Material", &["Gold", "Silver"])],
        vec![variant(1, "Ring", &["Silver"])],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert_eq!(report.kind, Some(ChangeKind::VariantOptions));
}

#[test]
fn test_variant_title_change() {
    // Slots agree, only the display title moved.
    let old = snapshot(
        vec![option("Size", &["Small"])],
        vec![variant(1, "Small", &["Small"])],
    );
    let new = snapshot(
        vec![option("Size", &["Small"])],
        vec![variant(1, "Small (classic)", &["Small"])],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert_eq!(report.kind, Some(ChangeKind::VariantTitle));
}

#[test]
fn test_missing_old_snapshot_fails_open() {
    let new = snapshot(vec![], vec![variant(1, "A", &[])]);

    let report = compare_snapshots(None, &new);

    assert!(report.has_changes);
    assert_eq!(report.kind, Some(ChangeKind::Error));
}

#[test]
fn test_has_changes_agrees_in_both_directions() {
    let a = snapshot(
        vec![option("Size", &["Small"])],
        vec![variant(1, "Small", &["Small"])],
    );
    let b = snapshot(
        vec![option("Size", &["Large"])],
        vec![variant(1, "Large", &["Large"])],
    );

    let forward = compare_snapshots(Some(&a), &b);
    let backward = compare_snapshots(Some(&b), &a);

    assert_eq!(forward.has_changes, backward.has_changes);
    assert!(forward.has_changes);
}

#[test]
fn test_report_carries_both_summaries() {
    let old = snapshot(
        vec![option("Size", &["Small"])],
        vec![variant(1, "Small", &["Small"])],
    );
    let new = snapshot(
        vec![option("Size", &["Large"])],
        vec![variant(1, "Large", &["Large"])],
    );

    let report = compare_snapshots(Some(&old), &new);

    assert_eq!(report.old_summary, "Size: Small");
    assert_eq!(report.new_summary, "Size: Large");
}
