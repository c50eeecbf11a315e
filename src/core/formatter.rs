use crate::catalog::{ProductOption, ProductVariant};

/// Summary used when a product has no meaningful variant information.
pub const STANDARD_SUMMARY: &str = "Standard";

/// Render the canonical variant summary for a product.
///
/// Each variant becomes a comma-joined list of `"OptionName: value"` pairs,
/// read positionally against the declared options; variants are joined with
/// `"; "`. The result is a pure function of its inputs: identical variants
/// and options always produce byte-identical output.
pub fn format_variants(variants: &[ProductVariant], options: &[ProductOption]) -> String {
    if variants.is_empty() {
        return STANDARD_SUMMARY.to_string();
    }

    variants
        .iter()
        .map(|variant| format_single_variant(variant, options))
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_single_variant(variant: &ProductVariant, options: &[ProductOption]) -> String {
    let mut pairs = Vec::new();

    for (index, option) in options.iter().enumerate() {
        // Slots without a value are skipped entirely, never rendered as "Name: ".
        if let Some(value) = variant.option_value(index) {
            let value = value.trim();
            if !value.is_empty() {
                pairs.push(format!("{}: {}", option.name, value));
            }
        }
    }

    if pairs.is_empty() {
        let title = variant.title.trim();
        if title.is_empty() {
            return STANDARD_SUMMARY.to_string();
        }
        return title.to_string();
    }

    pairs.join(", ")
}
