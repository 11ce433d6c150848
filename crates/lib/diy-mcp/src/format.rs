//! Markdown renderers for tool results.
//!
//! Writing into a `String` cannot fail, so `writeln!` results are discarded.

use std::fmt::Write;

use diy_core::products::{Availability, Compatibility, ShoppingLine, ShoppingList};
use diy_store::models::{CodeSection, Product, Scored, value_text};
use serde_json::Value;

const RESULT_DISPLAY_LIMIT: usize = 10;
const ALTERNATIVE_DISPLAY_LIMIT: usize = 5;
const SUMMARY_SPEC_LIMIT: usize = 3;

const CODES_DISCLAIMER: &str =
    "*Note: Always verify with local building department as jurisdictions may have amendments.*";
const PRICE_DISCLAIMER: &str =
    "*Prices and availability subject to change. Verify before purchasing.*";

pub(crate) fn code_results(results: &[Scored<CodeSection>]) -> String {
    if results.is_empty() {
        return "No relevant code sections found. This may be an uncommon scenario or outside \
                typical residential codes. Recommend consulting with a licensed professional."
            .to_string();
    }

    let mut out = String::from("**Relevant Building Codes:**\n\n");
    for (index, result) in results.iter().enumerate() {
        let section = &result.record;
        _ = writeln!(out, "**{}. {}** ({})", index + 1, section.title, section.code_ref);
        _ = writeln!(out, "   - **Summary:** {}", section.summary);
        _ = writeln!(
            out,
            "   - **Jurisdiction:** {}",
            section.jurisdiction.as_deref().unwrap_or("unspecified")
        );
        if let Some(source) = &section.source {
            _ = writeln!(out, "   - **Source:** {source}");
        }
        if let Some(notes) = &section.notes {
            _ = writeln!(out, "   - **Notes:** {notes}");
        }
        out.push('\n');
    }
    out.push('\n');
    out.push_str(CODES_DISCLAIMER);
    out
}

pub(crate) fn code_section(section: &CodeSection) -> String {
    let mut out = format!("**{}**\n\n", section.title);
    _ = writeln!(out, "**Reference:** {}", section.code_ref);
    _ = writeln!(out, "**Summary:** {}", section.summary);
    if let Some(full_text) = &section.full_text {
        _ = writeln!(out, "\n**Code Text:**\n{full_text}");
    }
    if !section.related_codes.is_empty() {
        _ = writeln!(out, "\n**Related Codes:** {}", section.related_codes.join(", "));
    }
    if let Some(source) = &section.source {
        _ = write!(out, "\n**Source:** {source}");
    }
    out
}

pub(crate) fn code_not_found(reference: &str, jurisdiction: &str) -> String {
    format!(
        "Code section '{reference}' not found in database for {jurisdiction}. This may be a \
         valid code section that we haven't indexed yet. Recommend consulting local building \
         department or current code book."
    )
}

pub(crate) fn compliance(scenario: &str, results: &[Scored<CodeSection>]) -> String {
    let mut out = format!("**Compliance Check for:** {scenario}\n\n");
    if results.is_empty() {
        out.push_str("**Unable to determine compliance** - no relevant codes found in database.\n");
        out.push_str("Recommend consulting a licensed professional for this scenario.");
        return out;
    }

    out.push_str("**Applicable Codes:**\n\n");
    for result in results {
        let section = &result.record;
        _ = writeln!(out, "- {} ({})", section.title, section.code_ref);
        _ = writeln!(out, "  Requirement: {}\n", section.summary);
    }
    out.push_str("\n**Assessment:**\n");
    out.push_str(
        "Based on the codes above, verify that your scenario meets these requirements. \
         If uncertain, consult with a licensed professional before proceeding.\n\n",
    );
    out.push_str(
        "*This is guidance only and not a substitute for professional inspection or approval.*",
    );
    out
}

pub(crate) fn product_results(results: &[Scored<Product>]) -> String {
    if results.is_empty() {
        return "No products found matching your criteria. Try broadening your search or \
                checking the category."
            .to_string();
    }

    let mut out = format!("**Found {} Products:**\n\n", results.len());
    for (index, result) in results.iter().take(RESULT_DISPLAY_LIMIT).enumerate() {
        let product = &result.record;
        _ = writeln!(out, "**{}. {}**", index + 1, product.name);
        _ = writeln!(out, "   - **Price:** ${:.2}", product.price);
        _ = writeln!(out, "   - **Supplier:** {}", product.supplier);
        _ = writeln!(out, "   - **Availability:** {}", stock_label(product));
        if let (Some(location), Some(distance)) = (&product.store_location, product.distance_miles)
        {
            _ = writeln!(out, "   - **Location:** {location} ({distance} miles)");
        }
        if let Some(rating) = product.rating {
            _ = writeln!(out, "   - **Rating:** {}", rating_label(rating, product.review_count));
        }
        if !product.specifications.is_empty() {
            let specs: Vec<String> = product
                .specifications
                .iter()
                .take(SUMMARY_SPEC_LIMIT)
                .map(|(key, value)| format!("{key}: {}", value_text(value)))
                .collect();
            _ = writeln!(out, "   - **Specs:** {}", specs.join(", "));
        }
        if let Some(url) = &product.url {
            _ = writeln!(out, "   - **Link:** {url}");
        }
        _ = writeln!(out, "   - **Product ID:** `{}` (use for alternatives/details)\n", product.id);
    }
    if results.len() > RESULT_DISPLAY_LIMIT {
        _ = writeln!(
            out,
            "\n*Showing top {RESULT_DISPLAY_LIMIT} of {} results*",
            results.len()
        );
    }
    out
}

pub(crate) fn product_details(product: &Product) -> String {
    let mut out = format!("**{}**\n\n", product.name);
    _ = writeln!(out, "**Price:** ${:.2} {}", product.price, product.currency);
    _ = writeln!(out, "**Supplier:** {}", product.supplier);
    _ = writeln!(out, "**Category:** {} > {}", product.category, product.subcategory);
    if let Some(manufacturer) = &product.manufacturer {
        _ = writeln!(out, "**Manufacturer:** {manufacturer}");
    }
    out.push('\n');
    if let Some(rating) = product.rating {
        _ = writeln!(out, "**Rating:** {}\n", rating_label(rating, product.review_count));
    }
    if !product.specifications.is_empty() {
        out.push_str("**Specifications:**\n");
        for (key, value) in &product.specifications {
            _ = writeln!(out, "  - **{}:** {}", title_case(key), value_text(value));
        }
    }
    _ = writeln!(out, "\n**Availability:** {}", stock_label(product));
    if let Some(url) = &product.url {
        _ = writeln!(out, "\n**Purchase:** {url}");
    }
    out
}

pub(crate) fn product_not_found(product_id: &str) -> String {
    format!("Product '{product_id}' not found in our database.")
}

pub(crate) fn alternatives(original: &Product, alternatives: &[Product]) -> String {
    let mut out = format!(
        "**Alternatives to {}** (${:.2}):\n\n",
        original.name, original.price
    );
    if alternatives.is_empty() {
        out.push_str("No alternatives found in the specified price range.\n");
        return out;
    }

    for (index, alternative) in alternatives.iter().take(ALTERNATIVE_DISPLAY_LIMIT).enumerate() {
        let difference = alternative.price - original.price;
        let direction = if difference < 0.0 {
            "Cheaper"
        } else {
            "More expensive"
        };
        _ = writeln!(out, "**{}. {}**", index + 1, alternative.name);
        _ = writeln!(
            out,
            "   - **Price:** ${:.2} ({direction}: ${:.2})",
            alternative.price,
            difference.abs()
        );
        _ = writeln!(out, "   - **Supplier:** {}", alternative.supplier);
        if let Some(rating) = alternative.rating {
            _ = writeln!(out, "   - **Rating:** {}", rating_label(rating, None));
        }
        _ = writeln!(out, "   - **Product ID:** `{}`\n", alternative.id);
    }
    out
}

pub(crate) fn compatibility(result: &Compatibility) -> String {
    let verdict = if result.compatible {
        "**Compatible**"
    } else {
        "**Not Compatible**"
    };
    let mut out = format!(
        "**Compatibility Check:**\n\n{verdict} (Confidence: {})\n\n",
        result.confidence.as_str()
    );
    if result.notes.is_empty() {
        out.push_str(
            "*No specific compatibility information available. Consult product specifications \
             or manufacturer.*\n",
        );
    } else {
        out.push_str("**Notes:**\n");
        for note in &result.notes {
            _ = writeln!(out, "  - {note}");
        }
    }
    out
}

pub(crate) fn availability(availability: &Availability) -> String {
    let status = if availability.available {
        "In Stock"
    } else {
        "Out of Stock"
    };
    let mut out = format!(
        "**Availability for `{}` near {}:** {status}\n\n",
        availability.product_id, availability.zip_code
    );
    for store in &availability.stores {
        _ = writeln!(out, "**{}** ({} miles)", store.name, store.distance_miles);
        _ = writeln!(out, "   - **Address:** {}", store.address);
        _ = writeln!(out, "   - **In stock:** {}", store.quantity);
        _ = writeln!(out, "   - **Phone:** {}\n", store.phone);
    }
    out.push_str(PRICE_DISCLAIMER);
    out
}

pub(crate) fn shopping_list(list: &ShoppingList, zip_code: Option<&str>) -> String {
    let mut out = String::from("**Shopping List:**\n\n");
    for (index, line) in list.lines.iter().enumerate() {
        match line {
            ShoppingLine::Found {
                product,
                quantity,
                subtotal,
            } => {
                _ = writeln!(out, "**{}. {}**", index + 1, product.name);
                _ = writeln!(out, "   - Quantity: {quantity}");
                _ = writeln!(out, "   - Unit Price: ${:.2}", product.price);
                _ = writeln!(out, "   - Subtotal: ${subtotal:.2}");
                _ = writeln!(out, "   - Supplier: {}", product.supplier);
                if let Some(url) = &product.url {
                    _ = writeln!(out, "   - Link: {url}");
                }
                out.push('\n');
            }
            ShoppingLine::Missing { product_id } => {
                _ = writeln!(out, "**{}. Product {product_id}** - Not found\n", index + 1);
            }
        }
    }
    _ = writeln!(out, "\n**Total Estimated Cost: ${:.2}**", list.total_cost);

    if let Some(zip_code) = zip_code
        && !list.nearby_stores.is_empty()
    {
        _ = writeln!(out, "\n**Nearest stores to {zip_code}:**");
        for store in &list.nearby_stores {
            _ = writeln!(out, "  - {} - {} miles", store.name, store.distance_miles);
        }
    }
    out.push('\n');
    out.push_str(PRICE_DISCLAIMER);
    out
}

/// Renders a serialized calculator estimate as a titled key/value list.
pub(crate) fn calculation(title: &str, estimate: &Value) -> String {
    let mut out = format!("**{title}:**\n\n");
    let Some(fields) = estimate.as_object() else {
        _ = writeln!(out, "{}", value_text(estimate));
        return out;
    };

    for (key, value) in fields {
        match value {
            Value::Object(nested) => {
                _ = writeln!(out, "\n**{}:**", title_case(key));
                for (nested_key, nested_value) in nested {
                    _ = writeln!(
                        out,
                        "  - **{}:** {}",
                        title_case(nested_key),
                        value_text(nested_value)
                    );
                }
            }
            _ if key == "note" => {
                _ = writeln!(out, "\n**Note:** {}", value_text(value));
            }
            _ => {
                _ = writeln!(out, "**{}:** {}", title_case(key), value_text(value));
            }
        }
    }
    out
}

fn stock_label(product: &Product) -> String {
    if !product.in_stock {
        return "Out of Stock".to_string();
    }
    match product.quantity_available {
        Some(quantity) if quantity > 0 => format!("In Stock ({quantity} available)"),
        _ => "In Stock".to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rating_label(rating: f64, review_count: Option<u32>) -> String {
    let stars = "\u{2b50}".repeat(rating.clamp(0.0, 5.0) as usize);
    match review_count {
        Some(count) => format!("{stars} {rating}/5.0 ({count} reviews)"),
        None => format!("{stars} {rating}/5.0"),
    }
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use diy_core::calculators::{WireRequest, calculate_wire};
    use diy_core::products::{Confidence, StoreLocation};
    use serde_json::json;

    use super::*;

    fn section() -> CodeSection {
        serde_json::from_value(json!({
            "code_ref": "NEC 210.52(C)(1)",
            "title": "Kitchen Countertop Receptacle Spacing",
            "category": "electrical",
            "jurisdiction": "National",
            "summary": "Outlet every 4 feet of countertop.",
            "related_codes": ["NEC 210.8(A)(6)", "NEC 210.52(B)"],
            "source": "NFPA 70"
        }))
        .expect("valid section")
    }

    fn product() -> Product {
        serde_json::from_value(json!({
            "id": "HD-20001",
            "name": "Leviton GFCI Outlet",
            "category": "electrical",
            "subcategory": "outlets",
            "price": 16.97,
            "supplier": "Home Depot",
            "quantity_available": 156,
            "rating": 4.8,
            "review_count": 4523,
            "specifications": {"amperage": "15A", "voltage": "125V", "type": "GFCI", "color": "White"}
        }))
        .expect("valid product")
    }

    #[test]
    fn empty_code_results_give_guidance() {
        let text = code_results(&[]);
        assert!(text.starts_with("No relevant code sections found."));
        assert!(compliance("deck over 30 inches", &[]).contains("Unable to determine compliance"));
    }

    #[test]
    fn code_results_are_numbered_with_references() {
        let text = code_results(&[Scored::new(section(), 3)]);

        assert!(text.starts_with("**Relevant Building Codes:**"));
        assert!(text.contains("**1. Kitchen Countertop Receptacle Spacing** (NEC 210.52(C)(1))"));
        assert!(text.contains("   - **Jurisdiction:** National"));
        assert!(text.ends_with(CODES_DISCLAIMER));
    }

    #[test]
    fn code_section_lists_related_codes() {
        let text = code_section(&section());
        assert!(text.contains("**Reference:** NEC 210.52(C)(1)"));
        assert!(text.contains("**Related Codes:** NEC 210.8(A)(6), NEC 210.52(B)"));
        assert!(!text.contains("Code Text"));
    }

    #[test]
    fn product_results_show_three_specs_and_id() {
        let text = product_results(&[Scored::new(product(), 2)]);

        assert!(text.starts_with("**Found 1 Products:**"));
        assert!(text.contains("   - **Price:** $16.97"));
        assert!(text.contains("In Stock (156 available)"));
        assert!(text.contains("**Specs:** amperage: 15A, voltage: 125V, type: GFCI\n"));
        assert!(text.contains("`HD-20001`"));
        assert!(text.contains("4.8/5.0 (4523 reviews)"));
    }

    #[test]
    fn product_details_title_case_spec_keys() {
        let text = product_details(&product());
        assert!(text.contains("**Category:** electrical > outlets"));
        assert!(text.contains("  - **Amperage:** 15A"));
        assert!(text.contains("  - **Color:** White"));
    }

    #[test]
    fn alternatives_show_price_direction() {
        let mut cheaper = product();
        cheaper.id = "HD-20002".to_string();
        cheaper.price = 12.47;
        let text = alternatives(&product(), &[cheaper]);

        assert!(text.starts_with("**Alternatives to Leviton GFCI Outlet** ($16.97)"));
        assert!(text.contains("$12.47 (Cheaper: $4.50)"));
        assert!(alternatives(&product(), &[]).contains("No alternatives found"));
    }

    #[test]
    fn compatibility_without_notes_points_to_manufacturer() {
        let text = compatibility(&Compatibility {
            compatible: false,
            confidence: Confidence::Low,
            notes: Vec::new(),
        });
        assert!(text.contains("**Not Compatible** (Confidence: low)"));
        assert!(text.contains("Consult product specifications"));
    }

    #[test]
    fn shopping_list_totals_and_marks_missing_items() {
        let list = ShoppingList {
            lines: vec![
                ShoppingLine::Found {
                    product: product(),
                    quantity: 2,
                    subtotal: 33.94,
                },
                ShoppingLine::Missing {
                    product_id: "HD-99999".to_string(),
                },
            ],
            total_cost: 33.94,
            nearby_stores: vec![StoreLocation {
                name: "Home Depot - Brighton".to_string(),
                locality: "Brighton, MA".to_string(),
                address: "201 Everett Ave".to_string(),
                distance_miles: 2.3,
                phone: "(617) 555-0123".to_string(),
                stock_offset: 0,
            }],
        };

        let with_zip = shopping_list(&list, Some("02134"));
        assert!(with_zip.contains("**2. Product HD-99999** - Not found"));
        assert!(with_zip.contains("**Total Estimated Cost: $33.94**"));
        assert!(with_zip.contains("  - Home Depot - Brighton - 2.3 miles"));

        assert!(!shopping_list(&list, None).contains("Nearest stores"));
    }

    #[test]
    fn calculation_renders_fields_in_order() {
        let estimate = serde_json::to_value(calculate_wire(&WireRequest::new(50.0)))
            .expect("serialize");
        let text = calculation("Wire Calculation", &estimate);

        let base = text.find("**Base Feet:** 100.0").expect("base feet");
        let recommended = text.find("**Recommended Feet:** 125").expect("recommended");
        assert!(base < recommended);
        assert!(text.contains("**Note:** Buying 125ft"));
    }

    #[test]
    fn title_case_splits_on_underscores() {
        assert_eq!(title_case("total_coverage_sq_ft"), "Total Coverage Sq Ft");
        assert_eq!(title_case("note"), "Note");
    }
}
