//! Variant-combination generation.
//!
//! Expands a product's option axes (Color, Size, ...) into the cartesian
//! product of purchasable combinations. The output is a staging structure for
//! the admin authoring flow; the caller decides which combinations become
//! persisted variant rows.

use uuid::Uuid;

use super::pricing::DiscountRule;

/// Joins value labels into a combination title, in axis order.
pub const TITLE_SEPARATOR: &str = " / ";

/// One selectable value on an axis, e.g. "Red" on "Color".
#[derive(Debug, Clone)]
pub struct OptionValue {
    pub id: Uuid,
    pub label: String,
    /// Optional CSS-style swatch code for color-like axes.
    pub swatch: Option<String>,
    pub discount: DiscountRule,
}

/// A named, ordered dimension of product customization.
#[derive(Debug, Clone)]
pub struct OptionAxis {
    pub id: Uuid,
    pub name: String,
    pub values: Vec<OptionValue>,
}

/// One cell of the cartesian product: exactly one `(axis_id, value_id)` pair
/// per input axis, in input axis order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCombination {
    pub title: String,
    pub selections: Vec<(Uuid, Uuid)>,
}

/// Expand `axes` into every combination of one value per axis.
///
/// Output order is the nested iteration order: every combination using the
/// first axis's first value comes before any using its second value, and so on
/// recursively. Admins review the generated rows in this order, so it is part
/// of the contract, not an implementation detail.
///
/// No axes means nothing to combine: the result is empty, and callers must not
/// substitute a default variant here. An axis with zero values also empties
/// the whole result (cartesian product with an empty set); it is not skipped.
pub fn generate_combinations(axes: &[OptionAxis]) -> Vec<VariantCombination> {
    let Some((first, rest)) = axes.split_first() else {
        return Vec::new();
    };

    let mut combinations: Vec<VariantCombination> = first
        .values
        .iter()
        .map(|value| VariantCombination {
            title: value.label.clone(),
            selections: vec![(first.id, value.id)],
        })
        .collect();

    for axis in rest {
        let mut extended = Vec::with_capacity(combinations.len() * axis.values.len());
        for combination in &combinations {
            for value in &axis.values {
                let mut selections = combination.selections.clone();
                selections.push((axis.id, value.id));
                extended.push(VariantCombination {
                    title: format!("{}{}{}", combination.title, TITLE_SEPARATOR, value.label),
                    selections,
                });
            }
        }
        combinations = extended;
    }

    combinations
}
