use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::catalog::{AxisInput, NewVariantInput, ProductView, VariantView};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::domain::pricing::DiscountRule;
use crate::domain::variants::{OptionAxis, OptionValue};
use crate::schema::{option_axes, option_values, product_variants, products};

use super::models::{
    NewOptionAxisRow, NewOptionValueRow, NewProductRow, NewVariantRow, OptionAxisRow,
    OptionValueRow, ProductRow, VariantRow,
};

pub struct DieselCatalogRepository {
    pool: DbPool,
}

impl DieselCatalogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn variant_view(row: VariantRow) -> VariantView {
    VariantView {
        id: row.id,
        product_id: row.product_id,
        title: row.title,
        sku: row.sku,
        price: row.price,
        discount: DiscountRule::from_parts(row.discount_kind.as_deref(), row.discount_value),
        stock: row.stock,
    }
}

impl CatalogRepository for DieselCatalogRepository {
    fn create_product(&self, name: &str) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        let id = Uuid::new_v4();
        diesel::insert_into(products::table)
            .values(&NewProductRow {
                id,
                name: name.to_string(),
            })
            .execute(&mut conn)?;
        Ok(id)
    }

    fn find_product(&self, id: Uuid) -> Result<Option<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(|p| ProductView {
            id: p.id,
            name: p.name,
            created_at: p.created_at,
        }))
    }

    fn add_option_axis(&self, product_id: Uuid, axis: AxisInput) -> Result<Uuid, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let next_position: i64 = option_axes::table
                .filter(option_axes::product_id.eq(product_id))
                .count()
                .get_result(conn)?;

            let axis_id = Uuid::new_v4();
            diesel::insert_into(option_axes::table)
                .values(&NewOptionAxisRow {
                    id: axis_id,
                    product_id,
                    name: axis.name,
                    position: next_position as i32,
                })
                .execute(conn)?;

            let value_rows: Vec<NewOptionValueRow> = axis
                .values
                .into_iter()
                .enumerate()
                .map(|(i, v)| {
                    let (kind, value) = v.discount.as_parts();
                    NewOptionValueRow {
                        id: Uuid::new_v4(),
                        axis_id,
                        label: v.label,
                        swatch: v.swatch,
                        discount_kind: kind.map(str::to_string),
                        discount_value: value.cloned(),
                        position: i as i32,
                    }
                })
                .collect();
            diesel::insert_into(option_values::table)
                .values(&value_rows)
                .execute(conn)?;

            Ok(axis_id)
        })
    }

    fn list_option_axes(&self, product_id: Uuid) -> Result<Vec<OptionAxis>, DomainError> {
        let mut conn = self.pool.get()?;

        let axis_rows: Vec<OptionAxisRow> = option_axes::table
            .filter(option_axes::product_id.eq(product_id))
            .order(option_axes::position.asc())
            .select(OptionAxisRow::as_select())
            .load(&mut conn)?;

        let value_rows: Vec<OptionValueRow> = OptionValueRow::belonging_to(&axis_rows)
            .order((option_values::axis_id.asc(), option_values::position.asc()))
            .select(OptionValueRow::as_select())
            .load(&mut conn)?;
        let grouped = value_rows.grouped_by(&axis_rows);

        Ok(axis_rows
            .into_iter()
            .zip(grouped)
            .map(|(axis, values)| OptionAxis {
                id: axis.id,
                name: axis.name,
                values: values
                    .into_iter()
                    .map(|v| OptionValue {
                        id: v.id,
                        label: v.label,
                        swatch: v.swatch,
                        discount: DiscountRule::from_parts(
                            v.discount_kind.as_deref(),
                            v.discount_value,
                        ),
                    })
                    .collect(),
            })
            .collect())
    }

    fn insert_variants(
        &self,
        product_id: Uuid,
        variants: Vec<NewVariantInput>,
    ) -> Result<Vec<Uuid>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let rows: Vec<NewVariantRow> = variants
                .into_iter()
                .map(|v| {
                    let (kind, value) = v.discount.as_parts();
                    NewVariantRow {
                        id: Uuid::new_v4(),
                        product_id,
                        title: v.title,
                        sku: v.sku,
                        price: v.price,
                        discount_kind: kind.map(str::to_string),
                        discount_value: value.cloned(),
                        stock: v.stock,
                    }
                })
                .collect();
            let ids = rows.iter().map(|r| r.id).collect();

            diesel::insert_into(product_variants::table)
                .values(&rows)
                .execute(conn)?;

            Ok(ids)
        })
    }

    fn list_variants(&self, product_id: Uuid) -> Result<Vec<VariantView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows: Vec<VariantRow> = product_variants::table
            .filter(product_variants::product_id.eq(product_id))
            .order(product_variants::created_at.asc())
            .select(VariantRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(variant_view).collect())
    }
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;

    use super::DieselCatalogRepository;
    use crate::domain::catalog::{AxisInput, AxisValueInput, NewVariantInput};
    use crate::domain::ports::CatalogRepository;
    use crate::domain::pricing::DiscountRule;
    use crate::domain::variants::generate_combinations;
    use crate::infrastructure::test_support::setup_db;

    fn axis(name: &str, labels: &[&str]) -> AxisInput {
        AxisInput {
            name: name.to_string(),
            values: labels
                .iter()
                .map(|l| AxisValueInput {
                    label: l.to_string(),
                    swatch: None,
                    discount: DiscountRule::None,
                })
                .collect(),
        }
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn axes_and_values_list_in_insertion_order() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);

        let product_id = repo.create_product("Tee").expect("create product");
        repo.add_option_axis(product_id, axis("Color", &["Red", "Blue"]))
            .expect("add color");
        repo.add_option_axis(product_id, axis("Size", &["S", "M"]))
            .expect("add size");

        let axes = repo.list_option_axes(product_id).expect("list axes");
        assert_eq!(axes.len(), 2);
        assert_eq!(axes[0].name, "Color");
        assert_eq!(axes[1].name, "Size");
        let labels: Vec<&str> = axes[0].values.iter().map(|v| v.label.as_str()).collect();
        assert_eq!(labels, vec!["Red", "Blue"]);

        // Stored order feeds straight into combination generation.
        let titles: Vec<String> = generate_combinations(&axes)
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Red / S", "Red / M", "Blue / S", "Blue / M"]);
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn variant_discount_pair_roundtrips_through_the_store() {
        let (_container, pool) = setup_db().await;
        let repo = DieselCatalogRepository::new(pool);

        let product_id = repo.create_product("Tee").expect("create product");
        repo.insert_variants(
            product_id,
            vec![NewVariantInput {
                title: "Red / S".to_string(),
                sku: Some("TEE-RED-S".to_string()),
                price: BigDecimal::from(1000),
                discount: DiscountRule::Percentage(BigDecimal::from(20)),
                stock: 4,
            }],
        )
        .expect("insert variants");

        let variants = repo.list_variants(product_id).expect("list variants");
        assert_eq!(variants.len(), 1);
        assert_eq!(
            variants[0].discount,
            DiscountRule::Percentage(BigDecimal::from(20))
        );
        assert_eq!(variants[0].stock, 4);
    }
}
