use bigdecimal::{BigDecimal, Zero};
use uuid::Uuid;

use crate::domain::catalog::{AxisInput, NewVariantInput, ProductView, VariantView};
use crate::domain::errors::DomainError;
use crate::domain::ports::CatalogRepository;
use crate::domain::variants::{generate_combinations, OptionAxis, VariantCombination};

pub struct CatalogService<R> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_product(&self, name: &str) -> Result<Uuid, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput(
                "product name must not be empty".to_string(),
            ));
        }
        self.repo.create_product(name)
    }

    pub fn get_product(&self, id: Uuid) -> Result<Option<ProductView>, DomainError> {
        self.repo.find_product(id)
    }

    pub fn add_option_axis(&self, product_id: Uuid, axis: AxisInput) -> Result<Uuid, DomainError> {
        if axis.name.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "axis name must not be empty".to_string(),
            ));
        }
        if self.repo.find_product(product_id)?.is_none() {
            return Err(DomainError::NotFound);
        }
        self.repo.add_option_axis(product_id, axis)
    }

    pub fn list_option_axes(&self, product_id: Uuid) -> Result<Vec<OptionAxis>, DomainError> {
        if self.repo.find_product(product_id)?.is_none() {
            return Err(DomainError::NotFound);
        }
        self.repo.list_option_axes(product_id)
    }

    /// Propose variant rows from the product's persisted axes, in stored axis
    /// and value order. Purely a staging result; nothing is written.
    pub fn generate_variants(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<VariantCombination>, DomainError> {
        let axes = self.list_option_axes(product_id)?;
        Ok(generate_combinations(&axes))
    }

    pub fn add_variants(
        &self,
        product_id: Uuid,
        variants: Vec<NewVariantInput>,
    ) -> Result<Vec<Uuid>, DomainError> {
        for variant in &variants {
            if variant.title.trim().is_empty() {
                return Err(DomainError::InvalidInput(
                    "variant title must not be empty".to_string(),
                ));
            }
            if variant.price < BigDecimal::zero() {
                return Err(DomainError::InvalidInput(format!(
                    "variant price must not be negative, got {}",
                    variant.price
                )));
            }
            if variant.stock < 0 {
                return Err(DomainError::InvalidInput(format!(
                    "variant stock must not be negative, got {}",
                    variant.stock
                )));
            }
        }
        if self.repo.find_product(product_id)?.is_none() {
            return Err(DomainError::NotFound);
        }
        self.repo.insert_variants(product_id, variants)
    }

    pub fn list_variants(&self, product_id: Uuid) -> Result<Vec<VariantView>, DomainError> {
        if self.repo.find_product(product_id)?.is_none() {
            return Err(DomainError::NotFound);
        }
        self.repo.list_variants(product_id)
    }
}
