//! Deterministic demo catalog.
//!
//! The products are chosen so every keyword of the built-in relation table has at least one
//! match, which makes `recommend` and `voice` demos meaningful right after `seed`.

use rust_decimal::Decimal;

use storefront_core::domain::product::Product;

use crate::repositories::{CatalogRepository, RepositoryError};

/// `(id, name, price in paise, photo)` in catalog order.
const BAKERY_PRODUCTS: &[(&str, &str, i64, Option<&str>)] = &[
    ("bread-white", "White Bread", 4000, Some("/pictures/white-bread.jpg")),
    ("bread-brown", "Brown Bread", 5500, Some("/pictures/brown-bread.jpg")),
    ("butter", "Salted Butter", 6000, Some("/pictures/butter.jpg")),
    ("jam-strawberry", "Strawberry Jam", 9000, Some("/pictures/strawberry-jam.jpg")),
    ("cake-chocolate", "Chocolate Cake", 45000, Some("/pictures/chocolate-cake.jpg")),
    ("cream-fresh", "Fresh Cream", 7500, None),
    ("candles", "Birthday Candles", 3000, None),
    ("fruit-basket", "Fruit Basket", 25000, Some("/pictures/fruit-basket.jpg")),
    ("milk", "Milk", 3200, None),
    ("cookies", "Butter Cookies", 12000, Some("/pictures/cookies.jpg")),
];

pub struct BakeryCatalogFixture;

impl BakeryCatalogFixture {
    pub fn products() -> Vec<Product> {
        BAKERY_PRODUCTS
            .iter()
            .filter_map(|(id, name, paise, photo)| {
                let product = Product::new(*id, *name, Decimal::new(*paise, 2)).ok()?;
                Some(match photo {
                    Some(photo) => product.with_photo(*photo),
                    None => product,
                })
            })
            .collect()
    }

    /// Upserts every demo product. Safe to run repeatedly.
    pub async fn load<R>(repository: &R) -> Result<SeedResult, RepositoryError>
    where
        R: CatalogRepository + ?Sized,
    {
        let products = Self::products();
        for product in &products {
            repository.save(product).await?;
        }

        Ok(SeedResult { product_ids: products.into_iter().map(|product| product.id.0).collect() })
    }

    /// True when every demo product is present with its fixture price.
    pub async fn verify<R>(repository: &R) -> Result<bool, RepositoryError>
    where
        R: CatalogRepository + ?Sized,
    {
        for expected in Self::products() {
            match repository.find_by_id(&expected.id).await? {
                Some(found) if found.price == expected.price => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }
}

#[derive(Debug)]
pub struct SeedResult {
    pub product_ids: Vec<String>,
}
