use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog entry. Owned by the catalog collaborator; treated as an immutable snapshot here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Wire form of [`Product`]; decoding goes through the same checks as [`Product::new`].
#[derive(Deserialize)]
struct ProductRecord {
    id: String,
    name: String,
    price: Decimal,
    #[serde(default)]
    photo: Option<String>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let product = Product::new(record.id, record.name, record.price)?;
        Ok(Product { photo: record.photo, ..product })
    }
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if price < Decimal::ZERO {
            return Err(DomainError::InvalidPrice { product_id: id, price });
        }

        Ok(Self { id: ProductId(id), name: name.into(), price, photo: None })
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Lower-cased display name, the form every name comparison works on.
    pub fn normalized_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Photo reference rewritten into a servable URL, see [`normalize_photo_reference`].
    pub fn photo_url(&self) -> Option<String> {
        self.photo.as_deref().map(normalize_photo_reference)
    }
}

/// Remote URLs pass through untouched. Local paths that contain a `pictures` directory are
/// rewritten to `/pictures/<file name>`; anything else is returned as stored.
pub fn normalize_photo_reference(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_owned();
    }

    let lower = raw.to_ascii_lowercase();
    let index = lower.rfind("pictures/").or_else(|| lower.rfind("pictures\\"));
    match index {
        Some(index) => {
            let file_name = raw[index..].rsplit(['/', '\\']).next().unwrap_or_default();
            format!("/pictures/{file_name}")
        }
        None => raw.to_owned(),
    }
}

/// Display form used by cart and notification rendering: rupee sign, no fractional part.
pub fn format_price(amount: Decimal) -> String {
    format!("₹{}", amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}
