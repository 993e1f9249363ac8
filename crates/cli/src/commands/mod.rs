pub mod config;
pub mod migrate;
pub mod recommend;
pub mod seed;
pub mod view;
pub mod voice;

use serde::Serialize;
use serde_json::Value;

use storefront_core::catalog::Catalog;
use storefront_core::config::{AppConfig, LoadOptions};
use storefront_core::domain::cart::Cart;
use storefront_core::domain::product::{format_price, Product, ProductId};
use storefront_db::{connect, migrations, DbPool};

/// `(error_class, message, exit_code)` of a failed command step.
pub(crate) type Failure = (&'static str, String, u8);

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::ok(command, message.into(), None)
    }

    pub fn success_with_data(command: &str, message: impl Into<String>, data: Value) -> Self {
        Self::ok(command, message.into(), Some(data))
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub(crate) fn from_failure(command: &str, (error_class, message, exit_code): Failure) -> Self {
        Self::failure(command, error_class, message, exit_code)
    }

    fn ok(command: &str, message: String, data: Option<Value>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message,
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// A `--cart ID[:QTY]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub quantity: u32,
}

pub fn parse_cart_entry(raw: &str) -> Result<CartEntry, String> {
    let (id, quantity) = match raw.split_once(':') {
        Some((id, quantity)) => {
            let quantity = quantity
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|quantity| *quantity > 0)
                .ok_or_else(|| format!("quantity in `{raw}` must be a positive integer"))?;
            (id, quantity)
        }
        None => (raw, 1),
    };

    let id = id.trim();
    if id.is_empty() {
        return Err(format!("cart entry `{raw}` is missing a product id"));
    }

    Ok(CartEntry { product_id: ProductId::from(id), quantity })
}

pub(crate) fn load_config(command: &str) -> Result<AppConfig, CommandResult> {
    AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })
}

pub(crate) fn build_runtime(command: &str) -> Result<tokio::runtime::Runtime, CommandResult> {
    tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
        CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            3,
        )
    })
}

/// Connects and applies pending migrations so every command works against a fresh database.
pub(crate) async fn open_database(config: &AppConfig) -> Result<DbPool, Failure> {
    let pool = connect(&config.database)
        .await
        .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
    migrations::run_pending(&pool).await.map_err(|error| ("migration", error.to_string(), 5u8))?;
    Ok(pool)
}

pub(crate) fn persistence_failure(error: impl std::fmt::Display) -> Failure {
    ("persistence", error.to_string(), 6)
}

pub(crate) fn build_cart(catalog: &Catalog, entries: &[CartEntry]) -> Result<Cart, Failure> {
    let mut cart = Cart::new();
    for entry in entries {
        let product = catalog.find(&entry.product_id).ok_or_else(|| {
            ("not_found", format!("product `{}` is not in the catalog", entry.product_id), 7u8)
        })?;
        cart.add(product.clone(), entry.quantity)
            .map_err(|error| ("domain_validation", error.to_string(), 7u8))?;
    }
    Ok(cart)
}

pub(crate) fn product_json(product: &Product) -> Value {
    serde_json::json!({
        "id": product.id.as_str(),
        "name": product.name,
        "price": format_price(product.price),
        "photo_url": product.photo_url(),
    })
}

pub(crate) fn cart_json(cart: &Cart) -> Value {
    let items: Vec<Value> = cart
        .items()
        .iter()
        .map(|item| {
            serde_json::json!({
                "id": item.product.id.as_str(),
                "name": item.product.name,
                "quantity": item.quantity,
                "line_total": format_price(item.line_total()),
            })
        })
        .collect();

    serde_json::json!({
        "items": items,
        "item_count": cart.item_count(),
        "total": format_price(cart.total()),
    })
}

#[cfg(test)]
mod tests {
    use storefront_core::domain::product::ProductId;

    use super::{parse_cart_entry, CartEntry, CommandResult};

    #[test]
    fn cart_entries_default_to_one() {
        assert_eq!(
            parse_cart_entry("bread-white"),
            Ok(CartEntry { product_id: ProductId::from("bread-white"), quantity: 1 })
        );
        assert_eq!(
            parse_cart_entry("cake-chocolate:3"),
            Ok(CartEntry { product_id: ProductId::from("cake-chocolate"), quantity: 3 })
        );
    }

    #[test]
    fn malformed_cart_entries_are_rejected() {
        assert!(parse_cart_entry("bread:0").is_err());
        assert!(parse_cart_entry("bread:two").is_err());
        assert!(parse_cart_entry(":2").is_err());
    }

    #[test]
    fn data_is_omitted_from_plain_results() {
        let plain: serde_json::Value =
            serde_json::from_str(&CommandResult::success("migrate", "done").output).expect("json");
        let rich: serde_json::Value = serde_json::from_str(
            &CommandResult::success_with_data("view", "done", serde_json::json!({"n": 1})).output,
        )
        .expect("json");

        assert!(plain.get("data").is_none());
        assert_eq!(rich["data"]["n"], 1);
        assert_eq!(plain["error_class"], serde_json::Value::Null);
    }
}
