//! Record normalization into canonical [`Product`] records.
//!
//! Both feed transports end up here: delimited rows are looked up by
//! case-insensitive header name, structured records arrive as
//! [`RawProduct`]. Either way the policy is partial success: a row that
//! cannot yield a usable id is skipped with a warning and the load
//! continues. A missing or uncoercible field never fails a row; it
//! takes the field's default instead.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use warung_core::{Price, Product, ProductId};

use super::parser::Table;

/// Root under which bare image filenames are resolved.
pub const ASSET_ROOT: &str = "assets/";

/// Directory for catalog images.
pub const IMAGE_ROOT: &str = "assets/images/";

/// Image shown when a product has none.
pub const PLACEHOLDER_IMAGE: &str = "assets/images/no-image.png";

/// Display name for products whose feed row had none.
pub const PLACEHOLDER_NAME: &str = "(tanpa nama)";

/// Delimiter joining note lines inside a single feed field.
pub const NOTES_DELIMITER: &str = "||";

/// Why a single feed row did not become a product.
///
/// All other fields default rather than fail, so an unusable id is the
/// only way a row gets skipped.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordAnomaly {
    /// The id field was missing or trimmed to empty.
    #[error("row has no usable id")]
    MissingId,
}

/// A pre-structured feed record, e.g. one element of a JSON catalog.
///
/// Fields are kept loose (`Value` where feeds disagree on types) and
/// run through the same coercions as delimited rows.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProduct {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub stock: Value,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub notes: String,
}

/// Case-insensitive header-name to column-index lookup.
#[derive(Debug)]
struct Columns {
    names: Vec<String>,
}

impl Columns {
    fn new(header: &[String]) -> Self {
        Self {
            names: header.iter().map(|name| name.trim().to_lowercase()).collect(),
        }
    }

    /// The field under `name` for this row, or `""` when the column is
    /// missing or the row is short.
    fn get<'a>(&self, row: &'a [String], name: &str) -> &'a str {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .and_then(|index| row.get(index))
            .map_or("", String::as_str)
    }
}

/// Normalize a parsed feed table into products.
///
/// Returns the products in feed order plus the number of skipped rows.
#[must_use]
pub fn normalize_table(table: &Table) -> (Vec<Product>, usize) {
    let columns = Columns::new(&table.header);
    collect(
        table
            .rows
            .iter()
            .map(|row| normalize_row(&columns, row)),
    )
}

/// Normalize pre-structured records into products.
///
/// Returns the products in feed order plus the number of skipped rows.
#[must_use]
pub fn normalize_records(records: Vec<RawProduct>) -> (Vec<Product>, usize) {
    collect(records.into_iter().map(normalize_record))
}

fn collect(rows: impl Iterator<Item = Result<Product, RecordAnomaly>>) -> (Vec<Product>, usize) {
    let mut products = Vec::new();
    let mut skipped = 0;
    for (index, row) in rows.enumerate() {
        match row {
            Ok(product) => products.push(product),
            Err(anomaly) => {
                tracing::warn!(row = index, %anomaly, "skipping feed row");
                skipped += 1;
            }
        }
    }
    (products, skipped)
}

fn normalize_row(columns: &Columns, row: &[String]) -> Result<Product, RecordAnomaly> {
    let id = require_id(columns.get(row, "id"))?;
    Ok(Product {
        id,
        name: name_or_placeholder(columns.get(row, "name")),
        category: columns.get(row, "category").trim().to_string(),
        price: Price::new(coerce_amount(columns.get(row, "price"))),
        unit: optional(columns.get(row, "unit")),
        badge: optional(columns.get(row, "badge")),
        stock: coerce_stock(columns.get(row, "stock")),
        image: resolve_image(columns.get(row, "image")),
        notes: split_notes(columns.get(row, "notes")),
    })
}

fn normalize_record(record: RawProduct) -> Result<Product, RecordAnomaly> {
    let id = require_id(&scalar_to_string(&record.id))?;
    Ok(Product {
        id,
        name: name_or_placeholder(&record.name),
        category: record.category.trim().to_string(),
        price: Price::new(coerce_amount(&scalar_to_string(&record.price))),
        unit: optional(&record.unit),
        badge: optional(&record.badge),
        stock: coerce_stock(&scalar_to_string(&record.stock)),
        image: resolve_image(&record.image),
        notes: split_notes(&record.notes),
    })
}

fn require_id(raw: &str) -> Result<ProductId, RecordAnomaly> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RecordAnomaly::MissingId);
    }
    Ok(ProductId::new(trimmed))
}

fn name_or_placeholder(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Strip every non-digit character and parse what remains.
///
/// `"5,000"` and `"Rp 5.000"` both coerce to `5000`; no digits at all
/// (or an amount too large for the type) coerces to `0`.
fn coerce_amount(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

fn coerce_stock(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Split a delimiter-joined notes field into trimmed, non-empty lines.
fn split_notes(raw: &str) -> Vec<String> {
    raw.split(NOTES_DELIMITER)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Resolve an image reference to something displayable.
///
/// Absolute network references and already-rooted asset references pass
/// through; a bare filename is rewritten under [`IMAGE_ROOT`]; an empty
/// value resolves to [`PLACEHOLDER_IMAGE`].
fn resolve_image(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        PLACEHOLDER_IMAGE.to_string()
    } else if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with(ASSET_ROOT)
    {
        trimmed.to_string()
    } else {
        format!("{IMAGE_ROOT}{trimmed}")
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::feed::parser::parse_table;

    fn table(input: &str) -> Table {
        parse_table(input).unwrap()
    }

    #[test]
    fn test_normalize_full_row() {
        let (products, skipped) = normalize_table(&table(
            "id,name,category,price,unit,badge,stock,image,notes\n\
             p1,Gula Pasir,Sembako,\"5,000\",1kg,Promo,10,gula.jpg,halal || stok lama",
        ));
        assert_eq!(skipped, 0);
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.id.as_str(), "p1");
        assert_eq!(p.name, "Gula Pasir");
        assert_eq!(p.category, "Sembako");
        assert_eq!(p.price, Price::new(5_000));
        assert_eq!(p.unit.as_deref(), Some("1kg"));
        assert_eq!(p.badge.as_deref(), Some("Promo"));
        assert_eq!(p.stock, 10);
        assert_eq!(p.image, "assets/images/gula.jpg");
        assert_eq!(p.notes, vec!["halal", "stok lama"]);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let (products, _) = normalize_table(&table("ID,Name,PRICE\np1,Gula,500"));
        assert_eq!(products[0].name, "Gula");
        assert_eq!(products[0].price, Price::new(500));
    }

    #[test]
    fn test_missing_columns_default() {
        let (products, skipped) = normalize_table(&table("id\np1"));
        assert_eq!(skipped, 0);
        let p = &products[0];
        assert_eq!(p.name, PLACEHOLDER_NAME);
        assert_eq!(p.category, "");
        assert_eq!(p.price, Price::ZERO);
        assert_eq!(p.unit, None);
        assert_eq!(p.stock, 0);
        assert_eq!(p.image, PLACEHOLDER_IMAGE);
        assert!(p.notes.is_empty());
    }

    #[test]
    fn test_rows_without_id_are_skipped_not_fatal() {
        let (products, skipped) =
            normalize_table(&table("id,name\n  ,NoId\np1,Gula\n,AlsoNoId"));
        assert_eq!(skipped, 2);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "p1");
    }

    #[test]
    fn test_amount_coercion_strips_non_digits() {
        assert_eq!(coerce_amount("5,000"), 5_000);
        assert_eq!(coerce_amount("Rp 12.500"), 12_500);
        assert_eq!(coerce_amount("free"), 0);
        assert_eq!(coerce_amount(""), 0);
    }

    #[test]
    fn test_image_resolution() {
        assert_eq!(resolve_image("https://cdn.example.com/a.png"), "https://cdn.example.com/a.png");
        assert_eq!(resolve_image("assets/images/a.png"), "assets/images/a.png");
        assert_eq!(resolve_image("a.png"), "assets/images/a.png");
        assert_eq!(resolve_image("  "), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_notes_split_trims_and_drops_empty_pieces() {
        assert_eq!(split_notes("a || b ||  || c"), vec!["a", "b", "c"]);
        assert!(split_notes("").is_empty());
    }

    #[test]
    fn test_normalize_records_coerces_loose_types() {
        let records: Vec<RawProduct> = serde_json::from_str(
            r#"[
                {"id": 7, "name": "Kopi", "price": 2500, "stock": 3},
                {"id": "", "name": "ghost"},
                {"id": "p2", "price": "1,000", "image": "kopi.jpg"}
            ]"#,
        )
        .unwrap();
        let (products, skipped) = normalize_records(records);
        assert_eq!(skipped, 1);
        assert_eq!(products[0].id.as_str(), "7");
        assert_eq!(products[0].price, Price::new(2_500));
        assert_eq!(products[0].stock, 3);
        assert_eq!(products[1].price, Price::new(1_000));
        assert_eq!(products[1].image, "assets/images/kopi.jpg");
    }
}
