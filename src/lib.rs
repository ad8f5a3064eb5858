//! Print-shop invoice generation.
//!
//! Normalizes order records from the shop's backend API (JSON with nested
//! design/item associations) into a fixed view-model shape, then renders a
//! standalone right-to-left invoice HTML document suitable for browser
//! printing or client-side PDF export. The render pipeline is synchronous
//! and infallible; only the optional backend fetch in [`api`] can fail.

use serde_json::Value;

pub mod api;
pub mod config;
pub mod error;
pub mod invoice_doc;
pub mod invoice_renderer;
pub mod normalize;

/// First non-empty string found under any of `keys`, trimmed. Numeric values
/// are stringified since ids and order numbers arrive as both.
pub(crate) fn value_str(v: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match v.get(*key) {
            Some(Value::String(s)) => {
                let trimmed = s.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// First numeric value found under any of `keys`. String-encoded numbers
/// ("25.5") are accepted — the backend serializes decimals inconsistently.
pub(crate) fn value_f64(v: &Value, keys: &[&str]) -> Option<f64> {
    for key in keys {
        if let Some(value) = v.get(*key) {
            if let Some(n) = value.as_f64() {
                return Some(n);
            }
            if let Some(n) = value.as_str().and_then(|s| s.trim().parse::<f64>().ok()) {
                return Some(n);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_str_walks_keys_in_order_and_skips_blanks() {
        let v = json!({ "a": "  ", "b": "hit", "c": "later" });
        assert_eq!(value_str(&v, &["a", "b", "c"]).as_deref(), Some("hit"));
        assert_eq!(value_str(&v, &["missing"]), None);
    }

    #[test]
    fn value_str_stringifies_numbers() {
        let v = json!({ "id": 77 });
        assert_eq!(value_str(&v, &["id"]).as_deref(), Some("77"));
    }

    #[test]
    fn value_f64_accepts_numbers_and_numeric_strings() {
        let v = json!({ "a": 1.5, "b": "2.25", "c": "nope" });
        assert_eq!(value_f64(&v, &["a"]), Some(1.5));
        assert_eq!(value_f64(&v, &["b"]), Some(2.25));
        assert_eq!(value_f64(&v, &["c"]), None);
        assert_eq!(value_f64(&v, &["c", "b"]), Some(2.25));
    }
}
