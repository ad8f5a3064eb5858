//! Backend record normalization.
//!
//! The backend has shipped several shapes for the same data over time: item
//! attributes arrive either as nested entities (`size: { nameAr, name }`) or
//! as legacy flat fields (`sizeName`), client addresses either whole or as
//! country/province/district segments. Every fallback chain lives here, as an
//! ordered list of accessor attempts per attribute, so the renderer only ever
//! sees one shape. Normalization never fails; unresolvable fields degrade to
//! `"-"` or zero.

use serde_json::Value;

use crate::invoice_doc::{ClientInfo, DesignGroup, DesignItem, OrderInvoiceDoc};
use crate::{value_f64, value_str};

/// Placeholder for any attribute that cannot be resolved.
pub const MISSING: &str = "-";

/// Arabic comma-space used when composing an address from segments.
const ADDRESS_SEPARATOR: &str = "، ";

/// Localized display name of an item attribute: nested entity (`nameAr`,
/// then `name`) → legacy flat field → `"-"`.
fn attribute_name(item: &Value, entity_key: &str, flat_key: &str) -> String {
    if let Some(entity) = item.get(entity_key).filter(|v| v.is_object()) {
        if let Some(name) = value_str(entity, &["nameAr", "name"]) {
            return name;
        }
    }
    value_str(item, &[flat_key]).unwrap_or_else(|| MISSING.to_string())
}

fn design_item(item: &Value) -> DesignItem {
    let quantity = value_f64(item, &["quantity"]).unwrap_or(0.0).max(0.0) as u32;
    let unit_price = value_f64(item, &["unitPrice", "unit_price"]).unwrap_or(0.0);
    let total_price = value_f64(item, &["totalPrice", "total_price"])
        .unwrap_or_else(|| f64::from(quantity) * unit_price);
    DesignItem {
        quantity,
        unit_price,
        total_price,
        size: attribute_name(item, "size", "sizeName"),
        color: attribute_name(item, "color", "colorName"),
        fabric: attribute_name(item, "fabric", "fabricName"),
    }
}

fn design_group(design: &Value) -> DesignGroup {
    let items = design
        .get("orderDesignItems")
        .or_else(|| design.get("items"))
        .and_then(Value::as_array)
        .map(|items| items.iter().map(design_item).collect())
        .unwrap_or_default();
    DesignGroup {
        name: value_str(design, &["designName", "name"]).unwrap_or_else(|| MISSING.to_string()),
        items,
    }
}

fn client_info(order: &Value) -> Option<ClientInfo> {
    let client = order.get("client").filter(|v| v.is_object())?;
    let address = value_str(client, &["address"]).unwrap_or_else(|| {
        let segments: Vec<String> = ["country", "province", "district"]
            .into_iter()
            .filter_map(|key| value_str(client, &[key]))
            .collect();
        if segments.is_empty() {
            MISSING.to_string()
        } else {
            segments.join(ADDRESS_SEPARATOR)
        }
    });
    Some(ClientInfo {
        name: value_str(client, &["name", "clientName"]).unwrap_or_else(|| MISSING.to_string()),
        phone: value_str(client, &["phone", "phoneNumber"]).unwrap_or_else(|| MISSING.to_string()),
        address,
    })
}

/// Build one normalized invoice doc from a raw backend order record.
pub fn order_invoice_doc(order: &Value) -> OrderInvoiceDoc {
    let designs = order
        .get("orderDesigns")
        .or_else(|| order.get("designs"))
        .and_then(Value::as_array)
        .map(|designs| designs.iter().map(design_group).collect())
        .unwrap_or_default();

    OrderInvoiceDoc {
        order_id: value_str(order, &["id", "orderId"]).unwrap_or_default(),
        order_number: value_str(order, &["orderNumber", "order_number"]).unwrap_or_default(),
        order_date: value_str(order, &["orderDate", "createdAt", "created_at"]),
        client: client_info(order),
        designs,
        subtotal: value_f64(order, &["subtotal", "subTotal"]).unwrap_or(0.0),
        discount_amount: value_f64(order, &["discountAmount", "discount"]).unwrap_or(0.0),
        delivery_fee: value_f64(order, &["deliveryFee", "delivery_fee"]).unwrap_or(0.0),
        additional_price: value_f64(order, &["additionalPrice", "additional_price"])
            .unwrap_or(0.0),
        total_amount: value_f64(order, &["totalAmount", "total"]).unwrap_or(0.0),
        notes: value_str(order, &["notes", "note"]),
    }
}

/// Normalize a batch of raw order records, preserving input order.
pub fn order_invoice_docs(orders: &[Value]) -> Vec<OrderInvoiceDoc> {
    orders.iter().map(order_invoice_doc).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_attribute_name_wins_over_flat_field() {
        let item = json!({
            "quantity": 1,
            "size": { "nameAr": "كبير", "name": "Large" },
            "sizeName": "L",
        });
        let doc = design_item(&item);
        assert_eq!(doc.size, "كبير");
    }

    #[test]
    fn flat_field_used_when_nested_entity_missing() {
        let item = json!({ "colorName": "أزرق" });
        let doc = design_item(&item);
        assert_eq!(doc.color, "أزرق");
        assert_eq!(doc.size, MISSING);
        assert_eq!(doc.fabric, MISSING);
    }

    #[test]
    fn quantity_defaults_to_zero_and_total_defaults_to_product() {
        let no_quantity = design_item(&json!({ "unitPrice": 10.0 }));
        assert_eq!(no_quantity.quantity, 0);
        assert_eq!(no_quantity.total_price, 0.0);

        let derived = design_item(&json!({ "quantity": 3, "unitPrice": 12.5 }));
        assert_eq!(derived.total_price, 37.5);

        let explicit = design_item(&json!({ "quantity": 3, "unitPrice": 12.5, "totalPrice": 30.0 }));
        assert_eq!(explicit.total_price, 30.0);
    }

    #[test]
    fn string_encoded_numbers_are_accepted() {
        let item = design_item(&json!({ "quantity": "2", "unitPrice": "25.5" }));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price, 25.5);
        assert_eq!(item.total_price, 51.0);
    }

    #[test]
    fn client_address_composed_from_segments() {
        let order = json!({
            "id": "o-1",
            "client": { "name": "سالم", "country": "فلسطين", "district": "البلدة القديمة" }
        });
        let client = order_invoice_doc(&order).client.unwrap();
        assert_eq!(client.address, "فلسطين، البلدة القديمة");
        assert_eq!(client.phone, MISSING);
    }

    #[test]
    fn explicit_client_address_wins_over_segments() {
        let order = json!({
            "id": "o-2",
            "client": { "name": "سالم", "address": "شارع المدارس 4", "country": "فلسطين" }
        });
        let client = order_invoice_doc(&order).client.unwrap();
        assert_eq!(client.address, "شارع المدارس 4");
    }

    #[test]
    fn phone_falls_back_to_second_field_name() {
        let order = json!({ "id": "o-3", "client": { "name": "x", "phoneNumber": "0599" } });
        assert_eq!(order_invoice_doc(&order).client.unwrap().phone, "0599");
    }

    #[test]
    fn design_name_falls_back_and_items_keep_order() {
        let order = json!({
            "id": "o-4",
            "orderDesigns": [
                { "designName": "D1", "orderDesignItems": [{ "quantity": 1 }, { "quantity": 2 }] },
                { "name": "D2", "items": [{ "quantity": 3 }] },
                {}
            ]
        });
        let doc = order_invoice_doc(&order);
        assert_eq!(doc.designs.len(), 3);
        assert_eq!(doc.designs[0].name, "D1");
        assert_eq!(doc.designs[0].items.len(), 2);
        assert_eq!(doc.designs[1].name, "D2");
        assert_eq!(doc.designs[2].name, MISSING);
        assert_eq!(doc.item_count(), 3);
    }

    #[test]
    fn malformed_order_degrades_to_defaults() {
        let doc = order_invoice_doc(&json!({ "client": "not-an-object", "orderDesigns": 7 }));
        assert!(doc.order_id.is_empty());
        assert!(doc.client.is_none());
        assert!(doc.designs.is_empty());
        assert_eq!(doc.total_amount, 0.0);
    }

    #[test]
    fn display_number_falls_back_to_id() {
        let doc = order_invoice_doc(&json!({ "id": "77", "totalAmount": 5 }));
        assert_eq!(doc.display_number(), "77");
        let doc = order_invoice_doc(&json!({ "id": "77", "orderNumber": "A-9" }));
        assert_eq!(doc.display_number(), "A-9");
    }
}
