//! Normalized invoice view models.
//!
//! Read-only projections of backend order records: built once by the
//! `normalize` module, consumed by the renderer, then discarded. Money
//! fields are carried exactly as received; `total_amount` in particular is
//! authoritative on the backend and is never recomputed here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// One purchasable line item. Size/color/fabric are already resolved to
/// display strings (`"-"` when the backend record carried neither the nested
/// entity nor the legacy flat field).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DesignItem {
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub total_price: f64,
    pub size: String,
    pub color: String,
    pub fabric: String,
}

/// A named grouping of line items within an order.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DesignGroup {
    pub name: String,
    #[serde(default)]
    pub items: Vec<DesignItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderInvoiceDoc {
    pub order_id: String,
    #[serde(default)]
    pub order_number: String,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub client: Option<ClientInfo>,
    #[serde(default)]
    pub designs: Vec<DesignGroup>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default)]
    pub delivery_fee: f64,
    #[serde(default)]
    pub additional_price: f64,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl OrderInvoiceDoc {
    /// Order number for display, falling back to the raw id.
    pub fn display_number(&self) -> &str {
        if self.order_number.trim().is_empty() {
            &self.order_id
        } else {
            &self.order_number
        }
    }

    /// Total line items across every design in the order.
    pub fn item_count(&self) -> usize {
        self.designs.iter().map(|d| d.items.len()).sum()
    }
}
