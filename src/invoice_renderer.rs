//! Invoice HTML renderer.
//!
//! Three layers composed bottom-up: `item_description` turns one line item
//! into its display string, `render_order_section` turns one order into HTML
//! fragments with a threaded row counter, and `render_invoice` assembles the
//! complete standalone right-to-left document (single- or multi-order
//! layout). Generation is pure string composition over already-normalized
//! input and never fails; missing fields were degraded to placeholders during
//! normalization.

use chrono::Utc;

use crate::config::CompanyProfile;
use crate::invoice_doc::{DesignItem, OrderInvoiceDoc};

/// CDN build of html2pdf.js used by the "save as PDF" button.
const HTML2PDF_CDN: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/html2pdf.js/0.10.1/html2pdf.bundle.min.js";

/// Currency suffix on the grand-total line.
const CURRENCY: &str = "₪";

// ---------------------------------------------------------------------------
// Escaping and formatting
// ---------------------------------------------------------------------------

/// Mandatory escaping boundary. Every interpolated string passes through
/// here; no call site concatenates raw input into markup.
fn esc(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn money(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "0.00".to_string()
    }
}

// ---------------------------------------------------------------------------
// Item description
// ---------------------------------------------------------------------------

/// One line-item display string: design name plus the size/color/fabric
/// attributes, e.g. `"قميص صيفي | L، أزرق، قطن"`.
pub fn item_description(design_name: &str, item: &DesignItem) -> String {
    format!(
        "{} | {}، {}، {}",
        design_name, item.size, item.color, item.fabric
    )
}

// ---------------------------------------------------------------------------
// Order section
// ---------------------------------------------------------------------------

/// Rendered fragments for one order, plus the next free row number so
/// numbering continues across orders in a combined document.
#[derive(Debug, Clone, Default)]
pub struct OrderSection {
    /// Order header line; populated in multi-order mode only.
    pub header_html: String,
    pub client_html: String,
    /// One `<tr>` per line item across all designs, numbered sequentially.
    pub rows_html: String,
    pub summary_html: String,
    /// Empty when the order carries no notes.
    pub notes_html: String,
    pub next_row: usize,
}

fn summary_line(label: &str, amount: f64) -> String {
    format!(
        "<div class=\"line\"><span>{}</span><span>{}</span></div>",
        esc(label),
        money(amount)
    )
}

fn client_block(doc: &OrderInvoiceDoc, multi_order: bool) -> String {
    let Some(client) = &doc.client else {
        return String::new();
    };
    if multi_order {
        format!(
            "<div class=\"client-inline\">العميل: {} · الهاتف: {}</div>",
            esc(&client.name),
            esc(&client.phone)
        )
    } else {
        format!(
            "<div class=\"client\">\
             <div class=\"line\"><span>العميل</span><span>{}</span></div>\
             <div class=\"line\"><span>الهاتف</span><span>{}</span></div>\
             <div class=\"line\"><span>العنوان</span><span>{}</span></div>\
             </div>",
            esc(&client.name),
            esc(&client.phone),
            esc(&client.address)
        )
    }
}

/// Render one order into HTML fragments.
///
/// `start_row` is the first row number to use; the returned `next_row` is
/// `start_row` plus the number of line items rendered, so a caller producing
/// a combined document can thread the counter across orders.
pub fn render_order_section(
    doc: &OrderInvoiceDoc,
    start_row: usize,
    multi_order: bool,
) -> OrderSection {
    let header_html = if multi_order {
        let date = doc
            .order_date
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| format!(" · {}", esc(v)))
            .unwrap_or_default();
        format!(
            "<div class=\"order-header\">طلب رقم {}{}</div>",
            esc(doc.display_number()),
            date
        )
    } else {
        String::new()
    };

    let mut rows_html = String::new();
    let mut row = start_row;
    for design in &doc.designs {
        for item in &design.items {
            rows_html.push_str(&format!(
                "<tr><td>{}</td><td class=\"desc\">{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                row,
                esc(&item_description(&design.name, item)),
                item.quantity,
                money(item.unit_price),
                money(item.total_price)
            ));
            row += 1;
        }
    }

    let mut summary_html = String::new();
    summary_html.push_str(&summary_line("المجموع الفرعي", doc.subtotal));
    if doc.discount_amount > 0.0 {
        summary_html.push_str(&summary_line("الخصم", doc.discount_amount));
    }
    if doc.delivery_fee > 0.0 {
        summary_html.push_str(&summary_line("رسوم التوصيل", doc.delivery_fee));
    }
    if doc.additional_price > 0.0 {
        summary_html.push_str(&summary_line("رسوم إضافية", doc.additional_price));
    }
    summary_html.push_str(&format!(
        "<div class=\"line total\"><strong>الإجمالي</strong><strong>{} {}</strong></div>",
        money(doc.total_amount),
        CURRENCY
    ));

    let notes_html = doc
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| format!("<div class=\"notes\">ملاحظات: {}</div>", esc(v)))
        .unwrap_or_default();

    OrderSection {
        header_html,
        client_html: client_block(doc, multi_order),
        rows_html,
        summary_html,
        notes_html,
        next_row: row,
    }
}

// ---------------------------------------------------------------------------
// Document assembly
// ---------------------------------------------------------------------------

/// A fully assembled invoice document.
#[derive(Debug, Clone)]
pub struct InvoiceRender {
    pub html: String,
    pub title: String,
    /// Suggested export file stem (no extension), safe for filesystem use.
    pub file_name: String,
}

fn file_name_component(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

fn suggested_file_name(docs: &[OrderInvoiceDoc]) -> String {
    let components: Vec<String> = docs
        .iter()
        .map(|doc| file_name_component(doc.display_number()))
        .filter(|c| !c.is_empty())
        .collect();
    if components.is_empty() {
        format!("invoice-{}", Utc::now().format("%Y%m%d-%H%M%S"))
    } else {
        format!("invoice-{}", components.join("-"))
    }
}

fn document_title(docs: &[OrderInvoiceDoc]) -> String {
    if docs.len() > 1 {
        format!("فاتورة مجمعة ({} طلبات)", docs.len())
    } else {
        let number = docs[0].display_number().trim();
        let number = if number.is_empty() { "-" } else { number };
        format!("فاتورة طلب {number}")
    }
}

fn items_table(rows_html: &str) -> String {
    format!(
        "<table class=\"items\"><thead><tr>\
         <th>#</th><th>الوصف</th><th>الكمية</th><th>سعر الوحدة</th><th>الإجمالي</th>\
         </tr></thead><tbody>{rows_html}</tbody></table>"
    )
}

fn letterhead(profile: &CompanyProfile) -> String {
    let mut out = String::from("<header class=\"letterhead\">");
    if let Some(url) = profile
        .logo_url
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        out.push_str(&format!(
            "<img class=\"logo\" src=\"{}\" alt=\"\"/>",
            esc(url)
        ));
    }
    out.push_str(&format!("<h1>{}</h1>", esc(&profile.name)));
    if let Some(address) = profile
        .address
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        out.push_str(&format!("<div class=\"meta\">{}</div>", esc(address)));
    }
    if let Some(phone) = profile
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        out.push_str(&format!("<div class=\"meta\">هاتف: {}</div>", esc(phone)));
    }
    out.push_str("</header>");
    out
}

fn document_shell(title: &str, file_name: &str, content: &str) -> String {
    let title = esc(title);
    let file_name = esc(file_name);
    format!(
        r#"<!DOCTYPE html>
<html dir="rtl" lang="ar">
<head>
<meta charset="UTF-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1.0"/>
<title>{title}</title>
<style>
body {{ font-family: "Segoe UI", Tahoma, sans-serif; margin: 0; padding: 16px; background: #fff; color: #111; }}
.actions {{ display: flex; gap: 8px; margin-bottom: 12px; }}
.actions button {{ padding: 6px 16px; font-size: 13px; cursor: pointer; }}
.letterhead {{ text-align: center; border-bottom: 2px solid #111; padding-bottom: 8px; margin-bottom: 12px; }}
.letterhead h1 {{ margin: 4px 0; font-size: 20px; }}
.letterhead .logo {{ max-height: 64px; }}
.letterhead .meta {{ color: #444; font-size: 12px; }}
h2.doc-title {{ text-align: center; font-size: 16px; margin: 8px 0 16px 0; }}
.order-block {{ border: 1px solid #bbb; border-radius: 6px; padding: 12px; margin-bottom: 16px; }}
.order-header {{ font-weight: bold; font-size: 14px; margin-bottom: 6px; }}
.client-inline {{ color: #333; font-size: 12px; margin-bottom: 6px; }}
.client {{ margin-bottom: 10px; }}
.line {{ display: flex; justify-content: space-between; gap: 12px; font-size: 13px; padding: 2px 0; }}
.line.total {{ border-top: 1px solid #111; margin-top: 4px; padding-top: 4px; font-size: 14px; }}
table.items {{ width: 100%; border-collapse: collapse; margin: 8px 0; font-size: 13px; }}
table.items th, table.items td {{ border: 1px solid #999; padding: 4px 6px; text-align: center; }}
table.items td.desc {{ text-align: right; }}
.summary {{ max-width: 320px; margin-right: auto; }}
.notes {{ color: #555; font-size: 12px; margin-top: 6px; }}
@media print {{ .actions {{ display: none; }} }}
</style>
<script src="{HTML2PDF_CDN}"></script>
</head>
<body>
<div class="actions">
<button onclick="window.print()">طباعة</button>
<button onclick="exportPdf()">حفظ PDF</button>
</div>
<div id="invoice-content" data-filename="{file_name}">{content}</div>
<script>
function exportPdf() {{
  var content = document.getElementById('invoice-content');
  html2pdf().set({{ filename: content.dataset.filename + '.pdf', margin: 8 }}).from(content).save();
}}
</script>
</body>
</html>"#
    )
}

/// Assemble the complete invoice document for one or more orders.
///
/// More than one order switches to the compact multi-order layout with
/// continuous row numbering across sections. Empty input is a defined no-op
/// and yields `None` ("nothing to display", not an error).
pub fn render_invoice(docs: &[OrderInvoiceDoc], profile: &CompanyProfile) -> Option<InvoiceRender> {
    if docs.is_empty() {
        return None;
    }
    let multi_order = docs.len() > 1;
    let title = document_title(docs);
    let file_name = suggested_file_name(docs);

    let mut content = letterhead(profile);
    content.push_str(&format!("<h2 class=\"doc-title\">{}</h2>", esc(&title)));

    let mut row = 1;
    for doc in docs {
        let section = render_order_section(doc, row, multi_order);
        row = section.next_row;
        let body = format!(
            "{}{}{}<div class=\"summary\">{}</div>{}",
            section.header_html,
            section.client_html,
            items_table(&section.rows_html),
            section.summary_html,
            section.notes_html
        );
        if multi_order {
            content.push_str(&format!("<section class=\"order-block\">{body}</section>"));
        } else {
            content.push_str(&body);
        }
    }

    Some(InvoiceRender {
        html: document_shell(&title, &file_name, &content),
        title,
        file_name,
    })
}
