//! CLI entry point: load or fetch order records, generate the invoice HTML
//! document, write it to disk, and optionally open it in the browser for
//! printing.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use printshop_invoices::api;
use printshop_invoices::config::CompanyProfile;
use printshop_invoices::invoice_renderer::render_invoice;
use printshop_invoices::normalize;

#[derive(Parser)]
#[command(name = "printshop-invoices", version)]
#[command(about = "Generate printable invoice HTML from print-shop order records")]
struct Cli {
    /// JSON file holding one order object or an array of orders
    #[arg(short, long, conflicts_with = "order_id")]
    input: Option<PathBuf>,

    /// Order id to fetch from the backend (repeatable; combined invoice
    /// when given more than once)
    #[arg(short = 'o', long = "order-id")]
    order_id: Vec<String>,

    /// Backend base URL (falls back to INVOICE_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Backend API key (falls back to INVOICE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Output HTML path; defaults to the suggested filename in the current
    /// directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Open the generated document in the default browser
    #[arg(long)]
    open: bool,
}

fn load_orders_from_file(path: &Path) -> Result<Vec<Value>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read order file {}", path.display()))?;
    let parsed: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parse order file {}", path.display()))?;
    match parsed {
        Value::Array(orders) => Ok(orders),
        Value::Object(_) => Ok(vec![parsed]),
        _ => bail!("order file must hold a JSON object or array"),
    }
}

async fn fetch_orders_from_backend(cli: &Cli) -> Result<Vec<Value>> {
    let backend_url = cli
        .backend_url
        .clone()
        .or_else(|| std::env::var("INVOICE_BACKEND_URL").ok())
        .context("backend URL required: pass --backend-url or set INVOICE_BACKEND_URL")?;
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("INVOICE_API_KEY").ok());
    let orders = api::fetch_orders(&backend_url, api_key.as_deref(), &cli.order_id).await?;
    Ok(orders)
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let raw_orders = if let Some(input) = &cli.input {
        load_orders_from_file(input)?
    } else if !cli.order_id.is_empty() {
        fetch_orders_from_backend(&cli).await?
    } else {
        bail!("nothing to do: pass --input or at least one --order-id");
    };

    let docs = normalize::order_invoice_docs(&raw_orders);
    let profile = CompanyProfile::from_env();

    let Some(render) = render_invoice(&docs, &profile) else {
        warn!("no orders to render, nothing written");
        return Ok(());
    };

    let path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.html", render.file_name)));
    fs::write(&path, &render.html)
        .with_context(|| format!("write invoice to {}", path.display()))?;
    info!(
        path = %path.display(),
        title = %render.title,
        orders = docs.len(),
        "invoice written"
    );

    if cli.open {
        let absolute = fs::canonicalize(&path)
            .with_context(|| format!("resolve path {}", path.display()))?;
        let url = format!("file://{}", absolute.display());
        webbrowser::open(&url).with_context(|| format!("open {url} in browser"))?;
    }

    Ok(())
}
