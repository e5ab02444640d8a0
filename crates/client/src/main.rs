//! Ordering pad entry point.
//!
//! Usage:
//! - `pad` prints the persisted cart
//! - `pad clear` empties it
//! - `pad submit [remark]` places it as an order

use std::process::ExitCode;

use client::{ClientError, Config, PadApp, ReqwestTransport};
use snapshot_store::JsonFileStore;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

type App = PadApp<ReqwestTransport, JsonFileStore>;

fn print_summary(app: &App) {
    let session = app.cart.session();
    if session.table_id.is_unset() {
        println!("No table selected");
    } else {
        println!(
            "Table {} ({}), party of {}",
            session.table_label, session.table_id, session.party_size
        );
    }

    for item in app.cart.items() {
        let spec = item
            .spec_name
            .as_deref()
            .map(|s| format!(" [{s}]"))
            .unwrap_or_default();
        println!(
            "  {} x {}{} @ {} = {}",
            item.quantity,
            item.name,
            spec,
            item.unit_price,
            item.subtotal()
        );
    }
    println!(
        "{} item(s), total {}",
        app.cart.total_count(),
        app.cart.total_amount()
    );
}

async fn submit(app: &App, remark: Option<String>) -> Result<(), ClientError> {
    let order = app
        .loading
        .with_loading(app.http.orders().submit_cart(&app.cart, remark))
        .await?;
    println!("Order {} placed, total {}", order.order_no, order.total_amount);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Open cart, auth session and API client
    let app = match client::create_app(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to start");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        session_id = %app.cart.session_id(),
        revision = %app.cart.revision(),
        lines = app.cart.items().len(),
        "cart loaded"
    );

    // 3. Run the requested command
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => print_summary(&app),
        Some("clear") => {
            app.cart.clear_cart();
            println!("Cart cleared");
        }
        Some("submit") => {
            let remark = args.collect::<Vec<_>>().join(" ");
            let remark = (!remark.is_empty()).then_some(remark);
            if let Err(e) = submit(&app, remark).await {
                if let ClientError::Unauthorized { redirect_to } = &e {
                    eprintln!("Session expired, sign in again at {redirect_to}");
                } else {
                    eprintln!("Submit failed: {e}");
                }
                return ExitCode::FAILURE;
            }
        }
        Some(other) => {
            eprintln!("Unknown command {other:?}. Usage: pad [clear | submit [remark]]");
            return ExitCode::from(2);
        }
    }

    if app.cart.is_degraded() {
        tracing::warn!("cart changes were not saved to disk");
    }
    ExitCode::SUCCESS
}
