//! Checkout commands: hand the reconciled cart off.
//!
//! `message` composes the prefilled WhatsApp text and its deep link;
//! `pay` first creates a payment session so the message carries the
//! collaborator's reference. Both refuse an empty reconciled cart
//! before doing anything else - no network call, no message.

use std::error::Error;

use tracing::info;
use warung_engine::config::EngineConfig;
use warung_engine::message;
use warung_engine::order::{self, CheckoutOrder, OrderIdGenerator, OrderLog};
use warung_engine::payment::PaymentClient;

use super::session;

fn build_checkout(config: &EngineConfig) -> Result<CheckoutOrder, Box<dyn Error>> {
    let catalog = session::load_catalog(config)?;
    let store = session::open_cart(config);
    let reconciled = store.cart().reconcile(&catalog);
    let mut ids = OrderIdGenerator::new();
    Ok(order::serialize_order(&reconciled, &mut ids)?)
}

/// Compose the WhatsApp order message and deep link.
///
/// # Errors
///
/// Returns an error when the reconciled cart is empty or no catalog is
/// loaded.
pub fn message() -> Result<(), Box<dyn Error>> {
    let config = session::config()?;
    let checkout = build_checkout(&config)?;

    let text = message::compose(&config.wa_prefix, &checkout.lines, "QRIS", &checkout.order);
    let link = message::wa_link(&config.wa_number, &text);

    info!("order {}", checkout.order.id);
    info!("message:\n{text}");
    info!("deep link: {link}");
    Ok(())
}

/// Create a payment session, then compose the message with its
/// reference attached.
///
/// # Errors
///
/// Returns an error when the cart is empty, payment is not configured,
/// or the payment collaborator fails. The cart stays as it was in
/// every case.
pub async fn pay() -> Result<(), Box<dyn Error>> {
    let config = session::config()?;
    let payment_config = config
        .payment
        .as_ref()
        .ok_or("payment is not configured; set WARUNG_PAYMENT_URL")?;

    // Empty-cart check happens here, before any network traffic.
    let checkout = build_checkout(&config)?;

    let client = PaymentClient::new(payment_config)?;
    let session = client.create_session(&checkout.payload).await?;

    let mut log = OrderLog::new();
    log.record(checkout.order.clone());
    if let Some(reference) = &session.reference {
        log.set_reference(reference.clone());
    }
    // The log always holds the order just recorded.
    let order = log.latest().unwrap_or(&checkout.order);

    let text = message::compose(&config.wa_prefix, &checkout.lines, "QRIS", order);
    let link = message::wa_link(&config.wa_number, &text);

    info!("order {}", order.id);
    info!("QR: {}", session.qr_url);
    if let Some(reference) = &order.reference {
        info!("reference: {reference}");
    }
    info!("message:\n{text}");
    info!("deep link: {link}");
    Ok(())
}
