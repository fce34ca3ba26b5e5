//! Messaging handoff: the prefilled order message and its deep link.
//!
//! The whole handoff is a single formatted text block destined for a
//! message composer; nothing downstream needs structured fields. The
//! template ends with blank `Nama:` / `Catatan:` prompts the visitor
//! fills in before sending.

use crate::order::Order;

/// Default greeting line when the shop configures none.
pub const DEFAULT_TEXT_PREFIX: &str = "Halo admin, saya mau order:\n\n";

/// Compose the order message.
///
/// Prefix, one line per resolved entry, total, payment method, the
/// order id and payment reference when present, then the name/notes
/// prompts.
#[must_use]
pub fn compose(prefix: &str, lines: &[String], method: &str, order: &Order) -> String {
    let mut message = String::new();
    message.push_str(prefix);
    message.push_str(&lines.join("\n"));
    message.push_str(&format!("\n\nTotal: {}", order.amount));
    message.push_str(&format!("\nPembayaran: {method}"));
    message.push_str(&format!("\nOrder: {}", order.id));
    if let Some(reference) = &order.reference {
        message.push_str(&format!("\nRef: {reference}"));
    }
    message.push_str("\n\nNama:\nCatatan:");
    message
}

/// Build the `wa.me` deep link carrying the message.
///
/// `number` is the shop's WhatsApp number, digits only.
#[must_use]
pub fn wa_link(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use warung_core::{OrderId, Price};

    fn order(reference: Option<&str>) -> Order {
        Order {
            id: OrderId::new("ORD-7"),
            amount: Price::new(12_500),
            reference: reference.map(ToString::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_compose_without_reference() {
        let lines = vec![
            "- Gula Pasir x2 = Rp10.000".to_string(),
            "- Kopi x1 = Rp2.500".to_string(),
        ];
        let message = compose(DEFAULT_TEXT_PREFIX, &lines, "QRIS", &order(None));
        assert_eq!(
            message,
            "Halo admin, saya mau order:\n\n\
             - Gula Pasir x2 = Rp10.000\n\
             - Kopi x1 = Rp2.500\n\n\
             Total: Rp12.500\n\
             Pembayaran: QRIS\n\
             Order: ORD-7\n\n\
             Nama:\nCatatan:"
        );
    }

    #[test]
    fn test_compose_with_reference() {
        let lines = vec!["- Gula x1 = Rp5.000".to_string()];
        let message = compose(DEFAULT_TEXT_PREFIX, &lines, "QRIS", &order(Some("QR-9")));
        assert!(message.contains("Order: ORD-7\nRef: QR-9\n\nNama:"));
    }

    #[test]
    fn test_wa_link_is_url_encoded() {
        let link = wa_link("628123456789", "Halo admin,\n\nTotal: Rp5.000");
        assert!(link.starts_with("https://wa.me/628123456789?text="));
        assert!(!link.contains(' '));
        assert!(!link.contains('\n'));
        assert!(link.contains("Halo%20admin%2C%0A%0ATotal%3A%20Rp5.000"));
    }
}
