//! Types for payments

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Id;

/// Payment providers the backend integrates with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gateway {
    #[default]
    Stripe,
    Paystack,
    Flutterwave,
    Paypal,
    BankTransfer,
}

impl Gateway {
    pub const ALL: [Gateway; 5] = [
        Gateway::Stripe,
        Gateway::Paystack,
        Gateway::Flutterwave,
        Gateway::Paypal,
        Gateway::BankTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gateway::Stripe => "stripe",
            Gateway::Paystack => "paystack",
            Gateway::Flutterwave => "flutterwave",
            Gateway::Paypal => "paypal",
            Gateway::BankTransfer => "bank_transfer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Gateway::Stripe => "Credit/Debit Card",
            Gateway::Paystack => "Paystack",
            Gateway::Flutterwave => "Flutterwave",
            Gateway::Paypal => "PayPal",
            Gateway::BankTransfer => "Bank Transfer",
        }
    }

    /// Gateways where the customer finishes on the provider's page
    pub fn is_redirect(&self) -> bool {
        matches!(self, Gateway::Paystack | Gateway::Flutterwave | Gateway::Paypal)
    }
}

/// Raw card fields for the card-present flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CardDetails {
    pub card_number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub cvc: String,
    pub cardholder_name: String,
}

/// Body of the generic "process payment" call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub booking_id: Id,
    pub gateway: Gateway,
    pub amount: f64,
    pub currency: String,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof_of_payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}

/// What the backend answers to a payment attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(default, alias = "payment_id")]
    pub id: Option<Id>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    /// Set by redirect-based gateways
    #[serde(default, alias = "authorization_url", alias = "payment_url")]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A recorded payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Id,
    pub booking_id: Id,
    pub gateway: Gateway,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    pub status: String,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default, alias = "proof_of_payment_url")]
    pub proof_of_payment: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Payment {
    pub fn total(&self) -> Money {
        Money::new(self.amount, &self.currency)
    }
}

/// A gateway as configured on the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayInfo {
    pub gateway: Gateway,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub currencies: Vec<String>,
    /// Account details shown for bank transfers
    #[serde(default)]
    pub instructions: Option<String>,
}
