//! Checkout states and inputs

use std::fmt;
use std::sync::Arc;

use crate::error::Error;
use crate::money::Money;
use crate::payments::{CardDetails, Gateway, PaymentResponse};
use crate::types::Id;
use crate::uploads::FileUpload;

/// What is being paid for
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub booking_id: Id,
    pub amount: Money,
    /// Where redirect-based gateways send the customer back to
    pub return_url: Option<String>,
}

impl PaymentIntent {
    pub fn new(booking_id: Id, amount: Money) -> Self {
        Self {
            booking_id,
            amount,
            return_url: None,
        }
    }

    pub fn with_return_url(mut self, url: &str) -> Self {
        self.return_url = Some(url.to_string());
        self
    }
}

/// Gateway-specific input collected by the payment form
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentDetails {
    Card(CardDetails),
    /// Nothing to collect; the provider's page takes over
    Redirect,
    BankTransfer {
        reference: String,
        proof: Option<FileUpload>,
    },
}

impl PaymentDetails {
    pub(crate) fn fits(&self, gateway: Gateway) -> bool {
        match self {
            PaymentDetails::Card(_) => gateway == Gateway::Stripe,
            PaymentDetails::Redirect => gateway.is_redirect(),
            PaymentDetails::BankTransfer { .. } => gateway == Gateway::BankTransfer,
        }
    }
}

/// A failed attempt: the message shown to the customer and the error
/// that caused it
#[derive(Debug, Clone)]
pub struct PaymentFailure {
    pub message: String,
    pub source: Option<Arc<Error>>,
}

impl PartialEq for PaymentFailure {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl fmt::Display for PaymentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    SelectingGateway(Gateway),
    InProgress(Gateway),
    Succeeded(PaymentResponse),
    Failed { gateway: Gateway, failure: PaymentFailure },
}

impl Default for CheckoutState {
    fn default() -> Self {
        CheckoutState::SelectingGateway(Gateway::default())
    }
}

impl CheckoutState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, CheckoutState::InProgress(_))
    }

    /// Gateway currently chosen, if the flow has not completed
    pub fn gateway(&self) -> Option<Gateway> {
        match self {
            CheckoutState::SelectingGateway(g) | CheckoutState::InProgress(g) => Some(*g),
            CheckoutState::Failed { gateway, .. } => Some(*gateway),
            CheckoutState::Succeeded(_) => None,
        }
    }
}

/// Message shown when a gateway's submission fails
pub fn failure_message(gateway: Gateway) -> &'static str {
    match gateway {
        Gateway::Stripe => "Card payment failed. Please check your card details and try again.",
        Gateway::Paystack => "Failed to initialize Paystack payment. Please try again.",
        Gateway::Flutterwave => "Failed to initialize Flutterwave payment. Please try again.",
        Gateway::Paypal => "Failed to initialize PayPal payment. Please try again.",
        Gateway::BankTransfer => "Failed to submit bank transfer details. Please try again.",
    }
}
