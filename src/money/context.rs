//! The selected display currency, shared between one writer and many readers

use std::sync::RwLock;

use log::{debug, info, warn};
use tokio::sync::{broadcast, watch, OnceCell};

use crate::error::{Error, Result};
use crate::localization::LocalizationApi;

use super::format::{format_price, Money};

/// Notifications published when the display currency changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyEvent {
    CurrencyChanged { currency: String },
}

/// Currency context: current selection, supported list and the detected
/// default for this session
#[derive(Debug)]
pub struct CurrencyContext {
    api: LocalizationApi,
    supported: RwLock<Vec<String>>,
    current: watch::Sender<String>,
    events: broadcast::Sender<CurrencyEvent>,
    detected: OnceCell<String>,
}

impl CurrencyContext {
    pub fn new(api: LocalizationApi, supported: Vec<String>, initial: &str) -> Self {
        let (current, _) = watch::channel(initial.trim().to_ascii_uppercase());
        let (events, _) = broadcast::channel(16);
        Self {
            api,
            supported: RwLock::new(supported.into_iter().map(|c| c.to_ascii_uppercase()).collect()),
            current,
            events,
            detected: OnceCell::new(),
        }
    }

    /// The selected currency code
    pub fn current(&self) -> String {
        self.current.borrow().clone()
    }

    pub fn supported(&self) -> Vec<String> {
        self.supported.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Follow the selected currency
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.current.subscribe()
    }

    /// Receive `CurrencyChanged` notifications
    pub fn events(&self) -> broadcast::Receiver<CurrencyEvent> {
        self.events.subscribe()
    }

    /// Replace the supported list with what the server offers
    pub async fn load_supported(&self) -> Result<Vec<String>> {
        let codes: Vec<String> = self
            .api
            .currencies()
            .await?
            .into_iter()
            .map(|c| c.code.to_ascii_uppercase())
            .collect();
        *self.supported.write().unwrap_or_else(|e| e.into_inner()) = codes.clone();
        Ok(codes)
    }

    /// Select a display currency.
    ///
    /// Returns `Ok(false)` when the code is already selected. Codes outside
    /// the supported list are rejected.
    pub fn set_currency(&self, code: &str) -> Result<bool> {
        let code = code.trim().to_ascii_uppercase();
        if !self.supported().contains(&code) {
            return Err(Error::validation(format!("Unsupported currency: {}", code)));
        }
        if *self.current.borrow() == code {
            return Ok(false);
        }

        self.current.send_replace(code.clone());
        info!("Display currency changed to {}", code);
        // Nobody listening is fine.
        let _ = self.events.send(CurrencyEvent::CurrencyChanged { currency: code });
        Ok(true)
    }

    /// Format a stored amount. The amount keeps its own currency; use
    /// `convert` first to show it in the selected one.
    pub fn format(&self, money: &Money) -> String {
        format_price(money.amount, &money.currency)
    }

    /// Convert with the server's current rate. Never cached.
    pub async fn convert(&self, money: &Money, to: &str) -> Result<Money> {
        let to = to.trim().to_ascii_uppercase();
        if money.currency == to {
            return Ok(money.clone());
        }
        let result = self.api.convert(money.amount, &money.currency, &to).await?;
        debug!(
            "Converted {} {} to {} {}",
            money.amount, money.currency, result.amount, result.currency
        );
        Ok(Money::new(result.amount, &result.currency))
    }

    /// Convert into the selected currency
    pub async fn convert_to_current(&self, money: &Money) -> Result<Money> {
        let current = self.current();
        self.convert(money, &current).await
    }

    /// Currency of the caller's location, looked up once per session
    pub async fn detect_default(&self) -> Result<String> {
        let code = self
            .detected
            .get_or_try_init(|| async {
                let location = self.api.detect_location().await?;
                Ok::<_, Error>(location.currency.to_ascii_uppercase())
            })
            .await?;
        Ok(code.clone())
    }

    /// Switch to the detected currency when it is supported
    pub async fn apply_detected_default(&self) -> Result<String> {
        let detected = self.detect_default().await?;
        match self.set_currency(&detected) {
            Ok(_) => {}
            Err(e) => warn!("Detected currency not applied: {}", e),
        }
        Ok(self.current())
    }
}
