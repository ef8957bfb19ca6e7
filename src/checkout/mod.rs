//! Payment Gateway Dispatcher.
//!
//! Every gateway ends in the same `process` call with a `gateway`
//! discriminator; only the payload differs. Bank transfers upload their
//! proof first.

mod types;

use std::fmt;
use std::sync::Arc;

use log::{error, info};
use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::payments::{Gateway, PaymentProcessor, PaymentRequest, PaymentResponse};

pub use types::*;

type SuccessCallback = Box<dyn Fn(&PaymentResponse) + Send + Sync>;
type ErrorCallback = Box<dyn Fn(&str) + Send + Sync>;

pub struct PaymentDispatcher {
    processor: Arc<dyn PaymentProcessor>,
    state: watch::Sender<CheckoutState>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl fmt::Debug for PaymentDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentDispatcher")
            .field("state", &*self.state.borrow())
            .finish()
    }
}

impl PaymentDispatcher {
    pub fn new(processor: Arc<dyn PaymentProcessor>) -> Self {
        let (state, _) = watch::channel(CheckoutState::default());
        Self {
            processor,
            state,
            on_success: None,
            on_error: None,
        }
    }

    /// Called with the server response after a successful submission
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&PaymentResponse) + Send + Sync + 'static,
    {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Called with the customer-facing message after a failed submission
    pub fn on_error<F>(mut self, callback: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_error = Some(Box::new(callback));
        self
    }

    pub fn state(&self) -> CheckoutState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CheckoutState> {
        self.state.subscribe()
    }

    /// Choose a gateway. Not allowed while a submission is running.
    pub fn select_gateway(&self, gateway: Gateway) -> Result<()> {
        let changed = self.state.send_if_modified(|state| {
            if state.is_in_progress() {
                return false;
            }
            *state = CheckoutState::SelectingGateway(gateway);
            true
        });
        if changed {
            Ok(())
        } else {
            Err(Error::validation("A payment is already in progress"))
        }
    }

    /// Back to gateway selection, keeping the last gateway
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            let gateway = state.gateway().unwrap_or_default();
            *state = CheckoutState::SelectingGateway(gateway);
        });
    }

    /// Submit the payment through the selected gateway.
    ///
    /// Local checks run first and leave the state untouched when they fail.
    /// There is no automatic retry; after a failure the caller submits again.
    pub async fn submit(&self, intent: &PaymentIntent, details: PaymentDetails) -> Result<PaymentResponse> {
        let gateway = match &*self.state.borrow() {
            CheckoutState::SelectingGateway(g) => *g,
            CheckoutState::Failed { gateway, .. } => *gateway,
            CheckoutState::InProgress(_) => {
                return Err(Error::validation("A payment is already in progress"))
            }
            CheckoutState::Succeeded(_) => {
                return Err(Error::validation("This payment has already been completed"))
            }
        };

        validate(gateway, intent, &details)?;

        let started = self.state.send_if_modified(|state| {
            if state.is_in_progress() {
                return false;
            }
            *state = CheckoutState::InProgress(gateway);
            true
        });
        if !started {
            return Err(Error::validation("A payment is already in progress"));
        }

        match self.dispatch(gateway, intent, details).await {
            Ok(response) => {
                info!(
                    "Payment for booking {} via {} accepted",
                    intent.booking_id,
                    gateway.as_str()
                );
                self.state.send_replace(CheckoutState::Succeeded(response.clone()));
                if let Some(callback) = &self.on_success {
                    callback(&response);
                }
                Ok(response)
            }
            Err(e) => {
                error!(
                    "Payment for booking {} via {} failed: {}",
                    intent.booking_id,
                    gateway.as_str(),
                    e
                );
                let message = failure_message(gateway);
                let source = Arc::new(e);
                self.state.send_replace(CheckoutState::Failed {
                    gateway,
                    failure: PaymentFailure {
                        message: message.to_string(),
                        source: Some(source.clone()),
                    },
                });
                if let Some(callback) = &self.on_error {
                    callback(message);
                }
                Err(Error::Payment {
                    message: message.to_string(),
                    source,
                })
            }
        }
    }

    async fn dispatch(
        &self,
        gateway: Gateway,
        intent: &PaymentIntent,
        details: PaymentDetails,
    ) -> Result<PaymentResponse> {
        let mut request = PaymentRequest {
            booking_id: intent.booking_id,
            gateway,
            amount: intent.amount.amount,
            currency: intent.amount.currency.clone(),
            payment_method: gateway.as_str().to_string(),
            card: None,
            reference_number: None,
            proof_of_payment_url: None,
            return_url: None,
        };

        match details {
            PaymentDetails::Card(card) => {
                request.payment_method = "card".to_string();
                request.card = Some(card);
            }
            PaymentDetails::Redirect => {
                request.return_url = intent.return_url.clone();
            }
            PaymentDetails::BankTransfer { reference, proof } => {
                let proof = proof.ok_or_else(|| Error::validation(PROOF_REQUIRED))?;
                let uploaded = self.processor.upload_proof(proof).await?;
                request.reference_number = Some(reference.trim().to_string());
                request.proof_of_payment_url = Some(uploaded.url);
            }
        }

        self.processor.process(&request).await
    }
}

const PROOF_REQUIRED: &str = "Please upload proof of payment";

fn validate(gateway: Gateway, intent: &PaymentIntent, details: &PaymentDetails) -> Result<()> {
    if !intent.amount.amount.is_finite() || intent.amount.amount <= 0.0 {
        return Err(Error::validation("Invalid payment amount"));
    }
    if intent.amount.currency.is_empty() {
        return Err(Error::validation("Payment currency is missing"));
    }
    if !details.fits(gateway) {
        return Err(Error::validation(format!(
            "Payment details do not match the selected method ({})",
            gateway.display_name()
        )));
    }

    match details {
        PaymentDetails::Card(card) => {
            let fields = [
                &card.card_number,
                &card.expiry_month,
                &card.expiry_year,
                &card.cvc,
                &card.cardholder_name,
            ];
            if fields.iter().any(|f| f.trim().is_empty()) {
                return Err(Error::validation("Please fill in all card details"));
            }
        }
        PaymentDetails::Redirect => {}
        PaymentDetails::BankTransfer { reference, proof } => {
            if reference.trim().is_empty() {
                return Err(Error::validation("Please enter the transfer reference number"));
            }
            match proof {
                Some(file) if !file.is_empty() => {}
                _ => return Err(Error::validation(PROOF_REQUIRED)),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::error::ErrorFlavor;
    use crate::money::Money;
    use crate::payments::CardDetails;
    use crate::uploads::{FileUpload, UploadedFile};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeProcessor {
        fail: bool,
        processed: Mutex<Vec<PaymentRequest>>,
        uploads: AtomicUsize,
    }

    #[async_trait]
    impl PaymentProcessor for FakeProcessor {
        async fn process(&self, request: &PaymentRequest) -> Result<PaymentResponse> {
            self.processed.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(Error::Api(ApiError::from_response(
                    402,
                    Some("Payment Required"),
                    br#"{"detail": "card declined"}"#,
                    ErrorFlavor::Json,
                )));
            }
            Ok(PaymentResponse {
                id: Some(1),
                status: Some("pending".to_string()),
                reference: Some("PAY-1".to_string()),
                redirect_url: None,
                message: None,
            })
        }

        async fn upload_proof(&self, file: FileUpload) -> Result<UploadedFile> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            Ok(UploadedFile {
                url: format!("/uploads/{}", file.file_name),
                filename: Some(file.file_name),
            })
        }
    }

    fn intent() -> PaymentIntent {
        PaymentIntent::new(7, Money::new(250.0, "usd"))
    }

    fn card() -> CardDetails {
        CardDetails {
            card_number: "4242424242424242".to_string(),
            expiry_month: "12".to_string(),
            expiry_year: "2030".to_string(),
            cvc: "123".to_string(),
            cardholder_name: "Ada Obi".to_string(),
        }
    }

    #[tokio::test]
    async fn bank_transfer_without_proof_is_rejected_locally() {
        let processor = Arc::new(FakeProcessor::default());
        let dispatcher = PaymentDispatcher::new(processor.clone());
        dispatcher.select_gateway(Gateway::BankTransfer).unwrap();

        let err = dispatcher
            .submit(
                &intent(),
                PaymentDetails::BankTransfer {
                    reference: "TRX-99".to_string(),
                    proof: None,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.user_message(""), "Please upload proof of payment");
        assert!(processor.processed.lock().unwrap().is_empty());
        assert_eq!(processor.uploads.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.state(), CheckoutState::SelectingGateway(Gateway::BankTransfer));
    }

    #[tokio::test]
    async fn bank_transfer_uploads_proof_then_processes() {
        let processor = Arc::new(FakeProcessor::default());
        let dispatcher = PaymentDispatcher::new(processor.clone());
        dispatcher.select_gateway(Gateway::BankTransfer).unwrap();

        dispatcher
            .submit(
                &intent(),
                PaymentDetails::BankTransfer {
                    reference: " TRX-99 ".to_string(),
                    proof: Some(FileUpload::new("receipt.png", vec![1, 2, 3])),
                },
            )
            .await
            .unwrap();

        let processed = processor.processed.lock().unwrap();
        assert_eq!(processed.len(), 1);
        assert_eq!(processed[0].gateway, Gateway::BankTransfer);
        assert_eq!(processed[0].reference_number.as_deref(), Some("TRX-99"));
        assert_eq!(processed[0].proof_of_payment_url.as_deref(), Some("/uploads/receipt.png"));
        assert_eq!(processor.uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn card_success_runs_callback() {
        let processor = Arc::new(FakeProcessor::default());
        let seen = Arc::new(Mutex::new(None));
        let sink = seen.clone();
        let dispatcher = PaymentDispatcher::new(processor.clone())
            .on_success(move |response| *sink.lock().unwrap() = response.reference.clone());

        assert_eq!(dispatcher.state(), CheckoutState::SelectingGateway(Gateway::Stripe));
        dispatcher.submit(&intent(), PaymentDetails::Card(card())).await.unwrap();

        assert!(matches!(dispatcher.state(), CheckoutState::Succeeded(_)));
        assert_eq!(seen.lock().unwrap().as_deref(), Some("PAY-1"));
        let processed = processor.processed.lock().unwrap();
        assert_eq!(processed[0].payment_method, "card");
        assert_eq!(processed[0].currency, "USD");
    }

    #[tokio::test]
    async fn failure_shows_gateway_message_and_keeps_the_cause() {
        let processor = Arc::new(FakeProcessor {
            fail: true,
            ..Default::default()
        });
        let shown = Arc::new(Mutex::new(String::new()));
        let sink = shown.clone();
        let dispatcher =
            PaymentDispatcher::new(processor).on_error(move |msg| *sink.lock().unwrap() = msg.to_string());
        dispatcher.select_gateway(Gateway::Paystack).unwrap();

        let err = dispatcher.submit(&intent(), PaymentDetails::Redirect).await.unwrap_err();

        let expected = failure_message(Gateway::Paystack);
        assert_eq!(*shown.lock().unwrap(), expected);
        assert_eq!(err.to_string(), expected);
        match dispatcher.state() {
            CheckoutState::Failed { gateway, failure } => {
                assert_eq!(gateway, Gateway::Paystack);
                assert_eq!(failure.source.unwrap().status(), Some(402));
            }
            other => panic!("unexpected state {:?}", other),
        }

        dispatcher.reset();
        assert_eq!(dispatcher.state(), CheckoutState::SelectingGateway(Gateway::Paystack));
    }

    #[tokio::test]
    async fn details_must_match_gateway() {
        let dispatcher = PaymentDispatcher::new(Arc::new(FakeProcessor::default()));
        let err = dispatcher.submit(&intent(), PaymentDetails::Redirect).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let mut incomplete = card();
        incomplete.cvc.clear();
        let err = dispatcher
            .submit(&intent(), PaymentDetails::Card(incomplete))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(""), "Please fill in all card details");
    }
}
