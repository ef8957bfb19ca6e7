//! Travel Booking Client Library
//!
//! A Rust client for a travel booking backend: hotels, car hire, bookings,
//! drivers, payments and the admin surface, plus the headless controllers
//! (booking store, payment dispatcher, CRUD screens) a UI drives.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod cars;
pub mod checkout;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fetch;
pub mod hotels;
pub mod localization;
pub mod money;
pub mod notifications;
pub mod payments;
pub mod query;
pub mod settings;
pub mod store;
pub mod support;
pub mod token;
pub mod types;
pub mod uploads;
pub mod users;

use std::sync::Arc;

use tokio::sync::watch;

use crate::admin::ResourceScreen;
use crate::auth::AuthApi;
use crate::bookings::{AdminBookingsApi, BookingsApi};
use crate::cars::CarsApi;
use crate::checkout::PaymentDispatcher;
use crate::config::{ClientConfig, ClientOptions};
use crate::drivers::DriversApi;
use crate::error::Result;
use crate::fetch::HttpClient;
use crate::hotels::HotelsApi;
use crate::localization::LocalizationApi;
use crate::money::CurrencyContext;
use crate::notifications::NotificationsApi;
use crate::payments::PaymentsApi;
use crate::settings::SettingsApi;
use crate::store::{BookingStore, BookingsController};
use crate::support::SupportApi;
use crate::token::{FileStorage, MemoryStorage, TokenStorage, TokenStore};
use crate::uploads::UploadsApi;
use crate::users::UsersApi;

/// The main entry point for the travel booking client
#[derive(Debug)]
pub struct TravelClient {
    http: Arc<HttpClient>,
    auth: AuthApi,
    options: ClientOptions,
}

impl TravelClient {
    /// Create a new client with default options
    ///
    /// # Example
    ///
    /// ```
    /// use travel_booking_client::TravelClient;
    ///
    /// let client = TravelClient::new("https://api.example.com/api/v1").unwrap();
    /// assert!(!client.auth().is_authenticated());
    /// ```
    pub fn new(base_url: &str) -> Result<Self> {
        Self::new_with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use travel_booking_client::{TravelClient, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_request_timeout(Some(Duration::from_secs(30)));
    /// let client = TravelClient::new_with_options("https://api.example.com", options).unwrap();
    /// ```
    pub fn new_with_options(base_url: &str, options: ClientOptions) -> Result<Self> {
        let storage: Arc<dyn TokenStorage> = match &options.token_storage_path {
            Some(path) => Arc::new(FileStorage::new(path.clone())),
            None => Arc::new(MemoryStorage::new()),
        };
        let token = Arc::new(TokenStore::new(storage, &options.token_storage_key));
        let http = Arc::new(HttpClient::new(base_url, &options, token)?);

        let (session, _) = watch::channel(AuthApi::initial_state(&http));
        let auth = AuthApi::new(http.clone(), Arc::new(session));

        Ok(Self { http, auth, options })
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        Self::new_with_options(&config.base_url, config.options)
    }

    /// Build from `TRAVEL_API_URL` (and `TRAVEL_TOKEN_PATH` when set)
    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// The bearer token shared by every resource
    pub fn token(&self) -> &Arc<TokenStore> {
        self.http.token()
    }

    /// Sign-in, registration and the current session
    pub fn auth(&self) -> &AuthApi {
        &self.auth
    }

    pub fn hotels(&self) -> HotelsApi {
        HotelsApi::new(self.http.clone())
    }

    pub fn cars(&self) -> CarsApi {
        CarsApi::new(self.http.clone())
    }

    /// Bookings of the signed-in customer
    pub fn bookings(&self) -> BookingsApi {
        BookingsApi::new(self.http.clone())
    }

    pub fn admin_bookings(&self) -> AdminBookingsApi {
        AdminBookingsApi::new(self.http.clone())
    }

    pub fn drivers(&self) -> DriversApi {
        DriversApi::new(self.http.clone())
    }

    pub fn payments(&self) -> PaymentsApi {
        PaymentsApi::new(self.http.clone())
    }

    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.http.clone())
    }

    pub fn settings(&self) -> SettingsApi {
        SettingsApi::new(self.http.clone())
    }

    pub fn notifications(&self) -> NotificationsApi {
        NotificationsApi::new(self.http.clone())
    }

    pub fn localization(&self) -> LocalizationApi {
        LocalizationApi::new(self.http.clone())
    }

    pub fn support(&self) -> SupportApi {
        SupportApi::new(self.http.clone())
    }

    pub fn uploads(&self) -> UploadsApi {
        UploadsApi::new(self.http.clone())
    }

    /// A currency context starting at `initial`
    pub fn currency_context(&self, supported: Vec<String>, initial: &str) -> CurrencyContext {
        CurrencyContext::new(self.localization(), supported, initial)
    }

    /// Controller for the admin bookings screen, with a fresh store
    pub fn bookings_controller(&self) -> BookingsController {
        BookingsController::new(self.admin_bookings(), Arc::new(BookingStore::new()))
    }

    /// A checkout that submits through the payments endpoints
    pub fn payment_dispatcher(&self) -> PaymentDispatcher {
        PaymentDispatcher::new(Arc::new(self.payments()))
    }

    pub fn drivers_screen(&self) -> ResourceScreen<DriversApi> {
        ResourceScreen::new(self.drivers())
    }

    pub fn hotels_screen(&self) -> ResourceScreen<HotelsApi> {
        ResourceScreen::new(self.hotels())
    }

    pub fn users_screen(&self) -> ResourceScreen<UsersApi> {
        ResourceScreen::new(self.users())
    }

    pub fn templates_screen(&self) -> ResourceScreen<NotificationsApi> {
        ResourceScreen::new(self.notifications())
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::admin::{Action, ListState, ModalMode, ModalState, Permissions, ResourceScreen};
    pub use crate::checkout::{CheckoutState, PaymentDetails, PaymentDispatcher, PaymentIntent};
    pub use crate::config::{ClientConfig, ClientOptions};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::money::{format_price, CurrencyContext, CurrencyEvent, Money};
    pub use crate::payments::Gateway;
    pub use crate::store::{BookingStore, BookingsController, LoadState};
    pub use crate::types::{BulkDeleteResult, Id, Page};
    pub use crate::TravelClient;
}
