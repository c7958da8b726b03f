//! Inventory client core
//!
//! HTTP gateway over the inventory REST API plus the view-side logic: the
//! form and detail workflows and the controller owning the published
//! product collection. Frontends plug in by implementing the dialog and
//! notifier seams.

pub mod config;
pub mod controller;
pub mod detail;
pub mod error;
pub mod form;
pub mod gateway;
pub mod http;
pub mod state;

pub use config::ClientConfig;
pub use controller::{InventoryController, Notifier};
pub use detail::{DetailDialog, DetailState};
pub use error::{ClientError, ClientResult};
pub use form::{FormDialog, FormErrors, FormRequest, FormValues};
pub use gateway::{HttpProductGateway, ProductGateway};
pub use http::{HttpClient, NetworkHttpClient};
pub use state::InventoryState;
