pub mod catalog;
pub mod config;
pub mod domain;
pub mod export;
pub mod views;

pub use catalog::{Catalog, CatalogError};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::client::{ClientInfo, ClientInfoUpdate};
pub use domain::menu::{MenuItem, MenuItemId};
pub use domain::quote::{DuplicatePolicy, LineId, Quote, QuoteId, SelectedItem};
pub use views::QuoteTotals;
