//! Client for the GoHighLevel (LeadConnector) REST API.

pub mod blogs;
pub mod client;
pub mod menus;
pub mod oauth;

pub use client::{GhlClient, GhlError};
pub use menus::{InstallOutcome, MenuEntry, MenuInstaller};
pub use oauth::AccessToken;
