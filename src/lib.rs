//! Restaurant menu admin client library
//!
//! Modules:
//! - `http`: Public and credentialed HTTP clients for the backend.
//! - `imaging`: Image files and the third-party image hosting client.
//! - `menu`: Menu item draft, record, listing and the submission workflow.
//! - `notify`: Toast-style notifications surfaced to the admin.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `PublicHttpClient`,
//! `SecureHttpClient`, `ImageHostClient`, and `MenuItemSubmissionWorkflow`.
pub mod config;
pub mod error;
pub mod http;
pub mod imaging;
pub mod menu;
pub mod notify;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use http::{CredentialedClient, PublicHttpClient, SecureHttpClient};
pub use imaging::{ImageFile, ImageHostClient};
pub use menu::{MenuItemDraft, MenuItemSubmissionWorkflow};
