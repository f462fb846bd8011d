//! Labstore
//!
//! Client-side entity stores for a laboratory-operations REST backend:
//! instruments, usage logs, samples and suppliers are cached in memory,
//! reconciled against the gateway through CRUD calls, and decorated with
//! derived status (calibration urgency, session duration, status badges).

pub mod config;
pub mod derived;
pub mod error;
pub mod gateway;
pub mod models;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use gateway::{Credential, Gateway, HttpGateway, ListFilter, RequestContext};
pub use store::{Confirmation, EntityStore, Stores};
