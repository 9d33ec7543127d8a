//! Backend for the consultancy marketing site: lead intake and scoring,
//! ticket handling, content, subscriptions, admin auth, and the chatbot.

pub mod admin;
pub mod assistant;
pub mod auth;
pub mod config;
pub mod content;
pub mod error;
pub mod notifications;
pub mod pagination;
pub mod storage;
pub mod subscriptions;
pub mod telemetry;
pub mod validation;
pub mod workflows;

pub use config::AppConfig;
pub use error::AppError;
