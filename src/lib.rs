//! nylas-mail - Nylas v3 client for OAuth grants and mailbox access
//!
//! This crate exchanges OAuth2 authorization codes and refresh tokens for
//! [`Grant`]s and exposes the grant's mailbox through the [`mail::Mailbox`]
//! trait. The grant's [`GrantType`] decides whether requests go through the
//! session-scoped online mailbox or the grant-bound offline mailbox.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod mail;
pub mod transport;

pub use auth::{Grant, GrantType, Provider};
pub use client::NylasClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
