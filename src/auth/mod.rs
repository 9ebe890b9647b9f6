//! Authorization results and the enumerations attached to them.
//!
//! A [`Grant`] is produced once per successful token exchange and never
//! changes afterwards. Its [`GrantType`] records which OAuth flow produced it
//! and drives mailbox selection in [`crate::mail::MailboxFactory`].

mod grant;
mod provider;

pub use grant::{Grant, GrantResponse};
pub use provider::{GrantType, Provider};
