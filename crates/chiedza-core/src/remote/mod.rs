//! Hosted backend access.
//!
//! [`Client`] speaks the Supabase-compatible HTTP protocol: password and
//! refresh-token grants plus logout on the auth API, and select / insert /
//! update on the table API. The current session is cached on disk and
//! auth changes are pushed to every [`Subscription`].

mod client;
mod listeners;
mod session;

pub use client::{Client, error_reason};
pub use listeners::{ListenerRegistry, SessionChange, Subscription};
pub use session::{RemoteSession, RemoteUser, Role, SessionCache, UserMetadata, mask_token};
