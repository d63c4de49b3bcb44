//! Xero REST API collaborator: invoice creation and organisation
//! lookup.
//!
//! The transformation core never performs I/O; this module is the
//! narrow surface it hands its documents to. OAuth token acquisition
//! and refresh live outside this crate — callers supply a valid access
//! token and tenant id.

mod client;
mod wire;

pub use client::*;
pub use wire::*;
