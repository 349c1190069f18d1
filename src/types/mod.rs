//! Request and response types for the admin API.
//!
//! Request types carry their query schema; response types mirror the JSON
//! documents the gateway returns.

mod common;
mod requests;
mod responses;

pub use common::*;
pub use requests::*;
pub use responses::*;
