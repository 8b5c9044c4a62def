//! Search backend module
//!
//! Defines the `Codesearch` RPC contract, its HTTP transport and the
//! registry of configured backends.

mod client;
#[cfg(test)]
pub(crate) mod fake;
mod loader;
pub mod proto;
mod registry;
mod status;
mod traits;

pub use client::{HttpCodesearch, REQUEST_ID_HEADER, SEARCH_PATH};
pub use loader::BackendLoader;
pub use registry::{Backend, BackendRegistry, SelectError};
pub use status::{Code, RpcStatus};
pub use traits::*;
