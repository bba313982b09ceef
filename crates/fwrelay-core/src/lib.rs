//! fwrelay-core - Core traits and types for the firmware lookup relay
//!
//! This crate holds the data model shared by every front end, the
//! [`VendorApi`] abstraction over the vendor's HTTP endpoints, and the
//! [`LookupChain`] that turns a serial number and/or model code into a
//! [`LookupResult`].
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use fwrelay_core::{DeviceLookup, LookupChain, LookupQuery};
//!
//! let chain = LookupChain::new(Arc::new(vendor_client));
//! let result = chain.resolve(&LookupQuery::by_sn("HA29117A")).await;
//! ```

pub mod error;
pub mod lookup;
pub mod models;
pub mod query;
pub mod vendor;

pub use error::{ErrorKind, LookupError, VendorError, VendorResult, VendorService};
pub use lookup::{DeviceLookup, LookupChain, Resolution};
pub use models::*;
pub use query::LookupQuery;
pub use vendor::{OtaRequest, VendorApi};
