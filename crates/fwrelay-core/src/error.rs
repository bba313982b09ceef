//! Error types for vendor calls and the lookup chain

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for vendor endpoint calls
pub type VendorResult<T> = Result<T, VendorError>;

/// The three vendor endpoints the relay talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorService {
    /// Serial number to device metadata
    MachineInfo,
    /// Model code to full flash packages
    FlashPackage,
    /// Incremental OTA update query
    Ota,
}

impl fmt::Display for VendorService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VendorService::MachineInfo => "device info lookup",
            VendorService::FlashPackage => "flash package lookup",
            VendorService::Ota => "OTA lookup",
        };
        f.write_str(name)
    }
}

/// Errors raised while talking to a vendor endpoint
#[derive(Debug, Error)]
pub enum VendorError {
    /// Endpoint answered with a non-success HTTP status
    #[error("{service} failed with HTTP status {status}")]
    Transport { service: VendorService, status: u16 },

    /// Request never produced a response (connect, TLS, IO, timeout)
    #[error("{service} request failed: {message}")]
    Request {
        service: VendorService,
        message: String,
    },

    /// Response body could not be decoded at all
    #[error("{service} returned an undecodable body: {message}")]
    Decode {
        service: VendorService,
        message: String,
    },

    /// Client could not be built from its configuration
    #[error("invalid vendor configuration: {0}")]
    Config(String),
}

impl VendorError {
    /// Create a transport error from a service and HTTP status code
    pub fn transport(service: VendorService, status: u16) -> Self {
        Self::Transport { service, status }
    }

    /// Returns the failing HTTP status, if the vendor answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            VendorError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that abort the lookup chain
#[derive(Debug, Error)]
pub enum LookupError {
    /// Neither a serial number nor a model code was supplied
    #[error("serial number (SN) or model code (MTM) required")]
    MissingInput,

    /// Resolution finished without a model code
    #[error("could not resolve a model code (MTM) from the given serial number/model code")]
    NoMtm,

    /// The resolved model code has no flash package
    #[error("no flash package found for MTM {0}")]
    NoPackage(String),

    /// A vendor call failed
    #[error(transparent)]
    Vendor(#[from] VendorError),
}

/// Machine-readable classification of a failed lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingInput,
    NoMtm,
    NoPackage,
    Transport,
    Request,
    Decode,
    Config,
}

impl LookupError {
    /// Classify this error for consumers that branch on the failure type
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::MissingInput => ErrorKind::MissingInput,
            LookupError::NoMtm => ErrorKind::NoMtm,
            LookupError::NoPackage(_) => ErrorKind::NoPackage,
            LookupError::Vendor(VendorError::Transport { .. }) => ErrorKind::Transport,
            LookupError::Vendor(VendorError::Request { .. }) => ErrorKind::Request,
            LookupError::Vendor(VendorError::Decode { .. }) => ErrorKind::Decode,
            LookupError::Vendor(VendorError::Config(_)) => ErrorKind::Config,
        }
    }

    /// Model code involved in the failure, when one was resolved
    pub fn mtm(&self) -> Option<&str> {
        match self {
            LookupError::NoPackage(mtm) => Some(mtm.as_str()),
            _ => None,
        }
    }
}
