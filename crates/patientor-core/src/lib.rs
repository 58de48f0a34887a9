//! Core types and operations for the Patientor patient record service.
//!
//! This crate is deliberately free of HTTP and storage dependencies. Inbound
//! payloads are validated here ([`validate`]) and written through the
//! [`store::PatientStore`] abstraction ([`intake`]).

pub mod diagnosis;
pub mod entry;
pub mod error;
pub mod id;
pub mod intake;
pub mod patient;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
