#![no_std]

//! An efficient, zero-copy decoder for ISO 2709 (MARC 21) bibliographic
//! records.
//!
//! Colophon is split in two halves. The [`avec`] module frames a byte source
//! (a file, any buffered reader, or an in-memory slice) into raw records at
//! record terminator boundaries. The [`sans`] module decodes one raw record:
//! its leader, directory, control fields, data fields and subfields. Decoding
//! never copies field content; every decoded value borrows from the record it
//! came from.
//!
//! ```
//! use colophon::{avec::slice::Records, sans};
//!
//! for record in Records::new(&data) {
//!     let id = sans::control_number(record)?;
//!     for field in sans::data_fields("650", record)? {
//!         let subjects = sans::decode_data_field(field)?;
//!         // ...
//!     }
//! }
//! ```
//!
//! Field and subfield content is passed through as bytes. Records in MARC-8
//! are never transcoded; check [`sans::Leader::is_unicode`] before treating
//! content as UTF-8.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader- and file-backed record streams (default).

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod avec;
pub mod sans;
