//! skulabel - SKU barcode label generator
//!
//! Looks SKUs up in a reference spreadsheet, renders Code 128 barcodes
//! into a content-addressed image cache and composes printable labels.

pub mod barcode;
pub mod cli;
pub mod config;
pub mod error;
pub mod label;
pub mod service;
pub mod table;
pub mod ui;

pub use error::{LabelError, LabelResult};
