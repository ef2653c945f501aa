//! Starting transactions: the developer-facing options, their wire payload
//! and the VAT classification of order lines.

mod options;
mod payload;
mod vat;

pub use options::*;
pub use payload::*;
pub use vat::*;
