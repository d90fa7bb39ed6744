//! Integer math support: checked wide arithmetic and the integer square
//! root used for share issuance.

pub mod wide;
