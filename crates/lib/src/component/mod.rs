//! Component identity and the values components expose.
//!
//! A component is one published module. The types here (identity, selectors,
//! attributes, capabilities, artifacts) are shared by the lazy manifest model
//! and by realised metadata.

mod types;

pub use types::*;
