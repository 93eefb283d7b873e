//! Entity mappers.
//!
//! Each mapper walks one result node of a known response kind and produces a
//! record. Mappers never fail: absent fields decode to zero.

pub mod chart;
pub mod options;
pub mod quote;
pub mod summary;
