//! Helper functions

pub mod date;
pub mod html;
