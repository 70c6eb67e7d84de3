//! External service clients

pub mod stylist;

pub use stylist::{StylingAnalysis, StylistClient};
