//! Audit criteria loading

mod loader;

pub use loader::CriteriaLoader;
