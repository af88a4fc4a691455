//! Flattening themes into CSS-like export blocks

pub mod mapper;
pub mod mapping;

pub use mapper::{generate, generate_with, ExportPlan};
pub use mapping::{default_mapping, SavedMapping, SavedMappings, VariableMapping};

#[cfg(test)]
mod mapper_tests;
