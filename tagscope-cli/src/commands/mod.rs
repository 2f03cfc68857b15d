pub mod check;
pub mod common;
pub mod registry;
pub mod rules;
