//! Terminal presentation: the catalog table and user prompts.

pub mod catalog_table;
pub mod prompt;
