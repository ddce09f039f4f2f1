pub mod assembly_loader;
pub mod c_run;
pub mod compile;
pub mod dump;
pub mod error;
pub mod run;
pub mod run_common;
pub mod symbols;

#[cfg(test)]
mod pipeline_tests;
