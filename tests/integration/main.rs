//! Integration tests for the boot integrity checker

mod binary_exit_codes;
mod capture_rescan;
mod output_contracts;
mod support;
