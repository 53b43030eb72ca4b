//! Collection integration tests
//!
//! Tests are organized by area of the collection API for better maintainability.

mod merge_tests;
mod mutation_tests;
