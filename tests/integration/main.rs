//! Integration test modules.

mod document_test;
mod workout_execution_test;
