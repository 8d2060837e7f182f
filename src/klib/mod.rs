//! Kernel Library (KLib).
//!
//! Utilitários internos do módulo que não dependem da plataforma.

pub mod test_framework;

pub use test_framework::{run_test_suite, SuiteSummary, TestCase, TestResult};
