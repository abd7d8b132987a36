//! Integration Tests Module
//!
//! Exercises the advisor and the assessment wizard end to end against a
//! scripted provider: fallback behaviour, schema enforcement, concurrent
//! report generation, and follow-up fetch ordering.

// Scripted provider shared by the tests below
mod mock_provider;

// Advisor generation and report tests
mod advisor_test;

// Wizard flow and follow-up staleness tests
mod wizard_test;
