//! Splitter layer tests
//!
//! Worked scenarios plus bound, non-emptiness, idempotence,
//! determinism and id uniqueness over generated inputs.

mod test_scenarios;
mod test_structured;
