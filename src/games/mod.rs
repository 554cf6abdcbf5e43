//! Bundled game implementations.
//!
//! These are rules and setup collaborators for the engine, not part of its
//! contract. Any type implementing `RulesEngine` can be driven the same way.

pub mod chase;
