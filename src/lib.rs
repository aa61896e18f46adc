//! Decision engine for source-level constant-replacement mutation testing.
//!
//! Given a parsed program (delivered as a traversal trace by an external
//! parser front end), the engine decides which scalar literals are eligible
//! for mutation and which replacement values are valid under a configurable
//! selection policy, emitting one mutant record per accepted replacement.

pub mod cli;
pub mod context;
pub mod node;
pub mod numeric;
pub mod operator;
pub mod policy;
pub mod record;
pub mod span;
pub mod switches;
pub mod symbols;
pub mod trace;
pub mod ui;
