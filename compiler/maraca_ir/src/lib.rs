//! Maraca IR - syntax tree types
//!
//! This crate contains the data structures shared by the Maraca parser and
//! formatter:
//! - Spans for source locations
//! - `NodeId` indices and the `NodeArena` that owns every node
//! - The closed `NodeKind` sum type with one variant per syntax form
//! - Core operators and the precedence `Level` ladder
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: No `Box<Node>`, children are `NodeId(u32)` indices
//! - **Identity Matters**: a node shared by two parents is the same id, which
//!   is how assignment shorthands are recognised
//! - **Read Only**: once built, a tree is never mutated by its consumers

mod arena;
mod ast;
mod compare;
mod node_id;
mod operators;
mod span;

pub use arena::NodeArena;
pub use ast::{Bracket, Chained, Node, NodeKind};
pub use compare::structurally_equal;
pub use node_id::NodeId;
pub use operators::{BinaryOp, Level, UnaryOp};
pub use span::Span;

#[cfg(test)]
mod tests;
