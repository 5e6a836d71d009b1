//! Low-level query modules, one per table group.

pub mod catalog;
pub mod scenarios;
pub mod selections;
