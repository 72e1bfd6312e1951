//! # Harmonia Scope
//!
//! Buckets the results of one analysis by the set of charts they touch.
//!
//! For charts A, B, C the scopes are, in order:
//!
//! ```text
//!   {A} {B} {C} {A,B} {A,C} {B,C} {A,B,C}
//!    └─ PatternTable: every scope
//!    └─ AspectTable:  scopes of one or two charts (a batch has two points)
//! ```

pub mod analysis;
pub mod aspect_table;
pub mod frame;
pub mod pattern_table;
pub mod scope;
pub mod service;

pub use analysis::PatternAnalysis;
pub use aspect_table::AspectTable;
pub use pattern_table::PatternTable;
pub use scope::{enumerate_scopes, ChartScope};
pub use service::HarmonicService;

pub use harmonia_core::{Error, Result};
