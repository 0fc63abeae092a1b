//! # MHRD Core
//!
//! Scanner and parser for the MHRD hardware netlist description language.
//!
//! This library provides:
//! - A scanner that turns program text into classified tokens
//! - A recursive-descent parser for the four-statement grammar
//! - A flat AST of ports, parts and wires in declaration order
//!
//! ## Architecture
//!
//! - [`dsl`] - Scanner, parser and AST for the netlist language
//! - [`error`] - Unified error type
//!
//! Checking the AST (unknown parts, width mismatches, cycles) and anything
//! downstream of it, such as simulation, is left to the consumer.
//!
//! ## Usage
//!
//! ```
//! let program = mhrd_core::parse(
//!     "Inputs: A, B[4];\nOutputs: C;\nParts: n1 NAND;\nWires: A -> n1.a; B[1:4] -> n1.b; n1.o -> C;",
//! )
//! .unwrap();
//!
//! assert_eq!(program.inputs.len(), 2);
//! assert_eq!(program.width_of("B"), Some(4));
//! assert_eq!(program.wires.wires()[2].source_out.as_deref(), Some("o"));
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! mhrd --format text adder.mhrd
//! ```

pub mod dsl;
pub mod error;

// Re-export main types for convenience
pub use dsl::{parse, parse_reader, Parser, Program};
pub use error::{MhrdError, Result};
