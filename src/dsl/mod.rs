//! Front end for the MHRD netlist description language.
//!
//! A program declares input ports, output ports, part instances and the
//! wires between them, always in that order.
//!
//! # Grammar Overview
//!
//! ```text
//! program      = inputs outputs parts wires
//! inputs       = "Inputs" ":" { port } ";"
//! outputs      = "Outputs" ":" { port } ";"
//! port         = identifier [ "[" digits "]" ]
//! parts        = "Parts" ":" { part } ";"
//! part         = identifier identifier
//! wires        = "Wires" ":" { wire } ";"
//! wire         = source "->" target
//! source       = digits | identifier [ "." identifier ] [ pins ]
//! target       = identifier [ "." identifier ] [ pins ]
//! pins         = "[" digits [ ":" digits ] "]"
//!
//! identifier   = letter { letter | digit }
//! digits       = digit { digit }
//! comment      = "//" { any_char }
//! ```
//!
//! Separators between list elements are optional: anything that neither
//! starts an element nor terminates the list, such as `,`, is skipped.
//! Whitespace, newlines and comments may appear between any two tokens.
//!
//! # Example
//!
//! ```text
//! // half of a XOR
//! Inputs: A, B[4];
//! Outputs: C;
//! Parts: n1 NAND;
//! Wires: A -> n1.a; B[1:4] -> n1.b; n1.o -> C;
//! ```

mod ast;
mod parser;
mod scanner;
mod source;

pub use ast::*;
pub use parser::Parser;
pub use scanner::{Scanner, Token, TokenKind};
pub use source::ReadChars;

use std::io::{BufReader, Read};

use crate::error::{MhrdError, Result};

/// Parse a netlist program held in memory.
pub fn parse(input: &str) -> Result<Program> {
    Parser::from_text(input).parse()
}

/// Parse a netlist program read incrementally from `reader`.
///
/// A read failure while scanning is reported as [`MhrdError::Io`], even if
/// the truncated input also failed to parse.
pub fn parse_reader<R: Read>(reader: R) -> Result<Program> {
    let mut parser = Parser::new(ReadChars::new(BufReader::new(reader)));
    let result = parser.parse();

    if let Some(source) = parser.source_mut().take_error() {
        return Err(MhrdError::Io { source });
    }
    result
}

/// Parse a netlist file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Program> {
    let file = std::fs::File::open(path).map_err(|e| MhrdError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_reader(file).map_err(|e| match e {
        MhrdError::Io { source } => MhrdError::FileReadError {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })
}
