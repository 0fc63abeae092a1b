//! Recursive-descent parser for the netlist language.

use super::ast::*;
use super::scanner::{Scanner, Token, TokenKind};
use crate::error::{MhrdError, Result};

/// Parser for netlist programs.
///
/// Holds at most one token of pushback. [`Parser::unscan`] returns the last
/// token produced by [`Parser::scan`], so a re-scan after a pushback sees
/// exactly that token again with no insignificant tokens in between.
pub struct Parser<I> {
    scanner: Scanner<I>,
    last: Option<Token>,
    buffered: Option<Token>,
}

impl<'a> Parser<std::str::Chars<'a>> {
    /// Create a parser over an in-memory program text.
    pub fn from_text(input: &'a str) -> Self {
        Self::new(input.chars())
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Create a new parser reading characters from `source`.
    pub fn new(source: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            scanner: Scanner::new(source),
            last: None,
            buffered: None,
        }
    }

    /// The underlying character source.
    pub fn source(&self) -> &I {
        self.scanner.source()
    }

    /// Mutable access to the underlying character source.
    pub fn source_mut(&mut self) -> &mut I {
        self.scanner.source_mut()
    }

    /// Parse a whole program: inputs, outputs, parts and wires, in order.
    ///
    /// The first failure aborts the parse and nothing is returned.
    pub fn parse(&mut self) -> Result<Program> {
        let inputs = self.parse_inputs()?;
        let outputs = self.parse_outputs()?;
        let parts = self.parse_parts()?;
        let wires = self.parse_wires()?;

        Ok(Program {
            inputs,
            outputs,
            parts,
            wires,
        })
    }

    /// Parse an `Inputs: <ports> ;` statement.
    pub fn parse_inputs(&mut self) -> Result<InputStatement> {
        self.parse_header(TokenKind::Inputs)?;
        let statement: InputStatement = self
            .parse_body(|kind| kind == TokenKind::Letter, Self::parse_port)?
            .into_iter()
            .collect();
        log::debug!("parsed {} input port(s)", statement.len());
        Ok(statement)
    }

    /// Parse an `Outputs: <ports> ;` statement.
    pub fn parse_outputs(&mut self) -> Result<OutputStatement> {
        self.parse_header(TokenKind::Outputs)?;
        let statement: OutputStatement = self
            .parse_body(|kind| kind == TokenKind::Letter, Self::parse_port)?
            .into_iter()
            .collect();
        log::debug!("parsed {} output port(s)", statement.len());
        Ok(statement)
    }

    /// Parse a `Parts: <parts> ;` statement.
    pub fn parse_parts(&mut self) -> Result<PartStatement> {
        self.parse_header(TokenKind::Parts)?;
        let statement: PartStatement = self
            .parse_body(|kind| kind == TokenKind::Letter, Self::parse_part)?
            .into_iter()
            .collect();
        log::debug!("parsed {} part(s)", statement.len());
        Ok(statement)
    }

    /// Parse a `Wires: <wires> ;` statement.
    ///
    /// Wires may also be terminated one by one with `;`: a `;` followed by
    /// the start of another wire continues the statement.
    pub fn parse_wires(&mut self) -> Result<WireStatement> {
        self.parse_header(TokenKind::Wires)?;

        let mut wires = Vec::new();
        loop {
            wires.extend(self.parse_body(starts_wire, Self::parse_wire)?);

            let next = self.scan_significant();
            self.unscan();
            if !starts_wire(next.kind) {
                break;
            }
        }

        let statement: WireStatement = wires.into_iter().collect();
        log::debug!("parsed {} wire(s)", statement.len());
        Ok(statement)
    }

    fn scan(&mut self) -> Token {
        let token = match self.buffered.take() {
            Some(token) => token,
            None => self.scanner.next_token(),
        };
        self.last = Some(token.clone());
        token
    }

    fn unscan(&mut self) {
        debug_assert!(self.buffered.is_none(), "only one token of pushback");
        self.buffered = self.last.take();
    }

    /// Scan the next token the grammar cares about.
    fn scan_significant(&mut self) -> Token {
        loop {
            let token = self.scan();
            if !token.kind.is_insignificant() {
                log::trace!(
                    "{}:{}: {:?} {:?}",
                    token.line,
                    token.column,
                    token.kind,
                    token.text
                );
                return token;
            }
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        let token = self.scan_significant();
        if token.kind == kind {
            Ok(token)
        } else {
            Err(MhrdError::unexpected(&token, kind.describe()))
        }
    }

    fn parse_header(&mut self, keyword: TokenKind) -> Result<()> {
        log::debug!("parsing {} statement", keyword);
        self.expect(keyword)?;
        self.expect(TokenKind::Colon)?;
        Ok(())
    }

    /// Parse list elements up to the terminating `;`.
    ///
    /// Tokens that neither start an element nor terminate the list (such
    /// as `,`) are skipped. End of input before the `;` is an error.
    fn parse_body<T>(
        &mut self,
        starts_element: fn(TokenKind) -> bool,
        parse_element: fn(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();

        loop {
            let token = self.scan_significant();
            match token.kind {
                TokenKind::Semicolon => return Ok(items),
                TokenKind::Eof => {
                    return Err(MhrdError::unexpected(&token, TokenKind::Semicolon.describe()));
                }
                kind if starts_element(kind) => {
                    self.unscan();
                    items.push(parse_element(self)?);
                }
                _ => {}
            }
        }
    }

    fn parse_index(&mut self) -> Result<u32> {
        let token = self.expect(TokenKind::Digit)?;
        token
            .text
            .parse()
            .map_err(|_| MhrdError::invalid_pin_index(&token))
    }

    fn parse_port(&mut self) -> Result<Port> {
        let id = self.expect(TokenKind::Letter)?;
        let mut port = Port::new(id.text, 1);

        let token = self.scan_significant();
        if token.kind == TokenKind::LeftBracket {
            let width = self.parse_index()?;
            self.expect(TokenKind::RightBracket)?;
            port.pins = Range::width(width);
        } else {
            self.unscan();
        }

        Ok(port)
    }

    fn parse_part(&mut self) -> Result<Part> {
        let id = self.scan_significant();
        let module = self.expect(TokenKind::Letter)?;
        Ok(Part::new(id.text, module.text))
    }

    fn parse_wire(&mut self) -> Result<Wire> {
        let mut wire = Wire::default();

        let source = self.scan_significant();
        match source.kind {
            TokenKind::Digit => wire.source = source.text,
            TokenKind::Letter => {
                wire.source = source.text;
                (wire.source_out, wire.source_range) = self.parse_endpoint_selectors()?;
            }
            _ => return Err(MhrdError::unexpected(&source, "digit or identifier")),
        }

        self.expect(TokenKind::Arrow)?;

        wire.target = self.expect(TokenKind::Letter)?.text;
        (wire.target_in, wire.target_range) = self.parse_endpoint_selectors()?;

        Ok(wire)
    }

    /// Parse the optional `.name` and `[n]` / `[n:m]` after an endpoint name.
    fn parse_endpoint_selectors(&mut self) -> Result<(Option<String>, Range)> {
        let mut selector = None;

        let mut token = self.scan_significant();
        if token.kind == TokenKind::Dot {
            selector = Some(self.expect(TokenKind::Letter)?.text);
            token = self.scan_significant();
        }

        if token.kind != TokenKind::LeftBracket {
            self.unscan();
            return Ok((selector, Range::default()));
        }

        let start = self.parse_index()?;
        let token = self.scan_significant();
        let range = match token.kind {
            TokenKind::RightBracket => Range::pin(start),
            TokenKind::Colon => {
                let end = self.parse_index()?;
                self.expect(TokenKind::RightBracket)?;
                Range::new(start, end)
            }
            _ => return Err(MhrdError::unexpected(&token, ": or ]")),
        };

        Ok((selector, range))
    }
}

fn starts_wire(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Letter | TokenKind::Digit)
}
