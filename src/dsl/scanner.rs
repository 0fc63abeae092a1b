//! Scanner (tokenizer) for the netlist language.
//!
//! The scanner pulls characters one at a time from any `char` iterator and
//! classifies maximal runs into [`Token`]s. It keeps exactly one character
//! of pushback, which is enough to terminate greedy runs and to tell `->`
//! from a bare `-` and `//` from a bare `/`.
//!
//! Scanning never fails. Characters that match no rule come back as
//! [`TokenKind::Invalid`] and the parser decides what to do with them.

use std::fmt;

/// A token produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's literal text (empty for [`TokenKind::Eof`])
    pub text: String,
    /// Line number of the first character (1-indexed)
    pub line: usize,
    /// Column number of the first character (1-indexed)
    pub column: usize,
}

impl Token {
    /// Create a token starting at the given position.
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Token types in the netlist language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input
    Eof,
    /// A character that matches no rule
    Invalid,
    /// Run of spaces and tabs
    Whitespace,
    /// Run of '\n'
    Newline,
    /// Run of decimal digits
    Digit,
    /// Identifier: a letter followed by letters and digits
    Letter,
    /// Keyword `Inputs`
    Inputs,
    /// Keyword `Outputs`
    Outputs,
    /// Keyword `Parts`
    Parts,
    /// Keyword `Wires`
    Wires,
    /// '.'
    Dot,
    /// ','
    Comma,
    /// ';'
    Semicolon,
    /// ':'
    Colon,
    /// '['
    LeftBracket,
    /// ']'
    RightBracket,
    /// "->"
    Arrow,
    /// '//' up to the end of the line
    Comment,
}

impl TokenKind {
    /// Look up the keyword spelled exactly by `text`.
    ///
    /// Matching is case-sensitive and whole-word: `inputs` and `Inputs2`
    /// are plain identifiers.
    pub fn keyword(text: &str) -> Option<Self> {
        match text {
            "Inputs" => Some(Self::Inputs),
            "Outputs" => Some(Self::Outputs),
            "Parts" => Some(Self::Parts),
            "Wires" => Some(Self::Wires),
            _ => None,
        }
    }

    /// Tokens the grammar never looks at.
    pub fn is_insignificant(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }

    /// Human-readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Eof => "end of input",
            Self::Invalid => "invalid character",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::Digit => "digit",
            Self::Letter => "identifier",
            Self::Inputs => "Inputs",
            Self::Outputs => "Outputs",
            Self::Parts => "Parts",
            Self::Wires => "Wires",
            Self::Dot => ".",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Colon => ":",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Arrow => "->",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Scanner over a character source.
pub struct Scanner<I> {
    source: I,
    pushback: Option<char>,
    line: usize,
    column: usize,
    // Position before the last `read`, restored by `unread`.
    prev: (usize, usize),
    done: bool,
}

impl<I: Iterator<Item = char>> Scanner<I> {
    /// Create a new scanner reading from `source`.
    pub fn new(source: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            source: source.into_iter(),
            pushback: None,
            line: 1,
            column: 1,
            prev: (1, 1),
            done: false,
        }
    }

    /// The underlying character source.
    pub fn source(&self) -> &I {
        &self.source
    }

    /// Mutable access to the underlying character source.
    pub fn source_mut(&mut self) -> &mut I {
        &mut self.source
    }

    /// Scan the next token.
    ///
    /// Once the source is exhausted every call returns an
    /// [`TokenKind::Eof`] token.
    pub fn next_token(&mut self) -> Token {
        let (line, column) = (self.line, self.column);

        let ch = match self.read() {
            Some(ch) => ch,
            None => return Token::new(TokenKind::Eof, String::new(), line, column),
        };

        let (kind, text) = match ch {
            ' ' | '\t' => (TokenKind::Whitespace, self.scan_run(ch, is_whitespace)),
            '\n' => (TokenKind::Newline, self.scan_run(ch, is_newline)),
            '0'..='9' => (TokenKind::Digit, self.scan_run(ch, is_digit)),
            'a'..='z' | 'A'..='Z' => {
                let text = self.scan_run(ch, is_identifier_char);
                (TokenKind::keyword(&text).unwrap_or(TokenKind::Letter), text)
            }
            '.' => (TokenKind::Dot, ch.to_string()),
            ',' => (TokenKind::Comma, ch.to_string()),
            ';' => (TokenKind::Semicolon, ch.to_string()),
            ':' => (TokenKind::Colon, ch.to_string()),
            '[' => (TokenKind::LeftBracket, ch.to_string()),
            ']' => (TokenKind::RightBracket, ch.to_string()),
            '-' => self.scan_arrow(),
            '/' => self.scan_comment(),
            _ => (TokenKind::Invalid, ch.to_string()),
        };

        Token::new(kind, text, line, column)
    }

    fn read(&mut self) -> Option<char> {
        let ch = match self.pushback.take() {
            Some(ch) => ch,
            None => self.source.next()?,
        };

        self.prev = (self.line, self.column);
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn unread(&mut self, ch: char) {
        debug_assert!(self.pushback.is_none(), "only one character of pushback");
        self.pushback = Some(ch);
        (self.line, self.column) = self.prev;
    }

    /// Greedily extend `first` with characters accepted by `accept`.
    fn scan_run(&mut self, first: char, accept: fn(char) -> bool) -> String {
        let mut text = String::new();
        text.push(first);

        while let Some(ch) = self.read() {
            if accept(ch) {
                text.push(ch);
            } else {
                self.unread(ch);
                break;
            }
        }
        text
    }

    fn scan_arrow(&mut self) -> (TokenKind, String) {
        match self.read() {
            Some('>') => (TokenKind::Arrow, "->".to_string()),
            Some(ch) => {
                self.unread(ch);
                (TokenKind::Invalid, "-".to_string())
            }
            None => (TokenKind::Invalid, "-".to_string()),
        }
    }

    fn scan_comment(&mut self) -> (TokenKind, String) {
        match self.read() {
            Some('/') => {}
            Some(ch) => {
                self.unread(ch);
                return (TokenKind::Invalid, "/".to_string());
            }
            None => return (TokenKind::Invalid, "/".to_string()),
        }

        let mut text = "//".to_string();
        while let Some(ch) = self.read() {
            if is_newline(ch) {
                self.unread(ch);
                break;
            }
            text.push(ch);
        }
        (TokenKind::Comment, text)
    }
}

impl<I: Iterator<Item = char>> Iterator for Scanner<I> {
    type Item = Token;

    /// Yield tokens up to and including the first [`TokenKind::Eof`].
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.next_token();
        self.done = token.kind == TokenKind::Eof;
        Some(token)
    }
}

fn is_whitespace(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

fn is_newline(ch: char) -> bool {
    ch == '\n'
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        Scanner::new(input.chars())
            .map(|tok| (tok.kind, tok.text))
            .collect()
    }

    #[test]
    fn test_scanner_basic() {
        let tokens = kinds("Inputs: A, B[4];");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Inputs, "Inputs".to_string()),
                (TokenKind::Colon, ":".to_string()),
                (TokenKind::Whitespace, " ".to_string()),
                (TokenKind::Letter, "A".to_string()),
                (TokenKind::Comma, ",".to_string()),
                (TokenKind::Whitespace, " ".to_string()),
                (TokenKind::Letter, "B".to_string()),
                (TokenKind::LeftBracket, "[".to_string()),
                (TokenKind::Digit, "4".to_string()),
                (TokenKind::RightBracket, "]".to_string()),
                (TokenKind::Semicolon, ";".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_scanner_runs_are_greedy() {
        let tokens = kinds(" \t \n\n\n0123abc9");
        assert_eq!(tokens[0], (TokenKind::Whitespace, " \t ".to_string()));
        assert_eq!(tokens[1], (TokenKind::Newline, "\n\n\n".to_string()));
        assert_eq!(tokens[2], (TokenKind::Digit, "0123".to_string()));
        assert_eq!(tokens[3], (TokenKind::Letter, "abc9".to_string()));
        assert_eq!(tokens[4].0, TokenKind::Eof);
    }

    #[test]
    fn test_keywords_are_exact() {
        assert_eq!(kinds("Inputs")[0].0, TokenKind::Inputs);
        assert_eq!(kinds("Outputs")[0].0, TokenKind::Outputs);
        assert_eq!(kinds("Parts")[0].0, TokenKind::Parts);
        assert_eq!(kinds("Wires")[0].0, TokenKind::Wires);
        assert_eq!(kinds("inputs")[0], (TokenKind::Letter, "inputs".to_string()));
        assert_eq!(kinds("Inputs2")[0], (TokenKind::Letter, "Inputs2".to_string()));
        assert_eq!(kinds("WiresX")[0].0, TokenKind::Letter);
    }

    #[test]
    fn test_arrow_and_bare_dash() {
        assert_eq!(kinds("->")[0], (TokenKind::Arrow, "->".to_string()));

        let tokens = kinds("-A");
        assert_eq!(tokens[0], (TokenKind::Invalid, "-".to_string()));
        assert_eq!(tokens[1], (TokenKind::Letter, "A".to_string()));

        let tokens = kinds("-");
        assert_eq!(tokens[0], (TokenKind::Invalid, "-".to_string()));
        assert_eq!(tokens[1].0, TokenKind::Eof);
    }

    #[test]
    fn test_comment_and_bare_slash() {
        let tokens = kinds("// hello -> world\nA");
        assert_eq!(
            tokens[0],
            (TokenKind::Comment, "// hello -> world".to_string())
        );
        assert_eq!(tokens[1], (TokenKind::Newline, "\n".to_string()));
        assert_eq!(tokens[2], (TokenKind::Letter, "A".to_string()));

        let tokens = kinds("/A");
        assert_eq!(tokens[0], (TokenKind::Invalid, "/".to_string()));
        assert_eq!(tokens[1], (TokenKind::Letter, "A".to_string()));

        // A comment running into end of input is still a comment.
        assert_eq!(kinds("//x")[0], (TokenKind::Comment, "//x".to_string()));
    }

    #[test]
    fn test_invalid_character() {
        let tokens = kinds("A$B");
        assert_eq!(tokens[1], (TokenKind::Invalid, "$".to_string()));
        assert_eq!(tokens[2], (TokenKind::Letter, "B".to_string()));
        assert_eq!(kinds("é")[0], (TokenKind::Invalid, "é".to_string()));
    }

    #[test]
    fn test_empty_input_is_eof() {
        let mut scanner = Scanner::new("".chars());
        let tok = scanner.next_token();
        assert_eq!(tok.kind, TokenKind::Eof);
        assert_eq!(tok.text, "");
        // Exhausted scanners keep reporting end of input.
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_iterator_stops_after_eof() {
        let tokens: Vec<_> = Scanner::new("A".chars()).collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_positions() {
        let tokens: Vec<_> = Scanner::new("Inputs:\n  A->B".chars()).collect();
        let pos: Vec<_> = tokens.iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(
            pos,
            vec![(1, 1), (1, 7), (1, 8), (2, 1), (2, 3), (2, 4), (2, 6), (2, 7)]
        );
    }

    #[test]
    fn test_position_after_pushback_of_newline() {
        let tokens: Vec<_> = Scanner::new("-\nA".chars()).collect();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 2));
        assert_eq!((tokens[2].line, tokens[2].column), (2, 1));
    }
}
