//! DDL lexer for tokenizing input.

use alloc::borrow::Cow;
use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;

use crate::errors::Position;

macro_rules! keywords {
    ($($variant:ident => $text:literal, $reserved:literal;)+) => {
        /// A reserved or non-reserved word recognized by the lexer.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "testing", derive(arbitrary::Arbitrary))]
        pub enum Keyword {
            $(
                #[doc = concat!("`", $text, "` keyword")]
                $variant,
            )+
        }

        impl Keyword {
            /// Returns the canonical (upper case) spelling of the keyword.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text,)+
                }
            }

            /// Whether the keyword may not be used as a bare identifier.
            ///
            /// Non-reserved keywords such as `DATE` or `ACTION` are accepted
            /// wherever a table, column or index name is expected.
            #[must_use]
            pub const fn is_reserved(self) -> bool {
                match self {
                    $(Keyword::$variant => $reserved,)+
                }
            }
        }

        /// Keyword table, sorted by spelling.
        static KEYWORDS: &[(&str, Keyword)] = &[$(($text, Keyword::$variant),)+];
    };
}

keywords! {
    Action => "ACTION", false;
    Add => "ADD", true;
    After => "AFTER", false;
    Alter => "ALTER", true;
    Asc => "ASC", true;
    AutoIncrement => "AUTO_INCREMENT", false;
    Btree => "BTREE", false;
    By => "BY", true;
    Cascade => "CASCADE", true;
    Change => "CHANGE", true;
    Character => "CHARACTER", true;
    Collate => "COLLATE", true;
    Column => "COLUMN", true;
    Convert => "CONVERT", true;
    Create => "CREATE", true;
    Date => "DATE", false;
    DateTime => "DATETIME", false;
    Decimal => "DECIMAL", true;
    Default => "DEFAULT", true;
    Delete => "DELETE", true;
    Desc => "DESC", true;
    Double => "DOUBLE", true;
    Drop => "DROP", true;
    Enum => "ENUM", false;
    Exclusive => "EXCLUSIVE", false;
    Exists => "EXISTS", true;
    First => "FIRST", false;
    Foreign => "FOREIGN", true;
    Hash => "HASH", false;
    If => "IF", true;
    Index => "INDEX", true;
    Int => "INT", true;
    Is => "IS", true;
    Json => "JSON", false;
    Key => "KEY", true;
    KeyBlockSize => "KEY_BLOCK_SIZE", false;
    Lock => "LOCK", true;
    Modify => "MODIFY", true;
    No => "NO", false;
    None => "NONE", false;
    Not => "NOT", true;
    Null => "NULL", true;
    On => "ON", true;
    Order => "ORDER", true;
    Parser => "PARSER", false;
    Primary => "PRIMARY", true;
    References => "REFERENCES", true;
    Rename => "RENAME", true;
    Restrict => "RESTRICT", true;
    Set => "SET", true;
    Shared => "SHARED", false;
    Table => "TABLE", true;
    Text => "TEXT", false;
    Time => "TIME", false;
    Timestamp => "TIMESTAMP", false;
    To => "TO", true;
    Unique => "UNIQUE", true;
    Update => "UPDATE", true;
    Using => "USING", true;
    With => "WITH", true;
}

impl Keyword {
    /// Looks up a word in the keyword table, ignoring ASCII case.
    #[must_use]
    pub fn lookup(word: &str) -> Option<Self> {
        KEYWORDS
            .binary_search_by(|(text, _)| {
                text.bytes()
                    .cmp(word.bytes().map(|b| b.to_ascii_uppercase()))
            })
            .ok()
            .map(|index| KEYWORDS[index].1)
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'input> {
    /// The kind of token.
    pub kind: TokenKind<'input>,
    /// The raw source text of the token.
    pub text: &'input str,
    /// Byte offset in the input where this token starts.
    pub pos: usize,
}

/// The different kinds of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'input> {
    /// A keyword, matched case-insensitively.
    Keyword(Keyword),
    /// A bare identifier.
    Identifier(&'input str),
    /// A backtick-quoted identifier, with the quotes removed.
    QuotedIdentifier(Cow<'input, str>),
    /// Unsigned integer literal.
    Number(u64),
    /// String literal (single or double quoted), with the quotes removed.
    StringLiteral(Cow<'input, str>),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Comma
    Comma,
    /// Semicolon
    Semicolon,
    /// Equals sign
    Equals,
    /// End of input
    Eof,
}

impl TokenKind<'_> {
    /// Returns a `'static` descriptive name for this token kind.
    ///
    /// Unlike [`TokenKind::describe`], this never borrows from the input and
    /// is safe to store in error types.
    #[must_use]
    pub fn static_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(keyword) => keyword.as_str(),
            TokenKind::Identifier(_) | TokenKind::QuotedIdentifier(_) => "identifier",
            TokenKind::Number(_) => "number",
            TokenKind::StringLiteral(_) => "string",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Equals => "=",
            TokenKind::Eof => "end of input",
        }
    }

    /// Describes the token for error messages, including its value.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Identifier(name) => format!("identifier `{name}`"),
            TokenKind::QuotedIdentifier(name) => format!("identifier `{name}`"),
            TokenKind::Number(value) => format!("number {value}"),
            TokenKind::StringLiteral(value) => format!("string '{value}'"),
            TokenKind::Eof => String::from("end of input"),
            other => format!("`{}`", other.static_name()),
        }
    }
}

/// DDL lexer that produces tokens from input.
///
/// Tokens are produced lazily. [`Lexer::peek_nth`] buffers as many tokens as
/// the parser needs to look ahead; nothing is ever pushed back.
pub struct Lexer<'input> {
    input: &'input str,
    pos: usize,
    lookahead: VecDeque<Token<'input>>,
}

impl<'input> Lexer<'input> {
    /// Create a new lexer for the given input.
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            pos: 0,
            lookahead: VecDeque::new(),
        }
    }

    /// The text being tokenized.
    #[must_use]
    pub fn input(&self) -> &'input str {
        self.input
    }

    /// Peek at the next token without consuming it.
    ///
    /// # Errors
    ///
    /// Returns an error if the next token cannot be lexed.
    pub fn peek(&mut self) -> Result<&Token<'input>, LexerError> {
        self.peek_nth(0)
    }

    /// Peek at the token `n` positions ahead without consuming anything.
    ///
    /// # Errors
    ///
    /// Returns an error if any token up to the requested one cannot be lexed.
    pub fn peek_nth(&mut self, n: usize) -> Result<&Token<'input>, LexerError> {
        while self.lookahead.len() <= n {
            let token = self.next_token()?;
            self.lookahead.push_back(token);
        }
        Ok(&self.lookahead[n])
    }

    /// Consume and return the next token.
    ///
    /// Once the input is exhausted, every call returns an [`TokenKind::Eof`]
    /// token.
    ///
    /// # Errors
    ///
    /// Returns an error if the next token cannot be lexed.
    pub fn next(&mut self) -> Result<Token<'input>, LexerError> {
        if let Some(token) = self.lookahead.pop_front() {
            return Ok(token);
        }
        self.next_token()
    }

    fn position(&self, offset: usize) -> Position {
        Position::locate(self.input, offset)
    }

    /// Skip whitespace and comments.
    fn skip_whitespace(&mut self) -> Result<(), LexerError> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if b == b'#'
                || (b == b'-' && self.pos + 1 < bytes.len() && bytes[self.pos + 1] == b'-')
            {
                // Line comment
                while self.pos < bytes.len() && bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else if b == b'/' && self.pos + 1 < bytes.len() && bytes[self.pos + 1] == b'*' {
                let start = self.pos;
                self.pos += 2;
                while self.pos + 1 < bytes.len()
                    && !(bytes[self.pos] == b'*' && bytes[self.pos + 1] == b'/')
                {
                    self.pos += 1;
                }
                if self.pos + 1 >= bytes.len() {
                    return Err(LexerError::UnterminatedComment {
                        position: self.position(start),
                    });
                }
                self.pos += 2;
            } else {
                break;
            }
        }
        Ok(())
    }

    fn next_token(&mut self) -> Result<Token<'input>, LexerError> {
        self.skip_whitespace()?;

        let start_pos = self.pos;
        let bytes = self.input.as_bytes();

        if self.pos >= bytes.len() {
            return Ok(self.token(TokenKind::Eof, start_pos));
        }

        let b = bytes[self.pos];

        // Single-character symbols
        let kind = match b {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b'=' => TokenKind::Equals,
            b'\'' | b'"' => return self.read_string(start_pos),
            b'`' => return self.read_quoted_identifier(start_pos),
            _ if b.is_ascii_digit() => return self.read_number(start_pos),
            _ if is_ident_start(b) => return Ok(self.read_identifier(start_pos)),
            _ => {
                let char = self.input[self.pos..].chars().next().unwrap_or('\u{fffd}');
                return Err(LexerError::UnexpectedChar {
                    char,
                    position: self.position(start_pos),
                });
            }
        };
        self.pos += 1;

        Ok(self.token(kind, start_pos))
    }

    fn token(&self, kind: TokenKind<'input>, start_pos: usize) -> Token<'input> {
        Token {
            kind,
            text: &self.input[start_pos..self.pos],
            pos: start_pos,
        }
    }

    /// Reads text up to the closing `quote`. A doubled quote stands for the
    /// quote itself, and with `backslash` set a backslash escapes the
    /// character after it. Returns `None` if the input ends first.
    fn read_quoted(&mut self, quote: u8, backslash: bool) -> Option<Cow<'input, str>> {
        let input = self.input;
        let bytes = input.as_bytes();
        self.pos += 1;

        let start = self.pos;
        let mut unescaped: Option<String> = None;
        let mut chunk_start = start;
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if backslash && b == b'\\' {
                let escaped = input[self.pos + 1..].chars().next()?;
                let text = unescaped.get_or_insert_with(String::new);
                text.push_str(&input[chunk_start..self.pos]);
                text.push(unescape(escaped));
                self.pos += 1 + escaped.len_utf8();
                chunk_start = self.pos;
            } else if b != quote {
                self.pos += 1;
            } else if bytes.get(self.pos + 1) == Some(&quote) {
                let text = unescaped.get_or_insert_with(String::new);
                text.push_str(&input[chunk_start..=self.pos]);
                self.pos += 2;
                chunk_start = self.pos;
            } else {
                let end = self.pos;
                self.pos += 1;
                return Some(match unescaped {
                    Some(mut text) => {
                        text.push_str(&input[chunk_start..end]);
                        Cow::Owned(text)
                    }
                    None => Cow::Borrowed(&input[start..end]),
                });
            }
        }
        None
    }

    fn read_string(&mut self, start_pos: usize) -> Result<Token<'input>, LexerError> {
        let quote = self.input.as_bytes()[self.pos];
        match self.read_quoted(quote, true) {
            Some(value) => Ok(self.token(TokenKind::StringLiteral(value), start_pos)),
            None => Err(LexerError::UnterminatedString {
                position: self.position(start_pos),
            }),
        }
    }

    fn read_quoted_identifier(&mut self, start_pos: usize) -> Result<Token<'input>, LexerError> {
        match self.read_quoted(b'`', false) {
            Some(name) => Ok(self.token(TokenKind::QuotedIdentifier(name), start_pos)),
            None => Err(LexerError::UnterminatedIdentifier {
                position: self.position(start_pos),
            }),
        }
    }

    fn read_number(&mut self, start_pos: usize) -> Result<Token<'input>, LexerError> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }

        let num_str = &self.input[start_pos..self.pos];
        match num_str.parse::<u64>() {
            Ok(value) => Ok(self.token(TokenKind::Number(value), start_pos)),
            Err(_) => Err(LexerError::InvalidNumber {
                value: num_str.into(),
                position: self.position(start_pos),
            }),
        }
    }

    fn read_identifier(&mut self, start_pos: usize) -> Token<'input> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && is_ident_cont(bytes[self.pos]) {
            self.pos += 1;
        }

        let ident = &self.input[start_pos..self.pos];
        let kind = Keyword::lookup(ident).map_or(TokenKind::Identifier(ident), TokenKind::Keyword);
        self.token(kind, start_pos)
    }
}

/// The character a backslash escape in a string literal stands for.
fn unescape(escaped: char) -> char {
    match escaped {
        '0' => '\0',
        'b' => '\u{8}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'Z' => '\u{1a}',
        other => other,
    }
}

/// Check if a byte can start an identifier.
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

/// Check if a byte can continue an identifier.
fn is_ident_cont(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Errors that can occur during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    /// Unexpected character in input.
    #[error("Unexpected character '{char}' at {position}")]
    UnexpectedChar {
        /// The unexpected character.
        char: char,
        /// Position in input.
        position: Position,
    },
    /// Unterminated string literal.
    #[error("Unterminated string literal starting at {position}")]
    UnterminatedString {
        /// Position where the string started.
        position: Position,
    },
    /// Unterminated backtick-quoted identifier.
    #[error("Unterminated quoted identifier starting at {position}")]
    UnterminatedIdentifier {
        /// Position where the identifier started.
        position: Position,
    },
    /// Unterminated block comment.
    #[error("Unterminated comment starting at {position}")]
    UnterminatedComment {
        /// Position where the comment started.
        position: Position,
    },
    /// Integer literal that does not fit in 64 bits.
    #[error("Invalid number '{value}' at {position}")]
    InvalidNumber {
        /// The invalid number string.
        value: String,
        /// Position in input.
        position: Position,
    },
}

impl LexerError {
    /// Where in the input the error was detected.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            LexerError::UnexpectedChar { position, .. }
            | LexerError::UnterminatedString { position }
            | LexerError::UnterminatedIdentifier { position }
            | LexerError::UnterminatedComment { position }
            | LexerError::InvalidNumber { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> alloc::vec::Vec<TokenKind<'_>> {
        let mut lexer = Lexer::new(input);
        let mut kinds = alloc::vec::Vec::new();
        loop {
            let token = lexer.next().unwrap();
            if token.kind == TokenKind::Eof {
                return kinds;
            }
            kinds.push(token.kind);
        }
    }

    #[test]
    fn test_keyword_table_is_sorted() {
        assert!(KEYWORDS.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            kinds("create Table aLtEr key_block_size"),
            [
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Keyword(Keyword::Alter),
                TokenKind::Keyword(Keyword::KeyBlockSize),
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            kinds("users my_table _private tables"),
            [
                TokenKind::Identifier("users"),
                TokenKind::Identifier("my_table"),
                TokenKind::Identifier("_private"),
                TokenKind::Identifier("tables"),
            ]
        );
    }

    #[test]
    fn test_quoted_identifier_is_never_a_keyword() {
        assert_eq!(
            kinds("`order` `a``b`"),
            [
                TokenKind::QuotedIdentifier("order".into()),
                TokenKind::QuotedIdentifier("a`b".into()),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("0 42 18446744073709551615"),
            [
                TokenKind::Number(0),
                TokenKind::Number(42),
                TokenKind::Number(u64::MAX),
            ]
        );
    }

    #[test]
    fn test_number_overflow() {
        let mut lexer = Lexer::new("18446744073709551616");
        assert!(matches!(
            lexer.next(),
            Err(LexerError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            kinds("'hello' \"world\" 'it''s'"),
            [
                TokenKind::StringLiteral("hello".into()),
                TokenKind::StringLiteral("world".into()),
                TokenKind::StringLiteral("it's".into()),
            ]
        );
    }

    #[test]
    fn test_backslash_escapes() {
        assert_eq!(
            kinds(r#"'it\'s' "a\"b" 'tab\there' '\\' 'caf\é'"#),
            [
                TokenKind::StringLiteral("it's".into()),
                TokenKind::StringLiteral("a\"b".into()),
                TokenKind::StringLiteral("tab\there".into()),
                TokenKind::StringLiteral("\\".into()),
                TokenKind::StringLiteral("café".into()),
            ]
        );
    }

    #[test]
    fn test_backslash_is_literal_in_quoted_identifier() {
        assert_eq!(
            kinds(r"`a\b`"),
            [TokenKind::QuotedIdentifier(r"a\b".into())]
        );
    }

    #[test]
    fn test_escaped_closing_quote_is_unterminated() {
        for input in [r"'abc\'", r"'abc\"] {
            let err = Lexer::new(input).next().unwrap_err();
            assert!(matches!(err, LexerError::UnterminatedString { .. }), "{input}");
        }
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("DEFAULT 'abc");
        lexer.next().unwrap();
        let err = lexer.next().unwrap_err();
        assert!(matches!(err, LexerError::UnterminatedString { .. }));
        assert_eq!(err.position().column, 9);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(
            kinds("(),;="),
            [
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Equals,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("-- leading\nINT /* inline */ TEXT # trailing"),
            [
                TokenKind::Keyword(Keyword::Int),
                TokenKind::Keyword(Keyword::Text),
            ]
        );
    }

    #[test]
    fn test_unexpected_char_position() {
        let mut lexer = Lexer::new("CREATE\n  TABLE @");
        lexer.next().unwrap();
        lexer.next().unwrap();
        let err = lexer.next().unwrap_err();
        assert_eq!(
            err,
            LexerError::UnexpectedChar {
                char: '@',
                position: Position {
                    offset: 15,
                    line: 2,
                    column: 9,
                },
            }
        );
    }

    #[test]
    fn test_non_ascii_char_is_rejected_whole() {
        let mut lexer = Lexer::new("é");
        assert!(matches!(
            lexer.next(),
            Err(LexerError::UnexpectedChar { char: 'é', .. })
        ));
    }

    #[test]
    fn test_peek_nth_does_not_consume() {
        let mut lexer = Lexer::new("DEFAULT CHARACTER SET");
        assert_eq!(
            lexer.peek_nth(1).unwrap().kind,
            TokenKind::Keyword(Keyword::Character)
        );
        assert_eq!(lexer.next().unwrap().text, "DEFAULT");
        assert_eq!(lexer.next().unwrap().text, "CHARACTER");
        assert_eq!(lexer.next().unwrap().text, "SET");
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next().unwrap().kind, TokenKind::Eof);
    }
}
