use logos::Logos;

use crate::{ast::Pos, error::LexError};

/// Maximum length of a single token, in characters.
pub const MAX_TOKEN_LEN: usize = 256;

/// A lexical token: its kind and the source position it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The token kind, with literal payloads already parsed.
    pub kind: TokenKind,
    /// The position of the token's first character.
    pub pos:  Pos,
}

/// The kinds of tokens the language recognizes.
///
/// Keyword kinds always win over `Identifier` when both match the same text;
/// the raw pattern table resolves ties by longest match first and fixed
/// priority second.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `int`
    KwInt,
    /// `float`
    KwFloat,
    /// `bool`
    KwBool,
    /// `string`
    KwString,
    /// `void`
    KwVoid,
    /// `if`
    KwIf,
    /// `else_if`
    KwElseIf,
    /// `else`
    KwElse,
    /// `for`
    KwFor,
    /// `while`
    KwWhile,
    /// `return`
    KwReturn,
    /// `break`
    KwBreak,
    /// `continue`
    KwContinue,
    /// Integer literal, e.g. `42`.
    IntLit(i32),
    /// Float literal, e.g. `3.14`.
    FloatLit(f32),
    /// Boolean literal, `true` or `false`.
    BoolLit(bool),
    /// String literal with escapes decoded.
    StrLit(String),
    /// Identifier: variable or function name.
    Identifier(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `&&`
    AmpAmp,
    /// `||`
    PipePipe,
    /// `!`
    Bang,
    /// `=`
    Equals,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// End of input. Always the last token produced.
    Eof,
}

/// Raw pattern table driving the lexer.
///
/// Converted into [`TokenKind`] by [`tokenize`]; the extra variants catch
/// malformed input so it can be reported precisely instead of as an unknown
/// character.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n\r]*")]
enum RawToken {
    #[token("int")]
    KwInt,
    #[token("float")]
    KwFloat,
    #[token("bool")]
    KwBool,
    #[token("string")]
    KwString,
    #[token("void")]
    KwVoid,
    #[token("if")]
    KwIf,
    #[token("else_if")]
    KwElseIf,
    #[token("else")]
    KwElse,
    #[token("for")]
    KwFor,
    #[token("while")]
    KwWhile,
    #[token("return")]
    KwReturn,
    #[token("break")]
    KwBreak,
    #[token("continue")]
    KwContinue,
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    BoolLit(bool),
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    FloatLit(f32),
    #[regex(r"[0-9]+", parse_integer)]
    IntLit(i32),
    /// A float literal missing digits on one side of the dot, e.g. `1.` or
    /// `.5`. Longest-match ensures this only wins when the well-formed
    /// float pattern cannot.
    #[regex(r"[0-9]+\.")]
    #[regex(r"\.[0-9]+")]
    MalformedNumber,
    #[regex(r#""([^"\\\n\r]|\\.)*""#, parse_string)]
    StrLit(String),
    /// A string opened but never closed on its line.
    #[regex(r#""([^"\\\n\r]|\\.)*"#)]
    UnterminatedString,
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("!")]
    Bang,
    #[token("=")]
    Equals,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
}

/// Tokenizes a complete source string.
///
/// Scanning is fail-fast: the first lexical error aborts tokenization and is
/// returned with the position of the offending text. On success the token
/// vector always ends with a single [`TokenKind::Eof`] holding the final
/// position.
///
/// # Errors
/// Returns a [`LexError`] for an unknown character, a token longer than
/// [`MAX_TOKEN_LEN`] characters, a malformed float literal, an integer
/// literal outside the `int` range, or an unterminated string.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut cursor = SourceCursor::new(source);
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let pos = cursor.position_of(span.start);

        if slice.chars().count() > MAX_TOKEN_LEN {
            return Err(LexError::OverlongToken { length: slice.chars().count(),
                                                 pos });
        }

        let kind = match raw {
            Ok(RawToken::MalformedNumber) => {
                return Err(LexError::MalformedNumber { lexeme: slice.to_string(),
                                                       pos });
            },
            Ok(RawToken::UnterminatedString) => {
                return Err(LexError::UnterminatedString { pos });
            },
            Ok(raw) => convert(raw),
            Err(()) => {
                // Literal-parse callbacks report failure through here; the
                // slice tells the cases apart.
                if slice.starts_with(|c: char| c.is_ascii_digit()) {
                    return Err(LexError::NumberOutOfRange { lexeme: slice.to_string(),
                                                            pos });
                }
                return Err(LexError::UnknownCharacter { lexeme: slice.to_string(),
                                                        pos });
            },
        };

        tokens.push(Token { kind, pos });
    }

    tokens.push(Token { kind: TokenKind::Eof,
                        pos:  cursor.position_of(source.len()), });
    Ok(tokens)
}

/// Maps a well-formed raw token to its public kind.
fn convert(raw: RawToken) -> TokenKind {
    match raw {
        RawToken::KwInt => TokenKind::KwInt,
        RawToken::KwFloat => TokenKind::KwFloat,
        RawToken::KwBool => TokenKind::KwBool,
        RawToken::KwString => TokenKind::KwString,
        RawToken::KwVoid => TokenKind::KwVoid,
        RawToken::KwIf => TokenKind::KwIf,
        RawToken::KwElseIf => TokenKind::KwElseIf,
        RawToken::KwElse => TokenKind::KwElse,
        RawToken::KwFor => TokenKind::KwFor,
        RawToken::KwWhile => TokenKind::KwWhile,
        RawToken::KwReturn => TokenKind::KwReturn,
        RawToken::KwBreak => TokenKind::KwBreak,
        RawToken::KwContinue => TokenKind::KwContinue,
        RawToken::BoolLit(b) => TokenKind::BoolLit(b),
        RawToken::FloatLit(v) => TokenKind::FloatLit(v),
        RawToken::IntLit(v) => TokenKind::IntLit(v),
        RawToken::StrLit(s) => TokenKind::StrLit(s),
        RawToken::Identifier(s) => TokenKind::Identifier(s),
        RawToken::EqualEqual => TokenKind::EqualEqual,
        RawToken::BangEqual => TokenKind::BangEqual,
        RawToken::LessEqual => TokenKind::LessEqual,
        RawToken::GreaterEqual => TokenKind::GreaterEqual,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Less => TokenKind::Less,
        RawToken::Greater => TokenKind::Greater,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Equals => TokenKind::Equals,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::MalformedNumber | RawToken::UnterminatedString => {
            unreachable!("handled before conversion")
        },
    }
}

/// Incremental byte-offset to `(line, column)` translator.
///
/// Token spans arrive in increasing offset order, so the cursor walks the
/// source exactly once. A tab advances the column to the next multiple of
/// four relative to column 1; `\r\n` counts as a single line advance.
struct SourceCursor<'s> {
    source: &'s str,
    offset: usize,
    line:   usize,
    col:    usize,
}

impl<'s> SourceCursor<'s> {
    fn new(source: &'s str) -> Self {
        Self { source,
               offset: 0,
               line: 1,
               col: 1 }
    }

    /// Returns the position of the given byte offset.
    ///
    /// Offsets must be requested in non-decreasing order.
    fn position_of(&mut self, target: usize) -> Pos {
        let mut chars = self.source[self.offset..].char_indices().peekable();

        while let Some((i, ch)) = chars.next() {
            if self.offset + i >= target {
                break;
            }
            match ch {
                '\n' => {
                    self.line += 1;
                    self.col = 1;
                },
                '\r' => {
                    // A \r\n pair advances the line once, at the \n.
                    if !matches!(chars.peek(), Some((_, '\n'))) {
                        self.line += 1;
                        self.col = 1;
                    }
                },
                '\t' => {
                    self.col += 4 - ((self.col - 1) % 4);
                },
                _ => {
                    self.col += 1;
                },
            }
        }

        self.offset = target;
        Pos::new(self.line, self.col)
    }
}

fn parse_bool(lex: &mut logos::Lexer<RawToken>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_integer(lex: &mut logos::Lexer<RawToken>) -> Option<i32> {
    lex.slice().parse().ok()
}

fn parse_float(lex: &mut logos::Lexer<RawToken>) -> Option<f32> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &mut logos::Lexer<RawToken>) -> Option<String> {
    let slice = lex.slice();
    Some(decode_escapes(&slice[1..slice.len() - 1]))
}

/// Decodes the supported escape sequences in a string literal body.
///
/// Recognized escapes are `\"`, `\\`, `\n`, `\r`, and `\t`. An unrecognized
/// escape is kept verbatim, backslash included.
fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            },
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).expect("tokenize failed")
                        .into_iter()
                        .map(|t| t.kind)
                        .collect()
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(kinds("while whilex"),
                   vec![TokenKind::KwWhile,
                        TokenKind::Identifier("whilex".to_string()),
                        TokenKind::Eof]);
        assert_eq!(kinds("else_if"), vec![TokenKind::KwElseIf, TokenKind::Eof]);
    }

    #[test]
    fn longest_match_for_compound_operators() {
        assert_eq!(kinds("== = <= < !="),
                   vec![TokenKind::EqualEqual,
                        TokenKind::Equals,
                        TokenKind::LessEqual,
                        TokenKind::Less,
                        TokenKind::BangEqual,
                        TokenKind::Eof]);
    }

    #[test]
    fn positions_track_lines_and_columns() {
        let tokens = tokenize("int x;\nx = 1;").unwrap();
        assert_eq!(tokens[0].pos, Pos::new(1, 1));
        assert_eq!(tokens[1].pos, Pos::new(1, 5));
        assert_eq!(tokens[3].pos, Pos::new(2, 1));
        assert_eq!(tokens[4].pos, Pos::new(2, 3));
    }

    #[test]
    fn tab_advances_to_next_multiple_of_four() {
        let tokens = tokenize("\tx").unwrap();
        assert_eq!(tokens[0].pos, Pos::new(1, 5));

        let tokens = tokenize("ab\tx").unwrap();
        assert_eq!(tokens[1].pos, Pos::new(1, 5));
    }

    #[test]
    fn crlf_counts_as_one_line() {
        let tokens = tokenize("a\r\nb").unwrap();
        assert_eq!(tokens[0].pos, Pos::new(1, 1));
        assert_eq!(tokens[1].pos, Pos::new(2, 1));
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        assert_eq!(kinds("1 # a comment\n2"),
                   vec![TokenKind::IntLit(1), TokenKind::IntLit(2), TokenKind::Eof]);
    }

    #[test]
    fn string_escapes_decode() {
        assert_eq!(kinds(r#""a\tb\"c\\""#),
                   vec![TokenKind::StrLit("a\tb\"c\\".to_string()), TokenKind::Eof]);
    }

    #[test]
    fn malformed_floats_fail_fast() {
        assert!(matches!(tokenize("1."), Err(LexError::MalformedNumber { .. })));
        assert!(matches!(tokenize(".5"), Err(LexError::MalformedNumber { .. })));
        assert!(tokenize("1.5").is_ok());
    }

    #[test]
    fn unterminated_string_is_an_error() {
        assert!(matches!(tokenize("\"abc"), Err(LexError::UnterminatedString { .. })));
    }

    #[test]
    fn unknown_character_is_an_error() {
        assert!(matches!(tokenize("a $ b"), Err(LexError::UnknownCharacter { .. })));
    }

    #[test]
    fn int_literal_overflow_is_an_error() {
        assert!(matches!(tokenize("99999999999"), Err(LexError::NumberOutOfRange { .. })));
    }

    #[test]
    fn overlong_token_is_an_error() {
        let long = "x".repeat(MAX_TOKEN_LEN + 1);
        assert!(matches!(tokenize(&long), Err(LexError::OverlongToken { .. })));
    }
}
