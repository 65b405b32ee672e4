use std::mem::discriminant;

use crate::{
    ast::Pos,
    error::ParseError,
    interpreter::lexer::{Token, TokenKind},
};

/// A cursor over the token sequence produced by the lexer.
///
/// The sequence is always terminated by a [`TokenKind::Eof`] sentinel, so
/// `peek` never runs past the end; consuming operations fail with a
/// positioned error once the sentinel is reached. Kinds are compared by
/// variant, ignoring literal payloads, so `expect` and `matches` can be
/// probed with payload-free template values.
#[derive(Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    index:  usize,
}

impl TokenStream {
    /// Wraps a token vector ending in an `Eof` token.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        debug_assert!(matches!(tokens.last(), Some(Token { kind: TokenKind::Eof, .. })));
        Self { tokens, index: 0 }
    }

    /// Returns the current token without consuming it.
    #[must_use]
    pub fn peek(&self) -> &Token {
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    /// Returns the token `n` positions ahead of the cursor, clamped to the
    /// trailing `Eof`.
    #[must_use]
    pub fn peek_ahead(&self, n: usize) -> &Token {
        let at = (self.index + n).min(self.tokens.len() - 1);
        &self.tokens[at]
    }

    /// Returns the most recently consumed token.
    ///
    /// Before anything has been consumed this is the first token.
    #[must_use]
    pub fn previous(&self) -> &Token {
        &self.tokens[self.index.saturating_sub(1)]
    }

    /// Consumes and returns the current token.
    ///
    /// # Errors
    /// Returns `ParseError::UnexpectedEndOfInput` when the cursor already
    /// stands on the `Eof` sentinel.
    pub fn next(&mut self) -> Result<Token, ParseError> {
        let token = self.peek().clone();
        if matches!(token.kind, TokenKind::Eof) {
            return Err(ParseError::UnexpectedEndOfInput { pos: token.pos });
        }
        self.index += 1;
        Ok(token)
    }

    /// Consumes the current token if it has the expected kind.
    ///
    /// # Errors
    /// Returns `ParseError::UnexpectedToken` naming the expected and found
    /// kinds otherwise; the cursor is left untouched on failure.
    pub fn expect(&mut self, expected: &TokenKind) -> Result<Token, ParseError> {
        let token = self.peek();
        if discriminant(&token.kind) == discriminant(expected) {
            let token = token.clone();
            self.index += 1;
            return Ok(token);
        }
        Err(ParseError::UnexpectedToken { token: format!("Expected {expected:?}, found {:?}.",
                                                         token.kind),
                                          pos:   token.pos, })
    }

    /// Consumes the current token and returns `true` only on an exact kind
    /// match; otherwise leaves the cursor untouched and returns `false`.
    ///
    /// This is the only non-failing probe.
    pub fn matches(&mut self, kind: &TokenKind) -> bool {
        if discriminant(&self.peek().kind) == discriminant(kind) {
            self.index += 1;
            return true;
        }
        false
    }

    /// Returns `true` once the cursor stands on the `Eof` sentinel.
    #[must_use]
    pub fn at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// The position of the current token, for error reporting.
    #[must_use]
    pub fn pos(&self) -> Pos {
        self.peek().pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn stream(source: &str) -> TokenStream {
        TokenStream::new(tokenize(source).expect("tokenize failed"))
    }

    #[test]
    fn peek_does_not_consume() {
        let mut ts = stream("1 2");
        assert_eq!(ts.peek().kind, TokenKind::IntLit(1));
        assert_eq!(ts.peek().kind, TokenKind::IntLit(1));
        assert_eq!(ts.next().unwrap().kind, TokenKind::IntLit(1));
        assert_eq!(ts.peek().kind, TokenKind::IntLit(2));
    }

    #[test]
    fn peek_ahead_clamps_to_eof() {
        let ts = stream("1");
        assert_eq!(ts.peek_ahead(0).kind, TokenKind::IntLit(1));
        assert_eq!(ts.peek_ahead(1).kind, TokenKind::Eof);
        assert_eq!(ts.peek_ahead(99).kind, TokenKind::Eof);
    }

    #[test]
    fn next_past_end_fails() {
        let mut ts = stream("1");
        ts.next().unwrap();
        assert!(matches!(ts.next(), Err(ParseError::UnexpectedEndOfInput { .. })));
    }

    #[test]
    fn expect_mismatch_keeps_cursor() {
        let mut ts = stream("1 2");
        assert!(ts.expect(&TokenKind::Comma).is_err());
        assert_eq!(ts.peek().kind, TokenKind::IntLit(1));
        assert!(ts.expect(&TokenKind::IntLit(0)).is_ok());
    }

    #[test]
    fn matches_consumes_only_on_match() {
        let mut ts = stream(", 1");
        assert!(ts.matches(&TokenKind::Comma));
        assert!(!ts.matches(&TokenKind::Comma));
        assert_eq!(ts.peek().kind, TokenKind::IntLit(1));
    }

    #[test]
    fn previous_returns_last_consumed() {
        let mut ts = stream("1 2");
        ts.next().unwrap();
        assert_eq!(ts.previous().kind, TokenKind::IntLit(1));
    }
}
