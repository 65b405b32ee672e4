use crate::{
    ast::{Expr, UnaryOperator},
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, parse_postfix},
        token_stream::TokenStream,
    },
};

/// Parses a unary expression.
///
/// Supports the prefix operators:
/// - `+`  (numeric identity)
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed
/// as `!( -x )`. If no unary operator is present, the function delegates to
/// postfix parsing.
///
/// Grammar:
/// ```text
///     unary := ("+" | "-" | "!") unary
///            | postfix
/// ```
pub fn parse_unary(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let op = match tokens.peek().kind {
        TokenKind::Plus => Some(UnaryOperator::Plus),
        TokenKind::Minus => Some(UnaryOperator::Negate),
        TokenKind::Bang => Some(UnaryOperator::Not),
        _ => None,
    };

    if let Some(op) = op {
        let pos = tokens.next()?.pos;
        let expr = parse_unary(tokens)?;
        return Ok(Expr::Unary { op,
                                expr: Box::new(expr),
                                pos });
    }

    parse_postfix(tokens)
}
