use crate::{
    ast::{Expr, LiteralValue, Program},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{binary::parse_logical_or, statement::parse_statement},
        token_stream::TokenStream,
    },
};

/// Result type used by all parsing functions.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a complete program: top-level statements until end of input.
///
/// # Errors
/// Propagates the first `ParseError`; there is no recovery.
pub fn parse_program(tokens: &mut TokenStream) -> ParseResult<Program> {
    let mut statements = Vec::new();
    while !tokens.at_end() {
        statements.push(parse_statement(tokens)?);
    }
    Ok(Program { statements })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, assignment, and descends through the precedence
/// hierarchy from there.
///
/// Grammar: `expression := assignment`
pub fn parse_expression(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_assignment(tokens)
}

/// Parses an assignment expression, right-associatively.
///
/// Grammar: `assignment := logical_or ("=" assignment)?`
///
/// Only a variable reference or a two-dimensional cell access is a legal
/// target; anything else fails with `InvalidAssignmentTarget`.
fn parse_assignment(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let expr = parse_logical_or(tokens)?;

    if tokens.matches(&TokenKind::Equals) {
        let pos = tokens.previous().pos;
        let value = parse_assignment(tokens)?;

        return match expr {
            Expr::Variable { .. } | Expr::CellAccess { .. } => {
                Ok(Expr::Assign { target: Box::new(expr),
                                  value: Box::new(value),
                                  pos })
            },
            other => Err(ParseError::InvalidAssignmentTarget { pos: other.pos() }),
        };
    }

    Ok(expr)
}

/// Parses postfix forms after a primary expression: function calls and
/// two-dimensional cell access, chained arbitrarily.
///
/// Grammar: `postfix := primary ( "(" arguments ")" | "[" expr "]" "[" expr
/// "]" )*`
///
/// A single `[index]` is rejected here; arrays are only ever addressed by
/// row and column.
pub fn parse_postfix(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let mut expr = parse_primary(tokens)?;

    loop {
        if tokens.matches(&TokenKind::LParen) {
            let pos = tokens.previous().pos;
            let arguments = parse_arguments(tokens)?;
            let name = match expr {
                Expr::Variable { name, .. } => name,
                other => {
                    return Err(ParseError::UnexpectedToken { token:
                                                                 "Only a named function can be called.".to_string(),
                                                             pos:   other.pos(), });
                },
            };
            expr = Expr::Call { name,
                                arguments,
                                pos };
        } else if tokens.matches(&TokenKind::LBracket) {
            let pos = tokens.previous().pos;
            let row = parse_expression(tokens)?;
            tokens.expect(&TokenKind::RBracket)?;

            if !tokens.matches(&TokenKind::LBracket) {
                let found = tokens.peek();
                return Err(ParseError::UnexpectedToken { token: format!("Expected '[' for the column index (arrays are two-dimensional), found {:?}.",
                                                                        found.kind),
                                                         pos:   found.pos, });
            }
            let col = parse_expression(tokens)?;
            tokens.expect(&TokenKind::RBracket)?;

            expr = Expr::CellAccess { array: Box::new(expr),
                                      row: Box::new(row),
                                      col: Box::new(col),
                                      pos };
        } else {
            break;
        }
    }

    Ok(expr)
}

/// Parses a comma-separated argument list, consuming the closing `)`.
///
/// An immediately encountered `)` produces an empty list.
fn parse_arguments(tokens: &mut TokenStream) -> ParseResult<Vec<Expr>> {
    let mut arguments = Vec::new();
    if tokens.matches(&TokenKind::RParen) {
        return Ok(arguments);
    }
    loop {
        arguments.push(parse_expression(tokens)?);
        if tokens.matches(&TokenKind::Comma) {
            continue;
        }
        tokens.expect(&TokenKind::RParen)?;
        break;
    }
    Ok(arguments)
}

/// Parses a primary expression: a literal, an identifier, or a
/// parenthesized expression.
fn parse_primary(tokens: &mut TokenStream) -> ParseResult<Expr> {
    let token = tokens.next()?;
    let pos = token.pos;

    match token.kind {
        TokenKind::IntLit(v) => Ok(Expr::Literal { value: LiteralValue::Int(v),
                                                   pos }),
        TokenKind::FloatLit(v) => Ok(Expr::Literal { value: LiteralValue::Float(v),
                                                     pos }),
        TokenKind::BoolLit(v) => Ok(Expr::Literal { value: LiteralValue::Bool(v),
                                                    pos }),
        TokenKind::StrLit(s) => Ok(Expr::Literal { value: LiteralValue::Str(s),
                                                   pos }),
        TokenKind::Identifier(name) => Ok(Expr::Variable { name, pos }),
        TokenKind::LParen => {
            let expr = parse_expression(tokens)?;
            tokens.expect(&TokenKind::RParen)?;
            Ok(expr)
        },
        other => Err(ParseError::UnexpectedToken { token: format!("Expected an expression, found {other:?}."),
                                                   pos }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::BinaryOperator, interpreter::lexer::tokenize};

    fn parse(source: &str) -> ParseResult<Expr> {
        let mut tokens = TokenStream::new(tokenize(source).unwrap());
        parse_expression(&mut tokens)
    }

    #[test]
    fn assignment_is_right_associative() {
        let expr = parse("a = b = 20").unwrap();
        let Expr::Assign { target, value, .. } = expr else {
            panic!("expected assignment");
        };
        assert!(matches!(*target, Expr::Variable { ref name, .. } if name == "a"));
        let Expr::Assign { target: inner, .. } = *value else {
            panic!("expected nested assignment");
        };
        assert!(matches!(*inner, Expr::Variable { ref name, .. } if name == "b"));
    }

    #[test]
    fn literal_is_not_an_assignment_target() {
        assert!(matches!(parse("1 = 2"), Err(ParseError::InvalidAssignmentTarget { .. })));
        assert!(matches!(parse("f() = 2"), Err(ParseError::InvalidAssignmentTarget { .. })));
    }

    #[test]
    fn cell_access_requires_two_indices() {
        assert!(parse("a[1][2]").is_ok());
        assert!(matches!(parse("a[1] + 1"), Err(ParseError::UnexpectedToken { .. })));
    }

    #[test]
    fn call_arguments_parse_in_order() {
        let expr = parse("add(1, 2 + 3)").unwrap();
        let Expr::Call { name, arguments, .. } = expr else {
            panic!("expected call");
        };
        assert_eq!(name, "add");
        assert_eq!(arguments.len(), 2);
        assert!(matches!(arguments[1],
                         Expr::Binary { op: BinaryOperator::Add, .. }));
    }

    #[test]
    fn parentheses_group() {
        let expr = parse("(1 + 2) * 3").unwrap();
        assert!(matches!(expr, Expr::Binary { op: BinaryOperator::Mul, .. }));
    }
}
