use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::TokenKind,
        parser::{core::ParseResult, unary::parse_unary},
        token_stream::TokenStream,
    },
};

/// Parses a left-associative binary level.
///
/// Repeatedly consumes any of the given operator tokens, parsing the next
/// higher-precedence level as the right operand and folding the result to
/// the left.
fn parse_binary_level(tokens: &mut TokenStream,
                      operators: &[(TokenKind, BinaryOperator)],
                      next: fn(&mut TokenStream) -> ParseResult<Expr>)
                      -> ParseResult<Expr> {
    let mut expr = next(tokens)?;

    'outer: loop {
        for (kind, op) in operators {
            if tokens.matches(kind) {
                let pos = tokens.previous().pos;
                let right = next(tokens)?;
                expr = Expr::Binary { left: Box::new(expr),
                                      op: *op,
                                      right: Box::new(right),
                                      pos };
                continue 'outer;
            }
        }
        break;
    }

    Ok(expr)
}

/// Parses a logical OR expression.
///
/// Grammar: `logical_or := logical_and ("||" logical_and)*`
pub fn parse_logical_or(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_binary_level(tokens,
                       &[(TokenKind::PipePipe, BinaryOperator::Or)],
                       parse_logical_and)
}

/// Parses a logical AND expression.
///
/// Grammar: `logical_and := equality ("&&" equality)*`
pub fn parse_logical_and(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_binary_level(tokens,
                       &[(TokenKind::AmpAmp, BinaryOperator::And)],
                       parse_equality)
}

/// Parses an equality expression.
///
/// Grammar: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_binary_level(tokens,
                       &[(TokenKind::EqualEqual, BinaryOperator::Equal),
                         (TokenKind::BangEqual, BinaryOperator::NotEqual)],
                       parse_relational)
}

/// Parses a relational expression.
///
/// Grammar: `relational := additive (("<" | ">" | "<=" | ">=") additive)*`
pub fn parse_relational(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_binary_level(tokens,
                       &[(TokenKind::Less, BinaryOperator::Less),
                         (TokenKind::Greater, BinaryOperator::Greater),
                         (TokenKind::LessEqual, BinaryOperator::LessEqual),
                         (TokenKind::GreaterEqual, BinaryOperator::GreaterEqual)],
                       parse_additive)
}

/// Parses an additive expression.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_binary_level(tokens,
                       &[(TokenKind::Plus, BinaryOperator::Add),
                         (TokenKind::Minus, BinaryOperator::Sub)],
                       parse_multiplicative)
}

/// Parses a multiplicative expression.
///
/// Grammar: `multiplicative := unary (("*" | "/" | "%") unary)*`
pub fn parse_multiplicative(tokens: &mut TokenStream) -> ParseResult<Expr> {
    parse_binary_level(tokens,
                       &[(TokenKind::Star, BinaryOperator::Mul),
                         (TokenKind::Slash, BinaryOperator::Div),
                         (TokenKind::Percent, BinaryOperator::Mod)],
                       parse_unary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::UnaryOperator,
        interpreter::{lexer::tokenize, parser::core::parse_expression},
    };

    fn parse(source: &str) -> Expr {
        let mut tokens = TokenStream::new(tokenize(source).unwrap());
        parse_expression(&mut tokens).expect("parse failed")
    }

    #[test]
    fn precedence_follows_the_ladder() {
        // a + b * c == !d || e  parses as  ((a + (b*c)) == (!d)) || e
        let Expr::Binary { left, op, right, .. } = parse("a + b * c == !d || e") else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOperator::Or);
        assert!(matches!(*right, Expr::Variable { ref name, .. } if name == "e"));

        let Expr::Binary { left: eq_left,
                           op: eq_op,
                           right: eq_right,
                           .. } = *left
        else {
            panic!("expected equality");
        };
        assert_eq!(eq_op, BinaryOperator::Equal);
        assert!(matches!(*eq_right,
                         Expr::Unary { op: UnaryOperator::Not, .. }));

        let Expr::Binary { op: add_op, right: add_right, .. } = *eq_left else {
            panic!("expected addition");
        };
        assert_eq!(add_op, BinaryOperator::Add);
        assert!(matches!(*add_right,
                         Expr::Binary { op: BinaryOperator::Mul, .. }));
    }

    #[test]
    fn same_level_operators_are_left_associative() {
        let Expr::Binary { left, op, .. } = parse("a - b + c") else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOperator::Add);
        assert!(matches!(*left, Expr::Binary { op: BinaryOperator::Sub, .. }));
    }

    #[test]
    fn relational_binds_tighter_than_equality() {
        let Expr::Binary { op, .. } = parse("a < b == c > d") else {
            panic!("expected binary");
        };
        assert_eq!(op, BinaryOperator::Equal);
    }
}
