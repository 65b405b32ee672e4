use crate::{
    ast::Type,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::core::ParseResult,
        token_stream::TokenStream,
    },
};

/// Returns `true` if the token can begin a type.
#[must_use]
pub const fn starts_type(kind: &TokenKind) -> bool {
    matches!(kind,
             TokenKind::KwInt
             | TokenKind::KwFloat
             | TokenKind::KwBool
             | TokenKind::KwString
             | TokenKind::KwVoid)
}

/// Parses a declared type: a base type keyword followed by zero, one, or two
/// `[]` pairs.
///
/// The grammar only admits one array type, `string[][]`. Any other base
/// type with brackets, and any dimension other than two, is rejected here
/// rather than deferred to evaluation.
///
/// # Errors
/// Returns a `ParseError` if the next token is not a type keyword, if the
/// brackets are unbalanced, or if the array restriction is violated.
pub fn parse_type(tokens: &mut TokenStream) -> ParseResult<Type> {
    let token = tokens.next()?;
    let base = match token.kind {
        TokenKind::KwInt => Type::Int,
        TokenKind::KwFloat => Type::Float,
        TokenKind::KwBool => Type::Bool,
        TokenKind::KwString => Type::Str,
        TokenKind::KwVoid => Type::Void,
        other => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected a type, found {other:?}."),
                                                     pos:   token.pos, });
        },
    };

    let mut dim = 0usize;
    while tokens.matches(&TokenKind::LBracket) {
        tokens.expect(&TokenKind::RBracket)?;
        dim += 1;
    }

    match (base, dim) {
        (base, 0) => Ok(base),
        (Type::Str, 2) => Ok(Type::StrGrid),
        (base, dim) => {
            let brackets = "[]".repeat(dim);
            Err(ParseError::InvalidArrayType { found: format!("{base}{brackets}"),
                                               pos:   token.pos, })
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> ParseResult<Type> {
        let mut tokens = TokenStream::new(tokenize(source).unwrap());
        parse_type(&mut tokens)
    }

    #[test]
    fn scalar_types_parse() {
        assert_eq!(parse("int").unwrap(), Type::Int);
        assert_eq!(parse("float").unwrap(), Type::Float);
        assert_eq!(parse("bool").unwrap(), Type::Bool);
        assert_eq!(parse("string").unwrap(), Type::Str);
        assert_eq!(parse("void").unwrap(), Type::Void);
    }

    #[test]
    fn only_string_grid_is_a_legal_array_type() {
        assert_eq!(parse("string[][]").unwrap(), Type::StrGrid);
        assert!(matches!(parse("string[]"), Err(ParseError::InvalidArrayType { .. })));
        assert!(matches!(parse("int[][]"), Err(ParseError::InvalidArrayType { .. })));
        assert!(matches!(parse("string[][][]"), Err(ParseError::InvalidArrayType { .. })));
    }
}
