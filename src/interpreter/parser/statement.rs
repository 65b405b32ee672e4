use crate::{
    ast::{Block, ConditionalBranch, Expr, FunctionDecl, Param, Stmt, Type},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, parse_expression},
            types::{parse_type, starts_type},
        },
        token_stream::TokenStream,
    },
};

/// Parses a single statement.
///
/// Statement dispatch is driven by the current token:
/// - a type keyword starts a variable declaration or, when the declared
///   name is followed by `(`, a function declaration;
/// - `if`, `while`, `for`, `return`, `break`, and `continue` parse their
///   respective forms;
/// - a bare `{` is rejected (blocks only appear as bodies);
/// - anything else is an expression statement terminated by `;`.
pub fn parse_statement(tokens: &mut TokenStream) -> ParseResult<Stmt> {
    match &tokens.peek().kind {
        kind if starts_type(kind) => parse_declaration_or_function(tokens),
        TokenKind::KwIf => parse_if(tokens),
        TokenKind::KwWhile => parse_while(tokens),
        TokenKind::KwFor => parse_for(tokens),
        TokenKind::KwReturn => parse_return(tokens),
        TokenKind::KwBreak => {
            let pos = tokens.next()?.pos;
            tokens.expect(&TokenKind::Semicolon)?;
            Ok(Stmt::Break { pos })
        },
        TokenKind::KwContinue => {
            let pos = tokens.next()?.pos;
            tokens.expect(&TokenKind::Semicolon)?;
            Ok(Stmt::Continue { pos })
        },
        TokenKind::LBrace => Err(ParseError::BareBlock { pos: tokens.pos() }),
        _ => {
            let pos = tokens.pos();
            let expr = parse_expression(tokens)?;
            tokens.expect(&TokenKind::Semicolon)?;
            Ok(Stmt::Expression { expr, pos })
        },
    }
}

/// Parses a brace-delimited block of statements.
pub fn parse_block(tokens: &mut TokenStream) -> ParseResult<Block> {
    let pos = tokens.expect(&TokenKind::LBrace)?.pos;

    let mut statements = Vec::new();
    while !tokens.matches(&TokenKind::RBrace) {
        if tokens.at_end() {
            return Err(ParseError::UnexpectedEndOfInput { pos: tokens.pos() });
        }
        statements.push(parse_statement(tokens)?);
    }

    Ok(Block { statements, pos })
}

/// Parses a variable declaration or a function declaration.
///
/// Both begin with a type and a name; a following `(` selects the function
/// form. Variable declarations require an initializer, and a declaration of
/// the array type must be initialized with a direct `csv_to_array(...)`
/// call; both restrictions are grammar-level, not runtime checks.
fn parse_declaration_or_function(tokens: &mut TokenStream) -> ParseResult<Stmt> {
    let pos = tokens.pos();
    let ty = parse_type(tokens)?;
    let name_token = tokens.expect(&TokenKind::Identifier(String::new()))?;
    let TokenKind::Identifier(name) = name_token.kind else {
        unreachable!()
    };

    if tokens.matches(&TokenKind::LParen) {
        let params = parse_params(tokens)?;
        let body = parse_block(tokens)?;
        return Ok(Stmt::Function(FunctionDecl { return_type: ty,
                                                name,
                                                params,
                                                body,
                                                pos }));
    }

    if ty.is_void() {
        return Err(ParseError::UnexpectedToken { token: format!("Variable '{name}' cannot have type 'void'."),
                                                 pos });
    }

    if !tokens.matches(&TokenKind::Equals) {
        return Err(ParseError::MissingInitializer { name, pos });
    }
    let init = parse_expression(tokens)?;
    tokens.expect(&TokenKind::Semicolon)?;

    if ty == Type::StrGrid
       && !matches!(init, Expr::Call { ref name, .. } if name == "csv_to_array")
    {
        return Err(ParseError::InvalidArrayInitializer { name, pos });
    }

    Ok(Stmt::Declaration { ty, name, init, pos })
}

/// Parses a parameter list, with the opening `(` already consumed.
fn parse_params(tokens: &mut TokenStream) -> ParseResult<Vec<Param>> {
    let mut params = Vec::new();
    if tokens.matches(&TokenKind::RParen) {
        return Ok(params);
    }
    loop {
        let pos = tokens.pos();
        let ty = parse_type(tokens)?;
        if ty.is_void() {
            return Err(ParseError::UnexpectedToken { token: "A parameter cannot have type 'void'.".to_string(),
                                                     pos });
        }
        let name_token = tokens.expect(&TokenKind::Identifier(String::new()))?;
        let TokenKind::Identifier(name) = name_token.kind else {
            unreachable!()
        };
        params.push(Param { ty, name });

        if tokens.matches(&TokenKind::Comma) {
            continue;
        }
        tokens.expect(&TokenKind::RParen)?;
        break;
    }
    Ok(params)
}

/// Parses an `if` statement with its `else_if` arms and optional `else`.
///
/// Grammar:
/// ```text
///     if := "if" "(" expression ")" block
///           ("else_if" "(" expression ")" block)*
///           ("else" block)?
/// ```
fn parse_if(tokens: &mut TokenStream) -> ParseResult<Stmt> {
    let pos = tokens.next()?.pos;
    let mut branches = vec![parse_guarded_block(tokens)?];

    while tokens.matches(&TokenKind::KwElseIf) {
        branches.push(parse_guarded_block(tokens)?);
    }

    let else_body = if tokens.matches(&TokenKind::KwElse) {
        Some(parse_block(tokens)?)
    } else {
        None
    };

    Ok(Stmt::If { branches,
                  else_body,
                  pos })
}

/// Parses `"(" expression ")" block`, shared by `if` and `else_if` arms.
fn parse_guarded_block(tokens: &mut TokenStream) -> ParseResult<ConditionalBranch> {
    tokens.expect(&TokenKind::LParen)?;
    let condition = parse_expression(tokens)?;
    tokens.expect(&TokenKind::RParen)?;
    let body = parse_block(tokens)?;
    Ok(ConditionalBranch { condition, body })
}

/// Parses a `while` loop.
fn parse_while(tokens: &mut TokenStream) -> ParseResult<Stmt> {
    let pos = tokens.next()?.pos;
    tokens.expect(&TokenKind::LParen)?;
    let condition = parse_expression(tokens)?;
    tokens.expect(&TokenKind::RParen)?;
    let body = parse_block(tokens)?;
    Ok(Stmt::While { condition, body, pos })
}

/// Parses a `for` loop.
///
/// Any of the three header parts may be omitted, probed by looking for the
/// `;` or `)` that would end them:
/// ```text
///     for := "for" "(" expression? ";" expression? ";" expression? ")" block
/// ```
fn parse_for(tokens: &mut TokenStream) -> ParseResult<Stmt> {
    let pos = tokens.next()?.pos;
    tokens.expect(&TokenKind::LParen)?;

    let init = if matches!(tokens.peek().kind, TokenKind::Semicolon) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    tokens.expect(&TokenKind::Semicolon)?;

    let condition = if matches!(tokens.peek().kind, TokenKind::Semicolon) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    tokens.expect(&TokenKind::Semicolon)?;

    let post = if matches!(tokens.peek().kind, TokenKind::RParen) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    tokens.expect(&TokenKind::RParen)?;

    let body = parse_block(tokens)?;
    Ok(Stmt::For { init,
                   condition,
                   post,
                   body,
                   pos })
}

/// Parses a `return` statement with an optional value.
fn parse_return(tokens: &mut TokenStream) -> ParseResult<Stmt> {
    let pos = tokens.next()?.pos;
    let value = if matches!(tokens.peek().kind, TokenKind::Semicolon) {
        None
    } else {
        Some(parse_expression(tokens)?)
    };
    tokens.expect(&TokenKind::Semicolon)?;
    Ok(Stmt::Return { value, pos })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::tokenize;

    fn parse(source: &str) -> ParseResult<Stmt> {
        let mut tokens = TokenStream::new(tokenize(source).unwrap());
        parse_statement(&mut tokens)
    }

    #[test]
    fn function_declarations_parse() {
        let stmt = parse("int add(int a, int b) { return a + b; }").unwrap();
        let Stmt::Function(decl) = stmt else {
            panic!("expected function");
        };
        assert_eq!(decl.name, "add");
        assert_eq!(decl.return_type, Type::Int);
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.params[0].name, "a");
    }

    #[test]
    fn declarations_require_an_initializer() {
        assert!(matches!(parse("int x;"), Err(ParseError::MissingInitializer { .. })));
        assert!(parse("int x = 1;").is_ok());
    }

    #[test]
    fn void_variables_are_rejected() {
        assert!(parse("void x = 1;").is_err());
    }

    #[test]
    fn array_declarations_must_call_csv_to_array() {
        assert!(parse(r#"string[][] t = csv_to_array("data.csv");"#).is_ok());
        assert!(matches!(parse("string[][] t = other();"),
                         Err(ParseError::InvalidArrayInitializer { .. })));
        assert!(matches!(parse("string[][] t = 1;"),
                         Err(ParseError::InvalidArrayInitializer { .. })));
    }

    #[test]
    fn bare_blocks_are_rejected() {
        assert!(matches!(parse("{ int x = 1; }"), Err(ParseError::BareBlock { .. })));
    }

    #[test]
    fn else_if_chains_parse() {
        let stmt = parse("if (a) { } else_if (b) { } else_if (c) { } else { }").unwrap();
        let Stmt::If { branches, else_body, .. } = stmt else {
            panic!("expected if");
        };
        assert_eq!(branches.len(), 3);
        assert!(else_body.is_some());
    }

    #[test]
    fn for_headers_may_be_empty() {
        let stmt = parse("for (;;) { }").unwrap();
        let Stmt::For { init, condition, post, .. } = stmt else {
            panic!("expected for");
        };
        assert!(init.is_none());
        assert!(condition.is_none());
        assert!(post.is_none());

        assert!(parse("for (i = 0; i < 3; i = i + 1) { }").is_ok());
    }

    #[test]
    fn return_value_is_optional() {
        assert!(matches!(parse("return;").unwrap(), Stmt::Return { value: None, .. }));
        assert!(matches!(parse("return 1;").unwrap(), Stmt::Return { value: Some(_), .. }));
    }
}
