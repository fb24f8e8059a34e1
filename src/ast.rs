use crate::error::Error;
use crate::token::{Op, Token};

/// Ast nodes for the expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// A constant value
    Value(f64),
    /// -<operand>
    Neg(Box<Ast>),
    /// <left> + <right>
    Add(Box<Ast>, Box<Ast>),
    /// <left> - <right>
    Sub(Box<Ast>, Box<Ast>),
    /// <left> * <right>
    Mul(Box<Ast>, Box<Ast>),
    /// <left> / <right>
    Div(Box<Ast>, Box<Ast>),
}

impl Ast {
    /// Construct the AST for a vector of tokens in reverse polish notation.
    /// This function eats the tokens as it uses them, and fails if some of
    /// them are left over.
    pub fn from_tokens(tokens: &mut Vec<Token>) -> Result<Self, Error> {
        let ast = Self::from_tokens_internal(tokens, "")?;
        if tokens.is_empty() {
            Ok(ast)
        } else {
            Err(Error::ParseError(format!(
                "unexpected operand {}",
                describe(&tokens[tokens.len() - 1])
            )))
        }
    }

    fn from_tokens_internal(tokens: &mut Vec<Token>, context: &str) -> Result<Self, Error> {
        match tokens.pop() {
            Some(Token::Number(literal)) => literal
                .parse()
                .map(Self::Value)
                .map_err(|_| Error::ParseError(format!("invalid number {}", literal))),
            Some(Token::Op(op)) if op.is_unary() => {
                let operand = Self::from_tokens_internal(tokens, " after sign")?;
                match op {
                    Op::Neg => Ok(Self::Neg(Box::new(operand))),
                    _ => Ok(operand),
                }
            }
            Some(Token::Op(op)) => {
                let right = Box::new(Self::from_tokens_internal(tokens, " after operator")?);
                let left = Box::new(Self::from_tokens_internal(tokens, " before operator")?);
                match op {
                    Op::Plus => Ok(Self::Add(left, right)),
                    Op::Minus => Ok(Self::Sub(left, right)),
                    Op::Mul => Ok(Self::Mul(left, right)),
                    _ => Ok(Self::Div(left, right)),
                }
            }
            Some(other) => Err(Error::ParseError(format!(
                "unexpected {} after shunting yard",
                describe(&other)
            ))),
            None => Err(Error::ParseError(format!("empty expression{}", context))),
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(literal) => literal.clone(),
        Token::Op(op) => op.symbol().to_string(),
        Token::LParen => "(".into(),
        Token::RParen => ")".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::Ast;
    use crate::error::Error;
    use crate::lexer::Lexer;

    fn build(input: &str) -> Result<Ast, Error> {
        Ast::from_tokens(&mut Lexer::new(input).parse()?)
    }

    #[test]
    fn structure() {
        let ast = build("1 + 2 * 3").unwrap();
        assert_eq!(
            ast,
            Ast::Add(
                Box::new(Ast::Value(1.0)),
                Box::new(Ast::Mul(
                    Box::new(Ast::Value(2.0)),
                    Box::new(Ast::Value(3.0))
                ))
            )
        );

        let ast = build("-(4)").unwrap();
        assert_eq!(ast, Ast::Neg(Box::new(Ast::Value(4.0))));

        assert_eq!(build("+7").unwrap(), Ast::Value(7.0));
        assert_eq!(build("5.").unwrap(), Ast::Value(5.0));
        assert_eq!(build(".5").unwrap(), Ast::Value(0.5));
    }

    #[test]
    fn malformed() {
        let invalid = ["", "()", "1.2.3", ".", "2 3", "(1)(2)", "2 +", "* 2", "2 * / 3"];
        for input in &invalid {
            assert!(
                matches!(build(input), Err(Error::ParseError(_))),
                "{} should not parse",
                input
            );
        }
    }
}
