use crate::ast::Ast;
use crate::lexer::Lexer;
use crate::Error;

/// Evaluate a single expression from `input`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed.
///
/// # Example
///
/// ```
/// # use deskcalc::{eval, Error};
/// assert_eq!(eval("45 - 2 * 3"), Ok(39.0));
/// assert_eq!(eval("1 / (2 - 2)"), Err(Error::DivisionByZero));
/// ```
pub fn eval(input: &str) -> Result<f64, Error> {
    Expr::parse(input).and_then(|expr| expr.eval())
}

/// A parsed arithmetic expression.
///
/// # Examples
/// ```
/// # use deskcalc::Expr;
/// let expr = Expr::parse("3 + 5 * 2").unwrap();
/// assert_eq!(expr.eval(), Ok(13.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ast: Ast,
}

impl Expr {
    /// Parse the given arithmetic `expression` into an `Expr`.
    ///
    /// # Examples
    /// ```
    /// # use deskcalc::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("(3 + 5) * -2").is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3 + * 2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let mut lexer = Lexer::new(expression);
        let ast = Ast::from_tokens(&mut lexer.parse()?)?;
        Ok(Self { ast })
    }

    /// Evaluate the expression. Dividing by a value equal to zero is an
    /// error, not an infinity.
    pub fn eval(&self) -> Result<f64, Error> {
        Self::inner_eval(&self.ast)
    }

    fn inner_eval(ast: &Ast) -> Result<f64, Error> {
        match *ast {
            Ast::Value(number) => Ok(number),
            Ast::Neg(ref operand) => Ok(-Self::inner_eval(operand)?),
            Ast::Add(ref left, ref right) => {
                Ok(Self::inner_eval(left)? + Self::inner_eval(right)?)
            }
            Ast::Sub(ref left, ref right) => {
                Ok(Self::inner_eval(left)? - Self::inner_eval(right)?)
            }
            Ast::Mul(ref left, ref right) => {
                Ok(Self::inner_eval(left)? * Self::inner_eval(right)?)
            }
            Ast::Div(ref left, ref right) => {
                let left = Self::inner_eval(left)?;
                let right = Self::inner_eval(right)?;
                if right == 0.0 {
                    return Err(Error::DivisionByZero);
                }
                Ok(left / right)
            }
        }
    }
}
