use crate::expr::Expr;
use crate::Error;
use regex::Regex;
use tracing::debug;

lazy_static! {
    /// Characters accepted by `evaluate_expression`
    static ref ALLOWED: Regex = Regex::new(r"^[0-9+\-*/.() ]+$").expect("valid allow-list pattern");
    /// A literal zero divisor: `/0` followed by an operator, `)` or the end
    static ref DIVISION_BY_ZERO: Regex =
        Regex::new(r"/\s*0([+\-*/)]|$)").expect("valid division pattern");
    /// `**` and `//` pass the allow-list but are not calculator operators
    static ref DOUBLED_OPERATOR: Regex = Regex::new(r"\*\*|//").expect("valid operator pattern");
    static ref INTEGER: Regex = Regex::new(r"^[+-]?[0-9]+$").expect("valid integer pattern");
}

/// The calculation side of the calculator.
///
/// The model is stateless: it evaluates whole expressions and performs the
/// arithmetic requested by the
/// [`CalculatorViewModel`](struct.CalculatorViewModel.html).
///
/// ```
/// # use deskcalc::CalculatorModel;
/// let model = CalculatorModel::new();
/// assert_eq!(model.evaluate_expression("(2 + 3) * 4"), Ok(20.0));
/// assert_eq!(model.divide(7.0, 2.0), Ok(3.5));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculatorModel;

impl CalculatorModel {
    /// Create a new model
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an arithmetic expression made of numbers, `+`, `-`, `*`, `/`
    /// and parentheses.
    ///
    /// An empty expression evaluates to `0`. Any other character makes the
    /// expression invalid, and dividing by zero is reported as
    /// [`Error::DivisionByZero`].
    ///
    /// ```
    /// # use deskcalc::{CalculatorModel, Error};
    /// let model = CalculatorModel::new();
    /// assert_eq!(model.evaluate_expression(""), Ok(0.0));
    /// assert_eq!(model.evaluate_expression("10 - -4"), Ok(14.0));
    /// assert_eq!(model.evaluate_expression("2 $ 3"), Err(Error::InvalidExpression));
    /// assert_eq!(
    ///     model.evaluate_expression("2 ** 3"),
    ///     Err(Error::UnsupportedOperator("**".into()))
    /// );
    /// assert_eq!(model.evaluate_expression("10 / 0"), Err(Error::DivisionByZero));
    /// ```
    pub fn evaluate_expression(&self, expression: &str) -> Result<f64, Error> {
        if expression.is_empty() {
            return Ok(0.0);
        }
        let expression = expression.replace(' ', "");

        if !ALLOWED.is_match(&expression) {
            debug!(%expression, "rejected by allow-list");
            return Err(Error::InvalidExpression);
        }
        if DIVISION_BY_ZERO.is_match(&expression) {
            return Err(Error::DivisionByZero);
        }
        if let Some(operator) = DOUBLED_OPERATOR.find(&expression) {
            return Err(Error::UnsupportedOperator(operator.as_str().to_string()));
        }

        let result = Expr::parse(&expression)
            .map_err(|err| {
                debug!(%expression, %err, "expression does not parse");
                Error::InvalidExpression
            })?
            .eval()?;

        if result.is_finite() {
            debug!(%expression, result, "expression evaluated");
            Ok(result)
        } else {
            Err(Error::InvalidResult)
        }
    }

    /// Sum of `a` and `b`
    #[must_use]
    pub fn add(&self, a: f64, b: f64) -> f64 {
        a + b
    }

    /// Difference of `a` and `b`
    #[must_use]
    pub fn subtract(&self, a: f64, b: f64) -> f64 {
        a - b
    }

    /// Product of `a` and `b`
    #[must_use]
    pub fn multiply(&self, a: f64, b: f64) -> f64 {
        a * b
    }

    /// Quotient of `a` divided by `b`, failing if `b` is zero
    pub fn divide(&self, a: f64, b: f64) -> Result<f64, Error> {
        if b == 0.0 {
            return Err(Error::DivisionByZero);
        }
        Ok(a / b)
    }

    /// Parse a number typed by the user.
    ///
    /// Strings containing a `.` are read as decimal numbers, everything else
    /// must be an integer literal.
    ///
    /// ```
    /// # use deskcalc::CalculatorModel;
    /// let model = CalculatorModel::new();
    /// assert_eq!(model.parse_number("-5"), Ok(-5.0));
    /// assert_eq!(model.parse_number("3.14"), Ok(3.14));
    /// assert!(model.parse_number("1e5").is_err());
    /// ```
    pub fn parse_number(&self, number: &str) -> Result<f64, Error> {
        let invalid = || Error::InvalidNumber(number.to_string());
        let trimmed = number.trim();
        if trimmed.contains('.') {
            trimmed.parse::<f64>().map_err(|_| invalid())
        } else if INTEGER.is_match(trimmed) {
            trimmed.parse::<f64>().map_err(|_| invalid())
        } else {
            Err(invalid())
        }
    }

    /// `base` raised to an integer power, by repeated squaring
    ///
    /// ```
    /// # use deskcalc::CalculatorModel;
    /// let model = CalculatorModel::new();
    /// assert_eq!(model.power(2.0, 10), Ok(1024.0));
    /// assert_eq!(model.power(2.0, -2), Ok(0.25));
    /// ```
    pub fn power(&self, base: f64, exponent: i32) -> Result<f64, Error> {
        let mut result = 1.0;
        let mut factor = base;
        let mut remaining = exponent.unsigned_abs();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result *= factor;
            }
            factor *= factor;
            remaining >>= 1;
        }
        if exponent < 0 {
            self.divide(1.0, result)
        } else {
            Ok(result)
        }
    }

    /// Square root of `x`, failing for negative numbers
    pub fn square_root(&self, x: f64) -> Result<f64, Error> {
        if x < 0.0 {
            return Err(Error::Domain("Invalid input for square root"));
        }
        Ok(libm::sqrt(x))
    }

    /// `1 / x`, failing for zero
    pub fn reciprocal(&self, x: f64) -> Result<f64, Error> {
        if x == 0.0 {
            return Err(Error::Domain("Reciprocal of zero is undefined"));
        }
        Ok(1.0 / x)
    }

    /// `x` percent, as a fraction
    #[must_use]
    pub fn percentage(&self, x: f64) -> f64 {
        x / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::CalculatorModel;
    use crate::Error;
    use test_case::test_case;

    #[test]
    fn arithmetic() {
        let model = CalculatorModel::new();
        assert_eq!(model.add(2.0, 3.0), 5.0);
        assert_eq!(model.add(-5.0, 3.0), -2.0);
        assert_eq!(model.add(0.0, 100.0), 100.0);

        assert_eq!(model.subtract(5.0, 3.0), 2.0);
        assert_eq!(model.subtract(3.0, 5.0), -2.0);
        assert_eq!(model.subtract(0.0, 0.0), 0.0);

        assert_eq!(model.multiply(4.0, 3.0), 12.0);
        assert_eq!(model.multiply(-4.0, 3.0), -12.0);
        assert_eq!(model.multiply(0.0, 100.0), 0.0);

        assert_eq!(model.divide(10.0, 2.0), Ok(5.0));
        assert_eq!(model.divide(7.0, 2.0), Ok(3.5));
        assert_eq!(model.divide(-10.0, 2.0), Ok(-5.0));
        assert_eq!(model.divide(10.0, 0.0), Err(Error::DivisionByZero));
    }

    #[test_case("2 + 3" => Ok(5.0) ; "addition")]
    #[test_case("10 - 4" => Ok(6.0) ; "subtraction")]
    #[test_case("3 * 4" => Ok(12.0) ; "multiplication")]
    #[test_case("15 / 3" => Ok(5.0) ; "division")]
    #[test_case("(2 + 3) * 4" => Ok(20.0) ; "grouping")]
    #[test_case("((2 + 3) * (4 - 1)) / 5" => Ok(3.0) ; "nested grouping")]
    #[test_case("-5 + 3" => Ok(-2.0) ; "leading negative")]
    #[test_case("10 - -4" => Ok(14.0) ; "double negative")]
    #[test_case("2 + 3 + 4 + 5" => Ok(14.0) ; "chained addition")]
    #[test_case("100 / 2 / 5" => Ok(10.0) ; "chained division")]
    #[test_case("1 2" => Ok(12.0) ; "spaces are removed before parsing")]
    #[test_case("" => Ok(0.0) ; "empty expression")]
    #[test_case("   " => Err(Error::InvalidExpression) ; "blank expression")]
    #[test_case("2 ^ 3" => Err(Error::InvalidExpression) ; "forbidden operator")]
    #[test_case("abs(2)" => Err(Error::InvalidExpression) ; "forbidden letters")]
    #[test_case("2 ** 3" => Err(Error::UnsupportedOperator("**".into())) ; "power operator")]
    #[test_case("7 // 2" => Err(Error::UnsupportedOperator("//".into())) ; "floor division operator")]
    #[test_case("7 // 0" => Err(Error::DivisionByZero) ; "zero divisor is checked before operators")]
    #[test_case("2 +" => Err(Error::InvalidExpression) ; "missing operand")]
    #[test_case("()" => Err(Error::InvalidExpression) ; "empty parenthesis")]
    #[test_case("1.2.3" => Err(Error::InvalidExpression) ; "malformed number")]
    #[test_case("10 / 0" => Err(Error::DivisionByZero) ; "literal zero divisor")]
    #[test_case("(10 / 0)" => Err(Error::DivisionByZero) ; "zero divisor before parenthesis")]
    #[test_case("10 / 0 + (" => Err(Error::DivisionByZero) ; "zero divisor is checked before syntax")]
    #[test_case("1 / (2 - 2)" => Err(Error::DivisionByZero) ; "computed zero divisor")]
    #[test_case("10 / 0.5" => Ok(20.0) ; "fractional divisor")]
    fn evaluate_expression(expression: &str) -> Result<f64, Error> {
        CalculatorModel::new().evaluate_expression(expression)
    }

    #[test]
    fn evaluate_fractions() {
        let result = CalculatorModel::new().evaluate_expression("2.5 + 3.7").unwrap();
        assert!((result - 6.2).abs() < 1e-12);
    }

    #[test_case("42" => Ok(42.0) ; "integer")]
    #[test_case("3.14" => Ok(3.14) ; "decimal")]
    #[test_case("-5" => Ok(-5.0) ; "negative")]
    #[test_case(" 7 " => Ok(7.0) ; "surrounding whitespace")]
    #[test_case("5." => Ok(5.0) ; "trailing point")]
    #[test_case("abc" => Err(Error::InvalidNumber("abc".into())) ; "letters")]
    #[test_case("1e5" => Err(Error::InvalidNumber("1e5".into())) ; "exponent without point")]
    #[test_case("" => Err(Error::InvalidNumber(String::new())) ; "empty")]
    fn parse_number(number: &str) -> Result<f64, Error> {
        CalculatorModel::new().parse_number(number)
    }

    #[test]
    fn unary_functions() {
        let model = CalculatorModel::new();
        assert_eq!(model.power(3.0, 0), Ok(1.0));
        assert_eq!(model.power(-2.0, 3), Ok(-8.0));
        assert_eq!(model.power(0.0, -1), Err(Error::DivisionByZero));

        assert_eq!(model.square_root(16.0), Ok(4.0));
        assert_eq!(model.square_root(0.0), Ok(0.0));
        assert!(matches!(model.square_root(-1.0), Err(Error::Domain(_))));

        assert_eq!(model.reciprocal(4.0), Ok(0.25));
        assert_eq!(
            model.reciprocal(0.0),
            Err(Error::Domain("Reciprocal of zero is undefined"))
        );

        assert_eq!(model.percentage(50.0), 0.5);
    }
}
