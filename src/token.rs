/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A number literal, validated when building the AST
    Number(String),
    /// An arithmetic operator
    Op(Op),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Binary `+`
    Plus,
    /// Binary `-`
    Minus,
    /// Binary `*`
    Mul,
    /// Binary `/`
    Div,
    /// Unary `-`
    Neg,
    /// Unary `+`
    Pos,
}

impl Op {
    /// Get the binary operator for a calculator key symbol.
    ///
    /// ```
    /// # use deskcalc::Op;
    /// assert_eq!(Op::from_symbol('*'), Some(Op::Mul));
    /// assert_eq!(Op::from_symbol('^'), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    /// The symbol used to type this operator
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Plus | Self::Pos => '+',
            Self::Minus | Self::Neg => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div => 2,
            Self::Neg | Self::Pos => 3,
        }
    }

    /// Check if the operator takes a single operand
    #[must_use]
    pub fn is_unary(self) -> bool {
        matches!(self, Self::Neg | Self::Pos)
    }

    /// Check if the operator is left associative
    #[must_use]
    pub fn is_left_associative(self) -> bool {
        !self.is_unary()
    }

    /// Check if the operator is right associative
    #[must_use]
    pub fn is_right_associative(self) -> bool {
        !self.is_left_associative()
    }
}

#[cfg(test)]
mod tests {
    use super::Op;

    #[test]
    fn symbols() {
        for symbol in ['+', '-', '*', '/'] {
            let op = Op::from_symbol(symbol).unwrap();
            assert_eq!(op.symbol(), symbol);
            assert!(!op.is_unary());
        }
        assert_eq!(Op::from_symbol('%'), None);
        assert_eq!(Op::Neg.symbol(), '-');
    }

    #[test]
    fn precedence() {
        assert!(Op::Mul.precedence() > Op::Plus.precedence());
        assert_eq!(Op::Div.precedence(), Op::Mul.precedence());
        assert!(Op::Neg.precedence() > Op::Div.precedence());
        assert!(Op::Neg.is_right_associative());
        assert!(Op::Minus.is_left_associative());
    }
}
