use crate::error::Error;
use crate::token::{Op, Token};
use std::iter::Peekable;
use std::str::Chars;

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    previous: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(string: &'a str) -> Self {
        Lexer {
            input: string.chars().peekable(),
            previous: None,
        }
    }

    /// Tokenize the input and reorder the tokens in reverse polish notation
    pub fn parse(&mut self) -> Result<Vec<Token>, Error> {
        let mut output = Vec::new();
        let mut operators = Vec::new();

        'tokens: while let Some(token) = self.next_token()? {
            match token {
                Token::Number(_) => output.push(token),
                Token::Op(o1) => {
                    'operators: while let Some(token) = operators.last().cloned() {
                        match token {
                            Token::Op(o2) => {
                                let pop_me =
                                    o1.is_left_associative() && o1.precedence() <= o2.precedence();
                                let pop_me = pop_me
                                    || o1.is_right_associative()
                                        && o1.precedence() < o2.precedence();
                                if pop_me {
                                    operators.pop();
                                    output.push(Token::Op(o2));
                                } else {
                                    break 'operators;
                                }
                            }
                            _ => break 'operators,
                        }
                    }
                    operators.push(token);
                }
                Token::LParen => operators.push(token),
                Token::RParen => {
                    while let Some(token) = operators.pop() {
                        match token {
                            Token::LParen => continue 'tokens,
                            other => output.push(other),
                        }
                    }
                    return Err(Error::ParseError("mismatched parenthesis".into()));
                }
            }
        }

        while let Some(token) = operators.pop() {
            match token {
                Token::LParen => return Err(Error::ParseError("mismatched parenthesis".into())),
                other => output.push(other),
            }
        }
        Ok(output)
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        let token = loop {
            match self.input.next() {
                Some(' ' | '\t' | '\n' | '\r') => continue,
                Some(c) => break self.token_for(c)?,
                None => return Ok(None),
            }
        };
        self.previous = Some(token.clone());
        Ok(Some(token))
    }

    fn token_for(&mut self, c: char) -> Result<Token, Error> {
        let token = match c {
            c if is_number_part(c) => {
                let mut literal = String::new();
                literal.push(c);
                while let Some(&c) = self.input.peek() {
                    if !is_number_part(c) {
                        break;
                    }
                    self.input.next();
                    literal.push(c);
                }
                Token::Number(literal)
            }
            '+' if self.expects_operand() => Token::Op(Op::Pos),
            '-' if self.expects_operand() => Token::Op(Op::Neg),
            '+' => Token::Op(Op::Plus),
            '-' => Token::Op(Op::Minus),
            '*' => Token::Op(Op::Mul),
            '/' => Token::Op(Op::Div),
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(Error::ParseError(format!(
                    "unexpected character in input: {}",
                    other
                )));
            }
        };
        Ok(token)
    }

    /// A `+` or `-` read here is a sign, not a binary operator
    fn expects_operand(&self) -> bool {
        matches!(self.previous, None | Some(Token::Op(_) | Token::LParen))
    }
}

/// Check if `c` can appear inside a number literal
fn is_number_part(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}
