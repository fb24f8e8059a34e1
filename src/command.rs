use crate::token::Op;

/// A user action on the calculator, coming from a key or a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// One of `0-9`
    Digit(char),
    /// The decimal point
    Decimal,
    /// `+`, `-`, `*` or `/`
    Operator(Op),
    /// `=`
    Equals,
    /// `C`
    ClearAll,
    /// `CE`
    ClearEntry,
    /// `⌫`
    Backspace,
    /// `±`
    ToggleSign,
    /// `%`
    Percent,
    /// `x²`
    Square,
    /// `√`
    SquareRoot,
    /// `1/x`
    Reciprocal,
    /// `MS`
    MemoryStore,
    /// `MR`
    MemoryRecall,
    /// `MC`
    MemoryClear,
    /// `M+`
    MemoryAdd,
}

impl Command {
    /// Get the command bound to a keyboard key.
    ///
    /// ```
    /// # use deskcalc::{Command, Op};
    /// assert_eq!(Command::from_key('7'), Some(Command::Digit('7')));
    /// assert_eq!(Command::from_key('/'), Some(Command::Operator(Op::Div)));
    /// assert_eq!(Command::from_key('\r'), Some(Command::Equals));
    /// assert_eq!(Command::from_key('z'), None);
    /// ```
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        let command = match key {
            digit if digit.is_ascii_digit() => Self::Digit(digit),
            '.' => Self::Decimal,
            '\r' | '\n' | '=' => Self::Equals,
            'c' | 'C' => Self::ClearAll,
            '\x08' | '\x7f' => Self::Backspace,
            '%' => Self::Percent,
            other => Self::Operator(Op::from_symbol(other)?),
        };
        Some(command)
    }

    /// Get the command bound to a button label.
    ///
    /// ```
    /// # use deskcalc::Command;
    /// assert_eq!(Command::from_label("CE"), Some(Command::ClearEntry));
    /// assert_eq!(Command::from_label("±"), Some(Command::ToggleSign));
    /// assert_eq!(Command::from_label("sin"), None);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let command = match label {
            "C" => Self::ClearAll,
            "CE" => Self::ClearEntry,
            "⌫" => Self::Backspace,
            "±" => Self::ToggleSign,
            "%" => Self::Percent,
            "x²" => Self::Square,
            "√" => Self::SquareRoot,
            "1/x" => Self::Reciprocal,
            "MS" => Self::MemoryStore,
            "MR" => Self::MemoryRecall,
            "MC" => Self::MemoryClear,
            "M+" => Self::MemoryAdd,
            "=" => Self::Equals,
            "." => Self::Decimal,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::Digit(c),
                    (Some(c), None) => Self::Operator(Op::from_symbol(c)?),
                    _ => return None,
                }
            }
        };
        Some(command)
    }

    /// Split a line of terminal input into commands.
    ///
    /// Words matching a multi-character button label (`CE`, `MS`, `1/x`, ...)
    /// are read as that button, everything else key by key. Unknown keys are
    /// skipped.
    ///
    /// ```
    /// # use deskcalc::{Command, Op};
    /// assert_eq!(
    ///     Command::parse_line("1+2 CE"),
    ///     vec![
    ///         Command::Digit('1'),
    ///         Command::Operator(Op::Plus),
    ///         Command::Digit('2'),
    ///         Command::ClearEntry,
    ///     ]
    /// );
    /// ```
    #[must_use]
    pub fn parse_line(line: &str) -> Vec<Self> {
        let mut commands = Vec::new();
        for word in line.split_whitespace() {
            if word.chars().count() > 1 {
                if let Some(command) = Self::from_label(word) {
                    commands.push(command);
                    continue;
                }
            }
            commands.extend(
                word.chars()
                    .filter_map(|c| Self::from_key(c).or_else(|| Self::from_label(&c.to_string()))),
            );
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::Command;
    use crate::token::Op;
    use test_case::test_case;

    #[test_case('0' => Some(Command::Digit('0')) ; "digit")]
    #[test_case('.' => Some(Command::Decimal) ; "decimal point")]
    #[test_case('-' => Some(Command::Operator(Op::Minus)) ; "operator")]
    #[test_case('=' => Some(Command::Equals) ; "equals")]
    #[test_case('\n' => Some(Command::Equals) ; "enter")]
    #[test_case('c' => Some(Command::ClearAll) ; "lowercase clear")]
    #[test_case('\x08' => Some(Command::Backspace) ; "backspace")]
    #[test_case('%' => Some(Command::Percent) ; "percent")]
    #[test_case('^' => None ; "unbound key")]
    fn from_key(key: char) -> Option<Command> {
        Command::from_key(key)
    }

    #[test]
    fn labels() {
        let labels = [
            ("C", Command::ClearAll),
            ("CE", Command::ClearEntry),
            ("⌫", Command::Backspace),
            ("x²", Command::Square),
            ("√", Command::SquareRoot),
            ("1/x", Command::Reciprocal),
            ("MS", Command::MemoryStore),
            ("MR", Command::MemoryRecall),
            ("MC", Command::MemoryClear),
            ("M+", Command::MemoryAdd),
            ("9", Command::Digit('9')),
            ("*", Command::Operator(Op::Mul)),
        ];
        for (label, command) in &labels {
            assert_eq!(Command::from_label(label), Some(*command), "{}", label);
        }
        assert_eq!(Command::from_label("12"), None);
        assert_eq!(Command::from_label(""), None);
    }

    #[test]
    fn parse_line() {
        assert_eq!(
            Command::parse_line("9 √ MS 1/x M+ ±"),
            vec![
                Command::Digit('9'),
                Command::SquareRoot,
                Command::MemoryStore,
                Command::Reciprocal,
                Command::MemoryAdd,
                Command::ToggleSign,
            ]
        );
        assert_eq!(
            Command::parse_line("12/4="),
            vec![
                Command::Digit('1'),
                Command::Digit('2'),
                Command::Operator(Op::Div),
                Command::Digit('4'),
                Command::Equals,
            ]
        );
        assert!(Command::parse_line("   ").is_empty());
        assert_eq!(Command::parse_line("2q"), vec![Command::Digit('2')]);
    }
}
