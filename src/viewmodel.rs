use crate::command::Command;
use crate::config::Config;
use crate::format::{format_number, DEFAULT_SIGNIFICANT_DIGITS};
use crate::model::CalculatorModel;
use crate::token::Op;
use crate::Error;
use std::fmt;
use tracing::{debug, warn};

/// Prefix of the display value while an error is shown
pub const ERROR_PREFIX: &str = "Error";

type Observer = Box<dyn FnMut(&str)>;

/// The state machine between the keys and the [`CalculatorModel`].
///
/// Keystrokes accumulate into a display value; operators wait for their
/// second operand, and pressing another operator first evaluates the pending
/// one.
///
/// ```
/// # use deskcalc::{CalculatorViewModel, Op};
/// let mut calculator = CalculatorViewModel::new();
/// calculator.input_digit('1').unwrap();
/// calculator.input_operator(Op::Plus);
/// calculator.input_digit('2').unwrap();
/// calculator.input_operator(Op::Mul);
/// assert_eq!(calculator.display_value(), "3");
/// calculator.input_digit('4').unwrap();
/// calculator.calculate_result();
/// assert_eq!(calculator.display_value(), "12");
/// ```
pub struct CalculatorViewModel {
    model: CalculatorModel,
    display_value: String,
    operator: Option<Op>,
    previous_value: f64,
    /// The next digit starts a new number instead of extending the display
    should_reset_display: bool,
    memory: f64,
    significant_digits: usize,
    observers: Vec<Observer>,
}

impl fmt::Debug for CalculatorViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorViewModel")
            .field("display_value", &self.display_value)
            .field("operator", &self.operator)
            .field("previous_value", &self.previous_value)
            .field("should_reset_display", &self.should_reset_display)
            .field("memory", &self.memory)
            .field("significant_digits", &self.significant_digits)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for CalculatorViewModel {
    fn default() -> Self {
        Self {
            model: CalculatorModel::new(),
            display_value: "0".into(),
            operator: None,
            previous_value: 0.0,
            should_reset_display: false,
            memory: 0.0,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
            observers: Vec::new(),
        }
    }
}

impl CalculatorViewModel {
    /// Create a calculator showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calculator using the display settings from `config`
    #[must_use]
    pub fn with_config(config: &Config) -> Self {
        Self {
            significant_digits: config.display.significant_digits,
            ..Self::default()
        }
    }

    /// Register a callback receiving the display value each time it changes
    pub fn add_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Call every observer with the current display value
    pub fn notify_observers(&mut self) {
        for observer in &mut self.observers {
            observer(&self.display_value);
        }
    }

    /// The value to show to the user
    #[must_use]
    pub fn display_value(&self) -> &str {
        &self.display_value
    }

    /// The operator waiting for its second operand, if any
    #[must_use]
    pub fn pending_operator(&self) -> Option<Op> {
        self.operator
    }

    /// Value of the memory register
    #[must_use]
    pub fn memory(&self) -> f64 {
        self.memory
    }

    /// Check if the display currently shows an error message
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.display_value.starts_with(ERROR_PREFIX)
    }

    /// Run the operation bound to `command`
    pub fn execute(&mut self, command: Command) -> Result<(), Error> {
        debug!(?command, "execute");
        match command {
            Command::Digit(digit) => return self.input_digit(digit),
            Command::Decimal => self.input_decimal(),
            Command::Operator(op) => self.input_operator(op),
            Command::Equals => self.calculate_result(),
            Command::ClearAll => self.clear_all(),
            Command::ClearEntry => self.clear_entry(),
            Command::Backspace => self.backspace(),
            Command::ToggleSign => self.toggle_sign(),
            Command::Percent => self.calculate_percentage(),
            Command::Square => self.square(),
            Command::SquareRoot => self.square_root(),
            Command::Reciprocal => self.reciprocal(),
            Command::MemoryStore => self.memory_store(),
            Command::MemoryRecall => self.memory_recall(),
            Command::MemoryClear => self.memory_clear(),
            Command::MemoryAdd => self.memory_add(),
        }
        Ok(())
    }

    /// Append `digit` to the number being typed
    pub fn input_digit(&mut self, digit: char) -> Result<(), Error> {
        if !digit.is_ascii_digit() {
            return Err(Error::InvalidDigit(digit));
        }
        self.start_new_number_if_needed();

        if self.display_value == "0" {
            self.display_value = digit.to_string();
        } else if self.display_value == "-0" {
            self.display_value = format!("-{}", digit);
        } else {
            self.display_value.push(digit);
        }
        self.notify_observers();
        Ok(())
    }

    /// Add a decimal point, unless the current number already has one
    pub fn input_decimal(&mut self) {
        self.start_new_number_if_needed();

        let current_number = self
            .display_value
            .rsplit(|c: char| "+-*/".contains(c))
            .next()
            .unwrap_or_default();
        if !current_number.contains('.') {
            self.display_value.push('.');
            self.notify_observers();
        }
    }

    /// Make `op` the pending operator, evaluating the previous one first if
    /// its second operand has been typed
    pub fn input_operator(&mut self, op: Op) {
        if op.is_unary() || self.is_error() {
            return;
        }
        if self.operator.is_some() && !self.should_reset_display {
            self.calculate_result();
            if self.is_error() {
                return;
            }
        }

        match self.current_value() {
            Ok(value) => self.previous_value = value,
            Err(err) => return self.show_error(&err),
        }
        debug!(operator = %op.symbol(), previous = self.previous_value, "operator pending");
        self.operator = Some(op);
        self.should_reset_display = true;
    }

    /// Apply the pending operator to the stored and displayed values
    pub fn calculate_result(&mut self) {
        let Some(op) = self.operator else {
            return;
        };

        let previous = self.previous_value;
        let result = self
            .current_value()
            .and_then(|current| self.apply(op, previous, current))
            .and_then(|value| self.format(value));

        match result {
            Ok(text) => {
                debug!(
                    previous,
                    operator = %op.symbol(),
                    result = %text,
                    "calculated"
                );
                self.display_value = text;
                self.operator = None;
                self.should_reset_display = true;
                self.previous_value = 0.0;
                self.notify_observers();
            }
            Err(err) => self.show_error(&err),
        }
    }

    /// Reset everything but the memory register
    pub fn clear_all(&mut self) {
        self.display_value = "0".into();
        self.operator = None;
        self.previous_value = 0.0;
        self.should_reset_display = false;
        self.notify_observers();
    }

    /// Clear the number being typed, keeping any pending operation
    pub fn clear_entry(&mut self) {
        self.display_value = "0".into();
        self.notify_observers();
    }

    /// Remove the last typed character
    pub fn backspace(&mut self) {
        if self.is_error() {
            self.display_value = "0".into();
        } else {
            self.display_value.pop();
            if self.display_value.is_empty() || self.display_value == "-" {
                self.display_value = "0".into();
            }
        }
        self.notify_observers();
    }

    /// Add or remove the leading minus sign
    pub fn toggle_sign(&mut self) {
        if self.display_value == "0" || self.is_error() {
            return;
        }
        if let Some(positive) = self.display_value.strip_prefix('-') {
            self.display_value = positive.to_string();
        } else {
            self.display_value.insert(0, '-');
        }
        self.notify_observers();
    }

    /// Replace the display by its value divided by 100
    pub fn calculate_percentage(&mut self) {
        self.apply_unary(|model, value| Ok(model.percentage(value)));
    }

    /// Replace the display by its square
    pub fn square(&mut self) {
        self.apply_unary(|model, value| model.power(value, 2));
    }

    /// Replace the display by its square root
    pub fn square_root(&mut self) {
        self.apply_unary(CalculatorModel::square_root);
    }

    /// Replace the display by its reciprocal
    pub fn reciprocal(&mut self) {
        self.apply_unary(CalculatorModel::reciprocal);
    }

    /// Copy the displayed value into memory
    pub fn memory_store(&mut self) {
        self.update_memory(|_, value| value);
    }

    /// Add the displayed value to memory
    pub fn memory_add(&mut self) {
        self.update_memory(|memory, value| memory + value);
    }

    /// Show the memory register
    pub fn memory_recall(&mut self) {
        match self.format(self.memory) {
            Ok(text) => {
                self.display_value = text;
                self.should_reset_display = true;
                self.notify_observers();
            }
            Err(err) => self.show_error(&err),
        }
    }

    /// Set the memory register back to zero
    pub fn memory_clear(&mut self) {
        self.memory = 0.0;
    }

    fn start_new_number_if_needed(&mut self) {
        if self.should_reset_display {
            self.display_value = "0".into();
            self.should_reset_display = false;
        }
    }

    /// Read back the display, including results shown with an exponent
    fn current_value(&self) -> Result<f64, Error> {
        match self.display_value.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(Error::InvalidNumber(self.display_value.clone())),
        }
    }

    fn format(&self, value: f64) -> Result<String, Error> {
        format_number(value, self.significant_digits)
    }

    fn apply(&self, op: Op, previous: f64, current: f64) -> Result<f64, Error> {
        match op {
            Op::Plus => Ok(self.model.add(previous, current)),
            Op::Minus => Ok(self.model.subtract(previous, current)),
            Op::Mul => Ok(self.model.multiply(previous, current)),
            Op::Div => self.model.divide(previous, current),
            Op::Neg | Op::Pos => Err(Error::InvalidExpression),
        }
    }

    fn apply_unary<F>(&mut self, function: F)
    where
        F: FnOnce(&CalculatorModel, f64) -> Result<f64, Error>,
    {
        if self.is_error() {
            return;
        }
        let result = self
            .current_value()
            .and_then(|value| function(&self.model, value))
            .and_then(|value| self.format(value));
        match result {
            Ok(text) => {
                self.display_value = text;
                self.notify_observers();
            }
            Err(err) => self.show_error(&err),
        }
    }

    fn update_memory<F>(&mut self, update: F)
    where
        F: FnOnce(f64, f64) -> f64,
    {
        if self.is_error() {
            return;
        }
        match self.current_value() {
            Ok(value) => {
                self.memory = update(self.memory, value);
                self.should_reset_display = true;
                debug!(memory = self.memory, "memory updated");
            }
            Err(err) => self.show_error(&err),
        }
    }

    /// Show `err` and drop the pending operation. The next digit starts a
    /// new number.
    fn show_error(&mut self, err: &Error) {
        warn!(%err, display = %self.display_value, "calculation failed");
        self.display_value = format!("{}: {}", ERROR_PREFIX, err);
        self.operator = None;
        self.previous_value = 0.0;
        self.should_reset_display = true;
        self.notify_observers();
    }
}
