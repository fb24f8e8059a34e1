#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal,
    clippy::missing_errors_doc,
    clippy::unused_self
)]

//! deskcalc, the engine of a keystroke driven desktop calculator.
//!
//! The crate is split the way a Model-View-ViewModel application is. The
//! [`CalculatorModel`](struct.CalculatorModel.html) does the arithmetic, and
//! the [`CalculatorViewModel`](struct.CalculatorViewModel.html) turns
//! keystrokes into a display value:
//!
//! ```
//! use deskcalc::{CalculatorViewModel, Command};
//!
//! let mut calculator = CalculatorViewModel::new();
//! for command in Command::parse_line("12.5*4=") {
//!     calculator.execute(command).unwrap();
//! }
//! assert_eq!(calculator.display_value(), "50");
//! ```
//!
//! Views observe the display instead of polling it:
//!
//! ```
//! use deskcalc::CalculatorViewModel;
//!
//! let mut calculator = CalculatorViewModel::new();
//! calculator.add_observer(|display| println!("{}", display));
//! calculator.input_digit('4').unwrap();
//! ```
//!
//! Whole expressions can also be evaluated at once:
//!
//! ```
//! assert_eq!(deskcalc::eval("3 + 5 * 2"), Ok(13.0));
//! ```
//!
//! # Language definition
//!
//! Expressions can contain the following elements:
//!
//! - decimal literal values: `12`, `0.5`, `.25`, `7.`;
//! - left and right parenthesis;
//! - mathematical operators: `+` for addition, `-` for subtraction,
//!   `*` for multiplication and `/` for division, and the `+` and `-` signs.
//!
//! Any other symbol is forbidden in the input. Dividing by zero is an error
//! instead of producing an infinity.
//!
//! # Technical details
//!
//! Expressions are parsed with a simple Shunting-Yard algorithm into an AST
//! that is then interpreted. All arithmetic uses `f64`.

#[macro_use]
extern crate lazy_static;

mod ast;
mod command;
mod config;
mod error;
mod expr;
mod format;
mod lexer;
mod model;
mod token;
mod viewmodel;

pub use command::Command;
pub use config::{Config, DisplayConfig, LoggingConfig};
pub use error::{ConfigError, Error};
pub use expr::{eval, Expr};
pub use format::{format_number, DEFAULT_SIGNIFICANT_DIGITS};
pub use model::CalculatorModel;
pub use token::Op;
pub use viewmodel::{CalculatorViewModel, ERROR_PREFIX};
