#![allow(nonstandard_style)]

pub mod calculator;
pub mod display;
pub mod error_handling;
pub mod evaluating;
pub mod parsing;
pub mod scanning;

pub use calculator::{Calculator, Key};
pub use display::DisplayValue;
pub use error_handling::{CalcError, ErrorKind, Result};
pub use evaluating::{evaluate, evaluate_flat, Strategy};
pub use parsing::{BinaryOperator, UnaryOperator};
