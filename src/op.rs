//! The four elementwise operations and their symbols.

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::error::{BenchError, Result};

/// Elementwise arithmetic operation applied as `a = a OP b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Decodes an operation symbol.
    ///
    /// Benchmarks call this on every step so that the dispatch cost stays
    /// inside the measured loop.
    #[inline(always)]
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol {
            '+' => Ok(Operation::Add),
            '-' => Ok(Operation::Subtract),
            '*' => Ok(Operation::Multiply),
            '/' => Ok(Operation::Divide),
            other => Err(BenchError::UnrecognizedOperation(other)),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '*',
            Operation::Divide => '/',
        }
    }

    /// Applies the operation to any type with the four arithmetic operators.
    ///
    /// Used for plain `f32` elements and for the lane vectors alike.
    #[inline(always)]
    pub fn apply<T>(self, lhs: T, rhs: T) -> T
    where
        T: Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Div<Output = T>,
    {
        match self {
            Operation::Add => lhs + rhs,
            Operation::Subtract => lhs - rhs,
            Operation::Multiply => lhs * rhs,
            Operation::Divide => lhs / rhs,
        }
    }
}

impl TryFrom<char> for Operation {
    type Error = BenchError;

    fn try_from(symbol: char) -> Result<Self> {
        Operation::from_symbol(symbol)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        };
        write!(f, "{name}")
    }
}
