//! # Feature: Calculator
//!
//! Restricted arithmetic for the `calculate` intent. Only numbers, the
//! operators `+ - * / // % **` (`^` is accepted as power), parentheses and a
//! few spoken operator words are understood; anything else is rejected.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use anyhow::{anyhow, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Nesting limit for parentheses and chained powers
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    FloorDiv,
    Percent,
    Pow,
    LParen,
    RParen,
}

/// Evaluate an arithmetic expression
pub fn evaluate(expression: &str) -> Result<f64> {
    let expression = replace_spoken_operators(expression);
    let tokens = tokenize(&expression)?;
    if tokens.is_empty() {
        return Err(anyhow!("empty expression"));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if parser.pos != tokens.len() {
        return Err(anyhow!("unexpected token at position {}", parser.pos));
    }
    if !value.is_finite() {
        return Err(anyhow!("result is not a finite number"));
    }
    Ok(value)
}

/// Render a result the way people say it: whole numbers without a decimal point
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn spoken_operators() -> &'static [(Regex, &'static str)] {
    static TABLE: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    TABLE.get_or_init(|| {
        [
            (r"\bto the power of\b", " ** "),
            (r"\bmultiplied by\b", " * "),
            (r"\bdivided by\b", " / "),
            (r"\bmodulo\b|\bmod\b", " % "),
            (r"\bplus\b", " + "),
            (r"\bminus\b", " - "),
            (r"\btimes\b|\bx\b", " * "),
        ]
        .into_iter()
        .map(|(pattern, op)| (Regex::new(pattern).expect("static regex"), op))
        .collect()
    })
}

fn replace_spoken_operators(expression: &str) -> String {
    let mut out = expression.to_lowercase();
    for (pattern, op) in spoken_operators() {
        out = pattern.replace_all(&out, *op).into_owned();
    }
    out
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| anyhow!("invalid number '{literal}'"))?;
                tokens.push(Token::Num(value));
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Pow);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                if chars.get(i + 1) == Some(&'/') {
                    tokens.push(Token::FloorDiv);
                    i += 2;
                } else {
                    tokens.push(Token::Slash);
                    i += 1;
                }
            }
            '%' => {
                tokens.push(Token::Percent);
                i += 1;
            }
            '^' => {
                tokens.push(Token::Pow);
                i += 1;
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            other => return Err(anyhow!("unsupported character '{other}'")),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(anyhow!("expression nested too deeply"));
        }
        Ok(())
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64> {
        let mut value = self.term()?;
        while let Some(op @ (Token::Plus | Token::Minus)) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == Token::Plus { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    // term := unary (('*' | '/' | '//' | '%') unary)*
    fn term(&mut self) -> Result<f64> {
        let mut value = self.unary()?;
        while let Some(op @ (Token::Star | Token::Slash | Token::FloorDiv | Token::Percent)) =
            self.peek()
        {
            self.pos += 1;
            let rhs = self.unary()?;
            value = match op {
                Token::Star => value * rhs,
                _ if rhs == 0.0 => return Err(anyhow!("division by zero")),
                Token::Slash => value / rhs,
                Token::FloorDiv => (value / rhs).floor(),
                // Result takes the sign of the divisor
                _ => value - rhs * (value / rhs).floor(),
            };
        }
        Ok(value)
    }

    // unary := ('-' | '+') unary | power
    fn unary(&mut self) -> Result<f64> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.enter()?;
                let value = -self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.enter()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.power(),
        }
    }

    // power := primary ('**' unary)?   (right-associative, binds tighter than unary minus on its left)
    fn power(&mut self) -> Result<f64> {
        let base = self.primary()?;
        if self.peek() == Some(Token::Pow) {
            self.pos += 1;
            self.enter()?;
            let exponent = self.unary()?;
            self.depth -= 1;
            if base == 0.0 && exponent < 0.0 {
                return Err(anyhow!("zero cannot be raised to a negative power"));
            }
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    // primary := number | '(' expr ')'
    fn primary(&mut self) -> Result<f64> {
        match self.next() {
            Some(Token::Num(value)) => Ok(value),
            Some(Token::LParen) => {
                self.enter()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.next() {
                    Some(Token::RParen) => Ok(value),
                    _ => Err(anyhow!("missing closing parenthesis")),
                }
            }
            Some(token) => Err(anyhow!("unexpected {token:?}")),
            None => Err(anyhow!("expression ends too early")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(expr: &str) -> String {
        format_number(evaluate(expr).unwrap())
    }

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(calc("2+2"), "4");
        assert_eq!(calc("2 + 3 * 4"), "14");
        assert_eq!(calc("(2 + 3) * 4"), "20");
        assert_eq!(calc("7/2"), "3.5");
        assert_eq!(calc("10 - 2 - 3"), "5");
    }

    #[test]
    fn test_floor_division_and_power_operators() {
        assert_eq!(calc("2**10"), "1024");
        assert_eq!(calc("2^3"), "8");
        assert_eq!(calc("2**3**2"), "512");
        assert_eq!(calc("-2**2"), "-4");
        assert_eq!(calc("7//2"), "3");
        assert_eq!(calc("-7//2"), "-4");
        assert_eq!(calc("-7 % 3"), "2");
        assert_eq!(calc("7 % -3"), "-2");
    }

    #[test]
    fn test_spoken_operators() {
        assert_eq!(calc("5 plus 3"), "8");
        assert_eq!(calc("6 times 7"), "42");
        assert_eq!(calc("6 x 7"), "42");
        assert_eq!(calc("9 divided by 3"), "3");
        assert_eq!(calc("2 to the power of 5"), "32");
    }

    #[test]
    fn test_decimals() {
        assert_eq!(calc("0.5 * 3"), "1.5");
        assert_eq!(calc(".25 + .25"), "0.5");
    }

    #[test]
    fn test_malformed_expressions_rejected() {
        for bad in [
            "",
            "2 +",
            "(2 + 3",
            "2 + 3)",
            "1/0",
            "5 % 0",
            "__import__('os')",
            "1.2.3",
            "abc",
            "0 ** -1",
        ] {
            assert!(evaluate(bad).is_err(), "expected error for {bad:?}");
        }
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(evaluate("10 ** 400").is_err());
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let expr = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert!(evaluate(&expr).is_err());
    }
}
