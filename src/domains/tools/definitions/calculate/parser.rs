//! Restricted arithmetic expression parser and evaluator.
//!
//! Grammar:
//! ```text
//! Expression := Term { ("+" | "-") Term }
//! Term       := Unary { ("*" | "/") Unary }
//! Unary      := ("+" | "-") Unary | Power
//! Power      := Primary [ ("^" | "**") Unary ]
//! Primary    := Number | Constant | Function "(" [ Args ] ")" | "(" Expression ")"
//! Args       := Expression { "," Expression }
//! ```
//!
//! Exponentiation is right-associative and binds tighter than unary minus,
//! so `-2^2` is `-4` and `2^-1` is `0.5`. Only the identifiers in
//! [`Function`] and [`CONSTANTS`] are accepted; anything else is an error.

use std::fmt;
use thiserror::Error;

/// Named constants usable in expressions.
pub const CONSTANTS: [(&str, f64); 2] = [("pi", std::f64::consts::PI), ("e", std::f64::consts::E)];

/// Nesting limit for parentheses, calls and unary operators.
const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("expression is empty")]
    Empty,
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected {0}")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("name '{0}' is not allowed")]
    UnknownIdentifier(String),
    #[error("'{0}' is a function and must be called")]
    BareFunction(String),
    #[error("'{0}' is not callable")]
    NotCallable(String),
    #[error("{name}() expects {expected}, got {got}")]
    Arity {
        name: &'static str,
        expected: &'static str,
        got: usize,
    },
    #[error("division by zero")]
    DivisionByZero,
    #[error("math domain error in {0}()")]
    Domain(&'static str),
    #[error("result is not a finite number")]
    NonFinite,
    #[error("expression is nested too deeply")]
    TooDeep,
}

/// Functions callable from an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Abs,
    Round,
    Min,
    Max,
    Sum,
    Pow,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Log,
    Log10,
    Exp,
}

impl Function {
    /// All functions, for listing in help text.
    pub const ALL: [Function; 13] = [
        Self::Abs,
        Self::Round,
        Self::Min,
        Self::Max,
        Self::Sum,
        Self::Pow,
        Self::Sqrt,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log,
        Self::Log10,
        Self::Exp,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Round => "round",
            Self::Min => "min",
            Self::Max => "max",
            Self::Sum => "sum",
            Self::Pow => "pow",
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Exp => "exp",
        }
    }

    /// Accepted argument counts as (min, max, human description).
    fn arity(self) -> (usize, Option<usize>, &'static str) {
        match self {
            Self::Round | Self::Log => (1, Some(2), "1 or 2 arguments"),
            Self::Min | Self::Max => (1, None, "at least 1 argument"),
            Self::Sum => (0, None, "any number of arguments"),
            Self::Pow => (2, Some(2), "exactly 2 arguments"),
            _ => (1, Some(1), "exactly 1 argument"),
        }
    }

    fn check_arity(self, got: usize) -> Result<(), EvalError> {
        let (min, max, expected) = self.arity();
        if got < min || max.is_some_and(|max| got > max) {
            return Err(EvalError::Arity {
                name: self.name(),
                expected,
                got,
            });
        }
        Ok(())
    }

    fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
        let value = match (self, args) {
            (Self::Abs, [x]) => x.abs(),
            (Self::Round, [x]) => x.round_ties_even(),
            (Self::Round, [x, digits]) => round_to(*x, *digits)?,
            (Self::Min, _) => args.iter().copied().fold(f64::INFINITY, f64::min),
            (Self::Max, _) => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            (Self::Sum, _) => args.iter().sum(),
            (Self::Pow, [base, exp]) => base.powf(*exp),
            (Self::Sqrt, [x]) if *x < 0.0 => return Err(EvalError::Domain("sqrt")),
            (Self::Sqrt, [x]) => x.sqrt(),
            (Self::Sin, [x]) => x.sin(),
            (Self::Cos, [x]) => x.cos(),
            (Self::Tan, [x]) => x.tan(),
            (Self::Log, [x]) if *x <= 0.0 => return Err(EvalError::Domain("log")),
            (Self::Log, [x]) => x.ln(),
            (Self::Log, [x, base]) if *x <= 0.0 || *base <= 0.0 || *base == 1.0 => {
                return Err(EvalError::Domain("log"));
            }
            (Self::Log, [x, base]) => x.ln() / base.ln(),
            (Self::Log10, [x]) if *x <= 0.0 => return Err(EvalError::Domain("log10")),
            (Self::Log10, [x]) => x.log10(),
            (Self::Exp, [x]) => x.exp(),
            _ => {
                return Err(EvalError::Arity {
                    name: self.name(),
                    expected: self.arity().2,
                    got: args.len(),
                });
            }
        };
        Ok(value)
    }
}

/// Round `x` to `digits` decimal places, half to even.
///
/// Precision past what an `f64` can hold leaves `x` unchanged; rounding to
/// more tens than any finite value has yields zero.
fn round_to(x: f64, digits: f64) -> Result<f64, EvalError> {
    if digits.fract() != 0.0 {
        return Err(EvalError::Domain("round"));
    }
    if digits > f64::MAX_10_EXP as f64 {
        return Ok(x);
    }
    if digits < -(f64::MAX_10_EXP as f64) {
        return Ok(x * 0.0);
    }
    let scale = 10f64.powi(digits as i32);
    let scaled = x * scale;
    if !scaled.is_finite() {
        return Ok(x);
    }
    Ok(scaled.round_ties_even() / scale)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {n}"),
            Token::Ident(name) => write!(f, "name '{name}'"),
            Token::Plus => f.write_str("'+'"),
            Token::Minus => f.write_str("'-'"),
            Token::Star => f.write_str("'*'"),
            Token::Slash => f.write_str("'/'"),
            Token::Caret => f.write_str("'^'"),
            Token::LParen => f.write_str("'('"),
            Token::RParen => f.write_str("')'"),
            Token::Comma => f.write_str("','"),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => tokens.push(Token::Plus),
            '-' => tokens.push(Token::Minus),
            '*' if chars.get(i + 1) == Some(&'*') => {
                tokens.push(Token::Caret);
                i += 1;
            }
            '*' => tokens.push(Token::Star),
            '/' => tokens.push(Token::Slash),
            '^' => tokens.push(Token::Caret),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            ',' => tokens.push(Token::Comma),
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                if i < chars.len() && matches!(chars[i], 'e' | 'E') {
                    let sign = usize::from(matches!(chars.get(i + 1), Some('+' | '-')));
                    if chars.get(i + 1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                        i += 1 + sign;
                        while i < chars.len() && chars[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let text: String = chars[start..i].iter().collect();
                let value = text
                    .parse::<f64>()
                    .map_err(|_| EvalError::InvalidNumber(text.clone()))?;
                tokens.push(Token::Number(value));
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                tokens.push(Token::Ident(chars[start..i].iter().collect()));
                continue;
            }
            other => return Err(EvalError::UnexpectedChar(other)),
        }
        i += 1;
    }

    Ok(tokens)
}

/// Recursive-descent parser that evaluates as it goes.
///
/// Left-associative chains fold into a running value, so a long flat sum
/// costs no stack; only nesting recurses, and nesting is capped.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), EvalError> {
        match self.next() {
            Some(ref token) if token == expected => Ok(()),
            Some(token) => Err(EvalError::UnexpectedToken(token.to_string())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn expression(&mut self, depth: usize) -> Result<f64, EvalError> {
        if depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        let mut value = self.term(depth)?;
        loop {
            if self.eat(&Token::Plus) {
                value += self.term(depth)?;
            } else if self.eat(&Token::Minus) {
                value -= self.term(depth)?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self, depth: usize) -> Result<f64, EvalError> {
        let mut value = self.unary(depth)?;
        loop {
            if self.eat(&Token::Star) {
                value *= self.unary(depth)?;
            } else if self.eat(&Token::Slash) {
                let divisor = self.unary(depth)?;
                if divisor == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                value /= divisor;
            } else {
                return Ok(value);
            }
        }
    }

    fn unary(&mut self, depth: usize) -> Result<f64, EvalError> {
        if depth > MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        if self.eat(&Token::Minus) {
            return Ok(-self.unary(depth + 1)?);
        }
        if self.eat(&Token::Plus) {
            return self.unary(depth + 1);
        }
        self.power(depth)
    }

    fn power(&mut self, depth: usize) -> Result<f64, EvalError> {
        let base = self.primary(depth)?;
        if !self.eat(&Token::Caret) {
            return Ok(base);
        }
        let exp = self.unary(depth + 1)?;
        if base == 0.0 && exp < 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(base.powf(exp))
    }

    fn primary(&mut self, depth: usize) -> Result<f64, EvalError> {
        match self.next() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                let inner = self.expression(depth + 1)?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => self.identifier(name, depth),
            Some(token) => Err(EvalError::UnexpectedToken(token.to_string())),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn identifier(&mut self, name: String, depth: usize) -> Result<f64, EvalError> {
        let called = self.peek() == Some(&Token::LParen);

        if let Some(&(_, value)) = CONSTANTS.iter().find(|(c, _)| *c == name) {
            return if called {
                Err(EvalError::NotCallable(name))
            } else {
                Ok(value)
            };
        }

        let Some(func) = Function::from_name(&name) else {
            return Err(EvalError::UnknownIdentifier(name));
        };
        if !called {
            return Err(EvalError::BareFunction(name));
        }

        self.expect(&Token::LParen)?;
        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                args.push(self.expression(depth + 1)?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::RParen)?;
                break;
            }
        }
        func.check_arity(args.len())?;
        func.apply(&args)
    }
}

/// Parse and evaluate an expression.
///
/// # Errors
///
/// Returns an [`EvalError`] for malformed input, disallowed names, math
/// errors, or a non-finite result. Nothing outside the grammar is ever run.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression(0)?;
    if let Some(token) = parser.peek() {
        return Err(EvalError::UnexpectedToken(token.to_string()));
    }

    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}
