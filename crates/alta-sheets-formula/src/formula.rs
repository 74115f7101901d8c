//! Infix arithmetic formulas
//!
//! A [`Formula`] validates an expression string once at construction and
//! evaluates it later against a caller-supplied variable resolver. Evaluation
//! is a single left-to-right pass over the validated tokens with an operand
//! stack and an operator stack; no syntax tree is built.

use std::fmt;
use std::str::FromStr;

use ahash::AHashSet;

use crate::error::{FormulaError, FormulaResult};
use crate::tokenizer::{tokenize, Token, TokenKind};

/// A validated infix arithmetic expression.
///
/// Formulas are composed of non-negative numeric literals, variables (a letter
/// followed by zero or more letters and/or digits), parentheses, and the four
/// binary operators `+`, `-`, `*`, and `/`. Unary operators are not part of
/// the grammar, so `-5.3` does not parse. Whitespace is permitted between
/// tokens but not required.
///
/// Construction fails on any grammar violation; a `Formula` that exists is
/// valid and immutable.
///
/// # Example
/// ```rust
/// use alta_sheets_formula::Formula;
///
/// let formula = Formula::new("x * y - 2 + 35 / 9")?;
/// let value = formula.evaluate(|name| match name {
///     "x" => Some(4.0),
///     "y" => Some(3.0),
///     _ => None,
/// })?;
/// assert!((value - (4.0 * 3.0 - 2.0 + 35.0 / 9.0)).abs() < 1e-12);
/// # Ok::<(), alta_sheets_formula::FormulaError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    tokens: Vec<Token>,
}

impl Formula {
    /// Parse and validate an expression.
    ///
    /// The token sequence must be non-empty, parentheses must balance, and
    /// value-position tokens (numbers, variables, `(`) must alternate with
    /// operator-position tokens (operators, `)`) so the expression begins and
    /// ends in value-producing position. Errors carry the 1-based index of the
    /// offending token where one exists.
    pub fn new(expr: &str) -> FormulaResult<Self> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        let mut expecting_value = true;

        for (index, token) in tokenize(expr).enumerate() {
            let position = index + 1;
            match token.kind() {
                TokenKind::Invalid => {
                    return Err(FormulaError::syntax_at(
                        format!("unrecognized symbol '{}'", token.text()),
                        position,
                    ));
                }
                TokenKind::LeftParen => {
                    if !expecting_value {
                        return Err(FormulaError::syntax_at(
                            "misplaced opening parenthesis",
                            position,
                        ));
                    }
                    depth += 1;
                }
                TokenKind::RightParen => {
                    if expecting_value {
                        return Err(FormulaError::syntax_at(
                            "misplaced closing parenthesis",
                            position,
                        ));
                    }
                    if depth == 0 {
                        return Err(FormulaError::syntax_at(
                            "unbalanced closing parenthesis",
                            position,
                        ));
                    }
                    depth -= 1;
                }
                TokenKind::Number | TokenKind::Variable => {
                    if !expecting_value {
                        return Err(FormulaError::syntax_at(
                            format!("misplaced value '{}'", token.text()),
                            position,
                        ));
                    }
                    expecting_value = false;
                }
                TokenKind::Operator => {
                    if !expecting_value {
                        expecting_value = true;
                    } else {
                        return Err(FormulaError::syntax_at(
                            format!("misplaced operator '{}'", token.text()),
                            position,
                        ));
                    }
                }
            }
            tokens.push(token);
        }

        if depth != 0 {
            return Err(FormulaError::syntax("unclosed parenthesis"));
        }
        if tokens.is_empty() {
            return Err(FormulaError::syntax("empty expression"));
        }
        if expecting_value {
            return Err(FormulaError::syntax("expression ends with an operator"));
        }

        Ok(Self { tokens })
    }

    /// Parse and validate an expression, then canonicalize its variables.
    ///
    /// After the base grammar check succeeds, every variable token is
    /// rewritten through `normalizer` and the rewritten name must be accepted
    /// by `validator`; rejection fails the whole construction.
    ///
    /// # Example
    /// ```rust
    /// use alta_sheets_formula::Formula;
    ///
    /// let formula = Formula::with_rules(
    ///     "a1 + b2",
    ///     |name| name.to_uppercase(),
    ///     |name| name.len() == 2,
    /// )?;
    /// assert_eq!(formula.to_string(), "A1+B2");
    /// # Ok::<(), alta_sheets_formula::FormulaError>(())
    /// ```
    pub fn with_rules<N, V>(expr: &str, normalizer: N, validator: V) -> FormulaResult<Self>
    where
        N: Fn(&str) -> String,
        V: Fn(&str) -> bool,
    {
        let mut formula = Self::new(expr)?;
        for token in &mut formula.tokens {
            if token.kind() == TokenKind::Variable {
                let normalized = normalizer(token.text());
                if !validator(&normalized) {
                    return Err(FormulaError::syntax(format!(
                        "normalized variable name '{}' rejected",
                        normalized
                    )));
                }
                *token = Token::new(normalized, TokenKind::Variable);
            }
        }
        Ok(formula)
    }

    /// The distinct variable names appearing in the formula
    /// (post-normalization when built with [`Formula::with_rules`]).
    pub fn variables(&self) -> AHashSet<String> {
        self.tokens
            .iter()
            .filter(|t| t.kind() == TokenKind::Variable)
            .map(|t| t.text().to_string())
            .collect()
    }

    /// Evaluate the formula.
    ///
    /// `resolver` maps a variable name to its value, or `None` when the name
    /// has no value; an unresolved variable aborts with
    /// [`FormulaError::UndefinedVariable`]. Standard precedence applies: `*`
    /// and `/` bind tighter than `+` and `-`, equal precedence associates
    /// left to right, and parentheses override. Division by zero aborts with
    /// [`FormulaError::DivideByZero`]; no partial result is returned.
    pub fn evaluate<R>(&self, mut resolver: R) -> FormulaResult<f64>
    where
        R: FnMut(&str) -> Option<f64>,
    {
        let mut values: Vec<f64> = Vec::new();
        let mut ops: Vec<char> = Vec::new();

        for token in &self.tokens {
            match token.kind() {
                TokenKind::Number | TokenKind::Variable => {
                    let num = if token.kind() == TokenKind::Variable {
                        resolver(token.text()).ok_or_else(|| {
                            FormulaError::UndefinedVariable(token.text().to_string())
                        })?
                    } else {
                        token
                            .text()
                            .parse::<f64>()
                            .map_err(|_| FormulaError::Internal("unparseable numeric literal"))?
                    };
                    // A pending * or / reduces as soon as its right operand
                    // arrives, so multiplicative chains never pile up
                    let pending_mul = matches!(ops.last(), Some('*') | Some('/'));
                    values.push(num);
                    if pending_mul {
                        reduce(&mut values, &mut ops)?;
                    }
                }
                TokenKind::Operator => {
                    let op = token
                        .text()
                        .chars()
                        .next()
                        .ok_or(FormulaError::Internal("empty operator token"))?;
                    match op {
                        '+' | '-' => {
                            // At most one additive operator is pending per
                            // parenthesis level
                            if matches!(ops.last(), Some('+') | Some('-')) {
                                reduce(&mut values, &mut ops)?;
                            }
                            ops.push(op);
                        }
                        '*' | '/' => ops.push(op),
                        _ => return Err(FormulaError::Internal("unrecognized operator")),
                    }
                }
                TokenKind::LeftParen => ops.push('('),
                TokenKind::RightParen => {
                    if matches!(ops.last(), Some('+') | Some('-')) {
                        reduce(&mut values, &mut ops)?;
                    }
                    match ops.pop() {
                        Some('(') => {}
                        _ => return Err(FormulaError::Internal("missing parenthesis marker")),
                    }
                    // The closed group may itself be the right operand of an
                    // outer * or /
                    if matches!(ops.last(), Some('*') | Some('/')) {
                        reduce(&mut values, &mut ops)?;
                    }
                }
                TokenKind::Invalid => {
                    return Err(FormulaError::Internal("invalid token survived validation"))
                }
            }
        }

        if !ops.is_empty() {
            reduce(&mut values, &mut ops)?;
        }
        values
            .pop()
            .ok_or(FormulaError::Internal("operand stack underflow"))
    }
}

/// Pop one operator and two operands and push the combination. The first
/// operand popped is the right-hand side.
fn reduce(values: &mut Vec<f64>, ops: &mut Vec<char>) -> FormulaResult<()> {
    let op = ops
        .pop()
        .ok_or(FormulaError::Internal("operator stack underflow"))?;
    let right = values
        .pop()
        .ok_or(FormulaError::Internal("operand stack underflow"))?;
    let left = values
        .pop()
        .ok_or(FormulaError::Internal("operand stack underflow"))?;
    let combined = match op {
        '+' => left + right,
        '-' => left - right,
        '*' => left * right,
        '/' => {
            if right == 0.0 {
                return Err(FormulaError::DivideByZero);
            }
            left / right
        }
        _ => return Err(FormulaError::Internal("unrecognized operator")),
    };
    values.push(combined);
    Ok(())
}

impl fmt::Display for Formula {
    /// Concatenates the token texts with no separators. Original whitespace is
    /// not preserved, so this is a lossy re-rendering suitable for display and
    /// text comparison, not byte-identical round trips.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token.text())?;
        }
        Ok(())
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
