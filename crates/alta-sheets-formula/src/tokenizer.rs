//! Expression tokenizer
//!
//! Splits an expression string into classified tokens. The scan is lazy and
//! restartable: [`tokenize`] returns an iterator borrowing the input, and
//! calling it again rescans from the start. Whitespace separates tokens but
//! never appears inside one.

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
    /// One of the four operator symbols `+ - * /`
    Operator,
    /// A letter followed by zero or more letters and/or digits
    Variable,
    /// Numeric literal with optional fraction and exponent
    Number,
    /// A character with no place in the grammar
    Invalid,
}

/// A classified lexical unit of an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    kind: TokenKind,
}

impl Token {
    pub(crate) fn new(text: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    /// The token's text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The token's classification
    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}

/// Tokenize an expression string
///
/// The tokenizer itself never fails; characters that fit no token class come
/// out as single-character [`TokenKind::Invalid`] tokens, which the formula
/// validator rejects with a position.
///
/// # Example
/// ```rust
/// use alta_sheets_formula::tokenizer::{tokenize, TokenKind};
///
/// let kinds: Vec<TokenKind> = tokenize("x1 + 2.5").map(|t| t.kind()).collect();
/// assert_eq!(
///     kinds,
///     vec![TokenKind::Variable, TokenKind::Operator, TokenKind::Number]
/// );
/// ```
pub fn tokenize(expr: &str) -> Tokens<'_> {
    Tokens {
        input: expr,
        pos: 0,
    }
}

/// Iterator over the tokens of an expression string
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().map_or(false, |c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn scan_variable(&mut self) {
        while self
            .peek_char()
            .map_or(false, |c| c.is_ascii_alphanumeric())
        {
            self.advance();
        }
    }

    fn scan_number(&mut self) {
        // Integer part
        while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        // Exponent part: lowercase 'e' with at least one digit after the
        // optional sign; anything less is left for the next token
        if self.peek_char() == Some('e') {
            let digits_from = if matches!(self.peek_char_at(1), Some('+') | Some('-')) {
                2
            } else {
                1
            };
            if self
                .peek_char_at(digits_from)
                .map_or(false, |c| c.is_ascii_digit())
            {
                for _ in 0..=digits_from {
                    self.advance();
                }
                while self.peek_char().map_or(false, |c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let c = self.peek_char()?;
        let start = self.pos;

        let kind = match c {
            '(' => {
                self.advance();
                TokenKind::LeftParen
            }
            ')' => {
                self.advance();
                TokenKind::RightParen
            }
            '+' | '-' | '*' | '/' => {
                self.advance();
                TokenKind::Operator
            }
            _ if c.is_ascii_alphabetic() => {
                self.advance();
                self.scan_variable();
                TokenKind::Variable
            }
            _ if c.is_ascii_digit()
                || (c == '.' && self.peek_char_at(1).map_or(false, |d| d.is_ascii_digit())) =>
            {
                self.scan_number();
                TokenKind::Number
            }
            _ => {
                self.advance();
                TokenKind::Invalid
            }
        };

        Some(Token::new(&self.input[start..self.pos], kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(expr: &str) -> Vec<TokenKind> {
        tokenize(expr).map(|t| t.kind()).collect()
    }

    fn texts(expr: &str) -> Vec<String> {
        tokenize(expr).map(|t| t.text().to_string()).collect()
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(tokenize("").count(), 0);
        assert_eq!(tokenize("   \t\n  ").count(), 0);
    }

    #[test]
    fn test_parens_and_operators() {
        assert_eq!(
            kinds("()+-*/"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Operator,
                TokenKind::Operator,
                TokenKind::Operator,
                TokenKind::Operator,
            ]
        );
    }

    #[test]
    fn test_variables() {
        assert_eq!(texts("x y12 Abc9z"), vec!["x", "y12", "Abc9z"]);
        assert!(tokenize("x y12 Abc9z").all(|t| t.kind() == TokenKind::Variable));
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts("5 5. .5 2.5 2.5e9 3e-2 7e+10"), vec![
            "5", "5.", ".5", "2.5", "2.5e9", "3e-2", "7e+10"
        ]);
        assert!(tokenize("5 5. .5 2.5 2.5e9 3e-2 7e+10").all(|t| t.kind() == TokenKind::Number));
    }

    #[test]
    fn test_exponent_needs_digits() {
        // A bare 'e' suffix is not part of the literal
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number, TokenKind::Variable]
        );
        assert_eq!(texts("2e"), vec!["2", "e"]);

        // Neither is 'e' followed only by a sign
        assert_eq!(
            kinds("2e+"),
            vec![TokenKind::Number, TokenKind::Variable, TokenKind::Operator]
        );
    }

    #[test]
    fn test_uppercase_exponent_is_a_variable() {
        assert_eq!(texts("2.5E9"), vec!["2.5", "E9"]);
        assert_eq!(
            kinds("2.5E9"),
            vec![TokenKind::Number, TokenKind::Variable]
        );
    }

    #[test]
    fn test_number_then_variable_splits() {
        assert_eq!(texts("5x"), vec!["5", "x"]);
        assert_eq!(kinds("5x"), vec![TokenKind::Number, TokenKind::Variable]);
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(kinds("_"), vec![TokenKind::Invalid]);
        assert_eq!(kinds("$"), vec![TokenKind::Invalid]);
        // A lone dot has no digits on either side
        assert_eq!(kinds(". "), vec![TokenKind::Invalid]);
        assert_eq!(
            kinds("2 # 3"),
            vec![TokenKind::Number, TokenKind::Invalid, TokenKind::Number]
        );
    }

    #[test]
    fn test_whitespace_elided() {
        assert_eq!(texts("  ( 5 *  2)+ 8 "), vec!["(", "5", "*", "2", ")", "+", "8"]);
    }

    #[test]
    fn test_restartable() {
        let expr = "x + 1";
        let first: Vec<String> = texts(expr);
        let second: Vec<String> = texts(expr);
        assert_eq!(first, second);
    }
}
