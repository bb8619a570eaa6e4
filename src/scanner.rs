use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::{Error, Reporter, ScanError};
use crate::literal::Literal;
use crate::token::{Location, Token, Type};

pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    reporter: &'a mut Reporter,
    tokens: Vec<Token>,
    start: usize,
    current: usize,
    line: usize,
    column_offset: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner.
    pub fn new(source: &'a str, reporter: &'a mut Reporter) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            reporter,
            tokens: vec!(),
            start: 0,
            current: 0,
            line: 1,
            column_offset: 0,
        }
    }

    /// Scans the source code and returns a vector of tokens.
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens.push(
            Token::new(
                Type::EOF,
                String::from(""),
                None,
                Location::new(self.line, 0)
            )
        );

        self.tokens.clone()
    }

    /// Consumes and returns the next character.
    fn advance(&mut self) -> char {
        match self.source.next() {
            Some(char) => {
                self.current += 1;
                char
            },
            None => panic!("tried to advance past end of the file."),
        }
    }

    /// Returns the next character without consuming it.
    fn peek(&mut self) -> Option<char> {
        self.source.reset_cursor();
        self.source.peek().copied()
    }

    /// Returns the next next character without consuming it.
    fn peek_next(&mut self) -> Option<char> {
        self.source.reset_cursor();
        let char = self.source.advance_cursor().peek().copied();
        self.source.reset_cursor();
        char
    }

    /// Returns if the next character is the expected character.
    fn match_next(&mut self, expected: char) -> bool {
        self.peek_next() == Some(expected)
    }

    /// Returns if the scanner has reached the end of the file.
    fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Adds a new token to the list of tokens.
    fn add_token(&mut self, r#type: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(
            Token::new(
                r#type,
                lexeme,
                literal,
                // A token that started before the latest newline (a multiline
                // string) would otherwise underflow the column.
                Location::new(self.line, self.start.saturating_sub(self.column_offset))
            )
        );
    }

    /// Adds a new single char token to the list of tokens.
    fn add_single_char_token(&mut self, r#type: Type) {
        let c = self.advance();
        self.add_token(r#type, c.to_string(), None);
    }

    /// Adds a new double char token to the list of tokens.
    fn add_double_char_token(&mut self, r#type: Type) {
        let first = self.advance();
        let second = self.advance();

        self.add_token(r#type, format!("{first}{second}"), None);
    }

    /// Registers a newline for line and column accounting.
    fn newline(&mut self) {
        self.line += 1;
        self.column_offset = self.current;
    }

    /// Handles a string literal.
    fn string(&mut self) {
        self.advance(); // Move past the starting double quotes.

        let mut value = Vec::new();
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }

            self.advance();
            value.push(c);

            if c == '\n' {
                self.newline();
            }
        }

        if self.is_at_end() {
            ScanError {
                location: Location::new(self.line, self.current.saturating_sub(self.column_offset)),
                message: String::from("Unterminated string."),
            }.throw(self.reporter);
            return;
        }

        self.advance(); // Move past the closing double quotes.

        let value: String = value.into_iter().collect();

        // Literal does not include the double quotes unlike the lexeme.
        self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
    }

    /// Handles a number literal.
    fn number(&mut self) {
        let mut value = Vec::new();

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            value.push(self.advance());
        }

        // A dot is only part of the number if a digit follows it, so
        // `140.abs` scans as `140` `.` `abs`.
        if self.peek() == Some('.') && matches!(self.peek_next(), Some(c) if c.is_ascii_digit()) {
            value.push(self.advance()); // Consume the dot.

            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                value.push(self.advance());
            }
        }

        let value: String = value.into_iter().collect();
        let number: f64 = value.parse().expect("scanned number literal to be parsable");

        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    /// Handles an identifier or a keyword.
    fn identifier(&mut self) {
        let mut value = Vec::new();

        // is_alphanumeric does not include underscores.
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            value.push(self.advance());
        }

        let value = String::from_iter(value);
        let token_type = match value.as_str() {
            "and"      => Type::And,
            "break"    => Type::Break,
            "class"    => Type::Class,
            "else"     => Type::Else,
            "false"    => Type::False,
            "for"      => Type::For,
            "fun"      => Type::Fun,
            "if"       => Type::If,
            "lambda"   => Type::Lambda,
            "nil"      => Type::Nil,
            "or"       => Type::Or,
            "print"    => Type::Print,
            "return"   => Type::Return,
            "super"    => Type::Super,
            "this"     => Type::This,
            "true"     => Type::True,
            "var"      => Type::Var,
            "while"    => Type::While,
            _          => Type::Identifier,
        };

        self.add_token(token_type, value, None);
    }

    /// Consumes a `//` comment up to the end of the line.
    fn line_comment(&mut self) {
        while matches!(self.peek(), Some(c) if c != '\n') {
            self.advance();
        }
    }

    /// Consumes a `/* */` comment. Block comments do not nest; one left
    /// unterminated simply ends at the end of the file.
    fn block_comment(&mut self) {
        self.advance(); // Move past the slash.
        self.advance(); // Move past the star.

        while let Some(c) = self.peek() {
            if c == '*' && self.match_next('/') {
                self.advance();
                self.advance();
                return;
            }

            self.advance();
            if c == '\n' {
                self.newline();
            }
        }
    }

    /// Scans the next token.
    fn scan_token(&mut self) {
        let Some(c) = self.peek() else { return };
        match c {
            // One character tokens
            '(' => self.add_single_char_token(Type::LeftParen),
            ')' => self.add_single_char_token(Type::RightParen),
            '{' => self.add_single_char_token(Type::LeftBrace),
            '}' => self.add_single_char_token(Type::RightBrace),
            ',' => self.add_single_char_token(Type::Comma),
            '.' => self.add_single_char_token(Type::Dot),
            '-' => self.add_single_char_token(Type::Minus),
            '+' => self.add_single_char_token(Type::Plus),
            ';' => self.add_single_char_token(Type::Semicolon),
            '*' => self.add_single_char_token(Type::Star),
            '?' => self.add_single_char_token(Type::Question),
            ':' => self.add_single_char_token(Type::Colon),

            // Two character tokens
            '!' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::BangEqual);
                } else {
                    self.add_single_char_token(Type::Bang)
                };
            },
            '=' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::EqualEqual);
                } else {
                    self.add_single_char_token(Type::Equal)
                };
            },
            '<' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::LessEqual);
                } else {
                    self.add_single_char_token(Type::Less)
                };
            },
            '>' => {
                if self.match_next('=') {
                    self.add_double_char_token(Type::GreaterEqual);
                } else {
                    self.add_single_char_token(Type::Greater)
                };
            },
            '/' => {
                if self.match_next('/') {
                    self.line_comment();
                } else if self.match_next('*') {
                    self.block_comment();
                } else {
                    self.add_single_char_token(Type::Slash);
                }
            },

            // Ignore whitespace
            ' ' | '\r' | '\t' => {
                self.advance();
            },

            // Update line counter
            '\n' => {
                self.advance();
                self.newline();
            },

            // String
            '"' => self.string(),

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();

                ScanError {
                    location: Location::new(self.line, self.start.saturating_sub(self.column_offset)),
                    message: String::from("Unexpected character."),
                }.throw(self.reporter);
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        let mut reporter = Reporter::new();
        let mut scanner = Scanner::new(source, &mut reporter);
        let tokens = scanner.scan_tokens();
        assert!(!reporter.had_error());
        tokens
    }

    fn types(tokens: &[Token]) -> Vec<Type> {
        tokens.iter().map(|token| token.r#type).collect()
    }

    #[test]
    fn scan_punctuation() {
        let tokens = scan("(){},.;?:");
        assert_eq!(types(&tokens), vec![
            Type::LeftParen, Type::RightParen, Type::LeftBrace, Type::RightBrace,
            Type::Comma, Type::Dot, Type::Semicolon, Type::Question, Type::Colon,
            Type::EOF,
        ]);
    }

    #[test]
    fn scan_compound_operators() {
        let tokens = scan("! != = == < <= > >=");
        assert_eq!(types(&tokens), vec![
            Type::Bang, Type::BangEqual, Type::Equal, Type::EqualEqual,
            Type::Less, Type::LessEqual, Type::Greater, Type::GreaterEqual,
            Type::EOF,
        ]);
    }

    #[test]
    fn scan_number() {
        let tokens = scan("123 45.67");
        assert_eq!(tokens[0].literal, Some(Literal::Number(123.0)));
        assert_eq!(tokens[1].literal, Some(Literal::Number(45.67)));
    }

    #[test]
    fn scan_number_with_trailing_dot() {
        let tokens = scan("140.abs");
        assert_eq!(types(&tokens), vec![Type::Number, Type::Dot, Type::Identifier, Type::EOF]);
        assert_eq!(tokens[0].literal, Some(Literal::Number(140.0)));
    }

    #[test]
    fn scan_number_at_end_of_source() {
        let tokens = scan("12");
        assert_eq!(tokens[0].literal, Some(Literal::Number(12.0)));
    }

    #[test]
    fn scan_string() {
        let tokens = scan("\"hello\"");
        assert_eq!(tokens[0].lexeme, "hello");
        assert_eq!(tokens[0].literal, Some(Literal::String(String::from("hello"))));
    }

    #[test]
    fn scan_multiline_string_counts_lines() {
        let tokens = scan("\"line\none\"\nvar");
        assert_eq!(tokens[0].literal, Some(Literal::String(String::from("line\none"))));
        assert_eq!(tokens[1].r#type, Type::Var);
        assert_eq!(tokens[1].location.line, 3);
    }

    #[test]
    fn scan_keywords() {
        let tokens = scan("and break class lambda nil super this");
        assert_eq!(types(&tokens), vec![
            Type::And, Type::Break, Type::Class, Type::Lambda,
            Type::Nil, Type::Super, Type::This, Type::EOF,
        ]);
    }

    #[test]
    fn scan_identifier_with_underscore() {
        let tokens = scan("_private lambda_ish");
        assert_eq!(types(&tokens), vec![Type::Identifier, Type::Identifier, Type::EOF]);
        assert_eq!(tokens[0].lexeme, "_private");
        assert_eq!(tokens[1].lexeme, "lambda_ish");
    }

    #[test]
    fn scan_line_comment() {
        let tokens = scan("1 // the rest is ignored ,.;\n2");
        assert_eq!(types(&tokens), vec![Type::Number, Type::Number, Type::EOF]);
    }

    #[test]
    fn scan_block_comment() {
        let tokens = scan("1 /* spans\nlines */ 2");
        assert_eq!(types(&tokens), vec![Type::Number, Type::Number, Type::EOF]);
        assert_eq!(tokens[1].location.line, 2);
    }

    #[test]
    fn scan_block_comment_does_not_nest() {
        // The first `*/` closes the comment, leaving `2 *` and an empty
        // comment tail.
        let tokens = scan("/* /* */ 2 */");
        assert_eq!(types(&tokens), vec![Type::Number, Type::Star, Type::Slash, Type::EOF]);
    }

    #[test]
    fn scan_slash_token() {
        let tokens = scan("4 / 2");
        assert_eq!(types(&tokens), vec![Type::Number, Type::Slash, Type::Number, Type::EOF]);
    }

    #[test]
    fn unterminated_string_reports_error() {
        let mut reporter = Reporter::new();
        let mut scanner = Scanner::new("\"open", &mut reporter);
        scanner.scan_tokens();
        assert!(reporter.had_error());
    }

    #[test]
    fn unexpected_character_reports_and_continues() {
        let mut reporter = Reporter::new();
        let mut scanner = Scanner::new("@ 1", &mut reporter);
        let tokens = scanner.scan_tokens();
        assert!(reporter.had_error());
        assert_eq!(types(&tokens), vec![Type::Number, Type::EOF]);
    }
}
