// Expression parser - converts keypad expression strings into AST
// Supports: numbers (with optional e-exponent), the four binary operators,
// remainder (%), power (^), parentheses, and the scientific functions
// (sin, cos, tan, log, sqrt) as first-class syntax.

/// Expression AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Function {
        func: Func,
        arg: Box<Expr>,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    /// Remainder (%). Same precedence as * and /.
    Rem,
    /// Exponentiation (^). Right-associative, binds tightest.
    Pow,
}

/// Scientific function prefixes the keypad offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm.
    Log,
    Sqrt,
}

impl Func {
    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Log => "log",
            Func::Sqrt => "sqrt",
        }
    }

    fn from_name(name: &str) -> Option<Func> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "log" => Some(Func::Log),
            "sqrt" => Some(Func::Sqrt),
            _ => None,
        }
    }
}

/// Parse an expression string into an AST.
pub fn parse(input: &str) -> Result<Expr, String> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err("Empty expression".to_string());
    }
    let (expr, pos) = parse_add_sub(&tokens, 0)?;
    if pos != tokens.len() {
        return Err(format!("Unexpected trailing token at position {}", pos));
    }
    Ok(expr)
}

#[derive(Debug, Clone)]
enum Token {
    Number(f64),
    Func(Func),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LParen,
    RParen,
}

fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' => {
                tokens.push(Token::Plus);
                chars.next();
            }
            '-' => {
                tokens.push(Token::Minus);
                chars.next();
            }
            '*' => {
                tokens.push(Token::Star);
                chars.next();
            }
            '/' => {
                tokens.push(Token::Slash);
                chars.next();
            }
            '%' => {
                tokens.push(Token::Percent);
                chars.next();
            }
            '^' => {
                tokens.push(Token::Caret);
                chars.next();
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut num_str = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        num_str.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                // Optional exponent suffix: e, e+, e- followed by digits.
                // Only consumed when a digit actually follows, so a trailing
                // letter stays an identifier error rather than a half-eaten
                // exponent.
                if chars.peek() == Some(&'e') || chars.peek() == Some(&'E') {
                    let mut lookahead = chars.clone();
                    let e = lookahead.next().unwrap_or('e');
                    let mut suffix = String::from(e);
                    if let Some(&sign) = lookahead.peek() {
                        if sign == '+' || sign == '-' {
                            suffix.push(sign);
                            lookahead.next();
                        }
                    }
                    if lookahead.peek().is_some_and(|d| d.is_ascii_digit()) {
                        for _ in 0..suffix.len() {
                            chars.next();
                        }
                        num_str.push_str(&suffix);
                        while let Some(&d) = chars.peek() {
                            if d.is_ascii_digit() {
                                num_str.push(d);
                                chars.next();
                            } else {
                                break;
                            }
                        }
                    }
                }
                let num: f64 = num_str
                    .parse()
                    .map_err(|_| format!("Invalid number: {}", num_str))?;
                tokens.push(Token::Number(num));
            }
            'a'..='z' | 'A'..='Z' => {
                let mut ident = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_ascii_alphabetic() {
                        ident.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match Func::from_name(&ident.to_lowercase()) {
                    Some(func) => tokens.push(Token::Func(func)),
                    None => return Err(format!("Unknown function: {}", ident)),
                }
            }
            _ => return Err(format!("Unexpected character: {}", c)),
        }
    }

    Ok(tokens)
}

fn parse_add_sub(tokens: &[Token], pos: usize) -> Result<(Expr, usize), String> {
    let (mut left, mut pos) = parse_mul_div(tokens, pos)?;

    while pos < tokens.len() {
        let op = match &tokens[pos] {
            Token::Plus => BinOp::Add,
            Token::Minus => BinOp::Sub,
            _ => break,
        };
        let (right, new_pos) = parse_mul_div(tokens, pos + 1)?;
        left = Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
        pos = new_pos;
    }

    Ok((left, pos))
}

fn parse_mul_div(tokens: &[Token], pos: usize) -> Result<(Expr, usize), String> {
    let (mut left, mut pos) = parse_power(tokens, pos)?;

    while pos < tokens.len() {
        let op = match &tokens[pos] {
            Token::Star => BinOp::Mul,
            Token::Slash => BinOp::Div,
            Token::Percent => BinOp::Rem,
            _ => break,
        };
        let (right, new_pos) = parse_power(tokens, pos + 1)?;
        left = Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
        pos = new_pos;
    }

    Ok((left, pos))
}

// Exponentiation (^) - right-associative, higher precedence than * /
fn parse_power(tokens: &[Token], pos: usize) -> Result<(Expr, usize), String> {
    let (base, pos) = parse_primary(tokens, pos)?;

    if pos < tokens.len() {
        if let Token::Caret = &tokens[pos] {
            // Right-associative: recurse into parse_power for the exponent
            let (exponent, new_pos) = parse_power(tokens, pos + 1)?;
            return Ok((
                Expr::BinaryOp {
                    op: BinOp::Pow,
                    left: Box::new(base),
                    right: Box::new(exponent),
                },
                new_pos,
            ));
        }
    }

    Ok((base, pos))
}

fn parse_primary(tokens: &[Token], pos: usize) -> Result<(Expr, usize), String> {
    if pos >= tokens.len() {
        return Err("Unexpected end of expression".to_string());
    }

    match &tokens[pos] {
        Token::Number(n) => Ok((Expr::Number(*n), pos + 1)),
        Token::Func(func) => {
            // Function call: name must be followed by a parenthesized argument
            if pos + 1 >= tokens.len() || !matches!(&tokens[pos + 1], Token::LParen) {
                return Err(format!("{} must be followed by (", func.name()));
            }
            let (arg, new_pos) = parse_add_sub(tokens, pos + 2)?;
            if new_pos >= tokens.len() || !matches!(&tokens[new_pos], Token::RParen) {
                return Err("Missing closing parenthesis".to_string());
            }
            Ok((
                Expr::Function {
                    func: *func,
                    arg: Box::new(arg),
                },
                new_pos + 1,
            ))
        }
        Token::LParen => {
            let (expr, pos) = parse_add_sub(tokens, pos + 1)?;
            if pos >= tokens.len() {
                return Err("Missing closing parenthesis".to_string());
            }
            match &tokens[pos] {
                Token::RParen => Ok((expr, pos + 1)),
                _ => Err("Expected closing parenthesis".to_string()),
            }
        }
        Token::Plus => {
            // Unary plus (no-op, just parse the next expression)
            parse_primary(tokens, pos + 1)
        }
        Token::Minus => {
            // Unary minus
            let (expr, pos) = parse_primary(tokens, pos + 1)?;
            Ok((
                Expr::BinaryOp {
                    op: BinOp::Sub,
                    left: Box::new(Expr::Number(0.0)),
                    right: Box::new(expr),
                },
                pos,
            ))
        }
        _ => Err(format!("Unexpected token at position {}", pos)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        let expr = parse("42").unwrap();
        match expr {
            Expr::Number(n) => assert_eq!(n, 42.0),
            _ => panic!("Expected Number, got {:?}", expr),
        }
    }

    #[test]
    fn test_parse_decimal() {
        let expr = parse("1.25").unwrap();
        match expr {
            Expr::Number(n) => assert!((n - 1.25).abs() < 1e-12),
            _ => panic!("Expected Number, got {:?}", expr),
        }
    }

    #[test]
    fn test_parse_leading_dot() {
        let expr = parse(".5").unwrap();
        match expr {
            Expr::Number(n) => assert!((n - 0.5).abs() < 1e-12),
            _ => panic!("Expected Number, got {:?}", expr),
        }
    }

    #[test]
    fn test_parse_exponent_suffix() {
        let expr = parse("2.5e-1").unwrap();
        match expr {
            Expr::Number(n) => assert!((n - 0.25).abs() < 1e-12),
            _ => panic!("Expected Number, got {:?}", expr),
        }
    }

    #[test]
    fn test_precedence_mul_over_add() {
        // 2+3*4 parses as 2+(3*4)
        let expr = parse("2+3*4").unwrap();
        match expr {
            Expr::BinaryOp {
                op: BinOp::Add,
                right,
                ..
            } => match right.as_ref() {
                Expr::BinaryOp { op: BinOp::Mul, .. } => {}
                other => panic!("Expected Mul on right, got {:?}", other),
            },
            _ => panic!("Expected Add at root, got {:?}", expr),
        }
    }

    #[test]
    fn test_rem_same_precedence_as_mul() {
        // 10%4*2 parses left-to-right: (10%4)*2
        let expr = parse("10%4*2").unwrap();
        match expr {
            Expr::BinaryOp {
                op: BinOp::Mul,
                left,
                ..
            } => match left.as_ref() {
                Expr::BinaryOp { op: BinOp::Rem, .. } => {}
                other => panic!("Expected Rem on left, got {:?}", other),
            },
            _ => panic!("Expected Mul at root, got {:?}", expr),
        }
    }

    #[test]
    fn test_power_right_associative() {
        // 2^3^2 parses as 2^(3^2)
        let expr = parse("2^3^2").unwrap();
        match expr {
            Expr::BinaryOp {
                op: BinOp::Pow,
                right,
                ..
            } => match right.as_ref() {
                Expr::BinaryOp { op: BinOp::Pow, .. } => {}
                other => panic!("Expected Pow on right, got {:?}", other),
            },
            _ => panic!("Expected Pow at root, got {:?}", expr),
        }
    }

    #[test]
    fn test_parens_override() {
        let expr = parse("(2+3)*4").unwrap();
        match expr {
            Expr::BinaryOp {
                op: BinOp::Mul,
                left,
                ..
            } => match left.as_ref() {
                Expr::BinaryOp { op: BinOp::Add, .. } => {}
                other => panic!("Expected Add on left, got {:?}", other),
            },
            _ => panic!("Expected Mul at root, got {:?}", expr),
        }
    }

    #[test]
    fn test_unary_minus() {
        // -5 parses as 0-5
        let expr = parse("-5").unwrap();
        match expr {
            Expr::BinaryOp {
                op: BinOp::Sub,
                left,
                ..
            } => match left.as_ref() {
                Expr::Number(n) => assert_eq!(*n, 0.0),
                other => panic!("Expected Number(0) on left, got {:?}", other),
            },
            _ => panic!("Expected Sub (unary minus), got {:?}", expr),
        }
    }

    #[test]
    fn test_unary_plus_chained() {
        let expr = parse("++1").unwrap();
        match expr {
            Expr::Number(n) => assert_eq!(n, 1.0),
            _ => panic!("Expected Number(1), got {:?}", expr),
        }
    }

    #[test]
    fn test_function_call() {
        let expr = parse("sqrt(9)").unwrap();
        match expr {
            Expr::Function {
                func: Func::Sqrt,
                arg,
            } => match arg.as_ref() {
                Expr::Number(n) => assert_eq!(*n, 9.0),
                other => panic!("Expected Number(9) arg, got {:?}", other),
            },
            _ => panic!("Expected Function, got {:?}", expr),
        }
    }

    #[test]
    fn test_function_with_expression_arg() {
        let expr = parse("sin(1+2)").unwrap();
        match expr {
            Expr::Function {
                func: Func::Sin,
                arg,
            } => match arg.as_ref() {
                Expr::BinaryOp { op: BinOp::Add, .. } => {}
                other => panic!("Expected Add arg, got {:?}", other),
            },
            _ => panic!("Expected Function, got {:?}", expr),
        }
    }

    #[test]
    fn test_function_requires_parens() {
        assert!(parse("sin 1").is_err());
        assert!(parse("sin").is_err());
    }

    #[test]
    fn test_unknown_identifier_rejected() {
        assert!(parse("foo(1)").is_err());
        assert!(parse("pi").is_err());
    }

    #[test]
    fn test_unbalanced_parens_rejected() {
        assert!(parse("(1+2").is_err());
        assert!(parse("1+2)").is_err());
        assert!(parse("sqrt(4").is_err());
    }

    #[test]
    fn test_trailing_operator_rejected() {
        assert!(parse("2+").is_err());
        assert!(parse("2*").is_err());
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_exponent_without_digits_rejected() {
        // "2e" leaves a bare identifier behind the number
        assert!(parse("2e").is_err());
        assert!(parse("2e+").is_err());
    }
}
