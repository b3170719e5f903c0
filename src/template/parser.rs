//! Template parser
//!
//! Splits a configuration string into literal and `{{ expression }}` segments
//! and parses each expression body. Expressions are either a helper
//! invocation (`$name arg1 arg2 ...`) or a bare context path. Arguments are
//! quoted strings, numbers, `true`/`false`/`null`, paths, or a parenthesized
//! nested invocation like `($json "HTTP Request" "data.users")`.
//!
//! Malformed syntax is a configuration error surfaced here; parsing never
//! looks at the snapshot or the registry.

use super::ast::{Expr, Segment, Template};
use crate::error::EngineError;
use crate::value::Value;

/// Parse a template string into segments
pub fn parse(input: &str) -> Result<Template, EngineError> {
    let mut segments = Vec::new();
    let mut rest = input;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            segments.push(Segment::Literal(rest[..open].to_string()));
        }
        let after = &rest[open + 2..];
        let close = after
            .find("}}")
            .ok_or_else(|| EngineError::syntax("unterminated '{{' expression"))?;
        let body = after[..close].trim();
        if body.is_empty() {
            return Err(EngineError::syntax("empty expression"));
        }
        segments.push(Segment::Expr(parse_expression(body)?));
        rest = &after[close + 2..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest.to_string()));
    }

    Ok(Template { segments })
}

#[derive(Debug, PartialEq)]
enum Token {
    Str(String),
    Word(String),
    LParen,
    RParen,
}

fn tokenize(body: &str) -> Result<Vec<Token>, EngineError> {
    let chars: Vec<char> = body.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        match c {
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            '\'' | '"' => {
                let quote = c;
                let mut j = i + 1;
                while j < chars.len() && chars[j] != quote {
                    j += 1;
                }
                if j >= chars.len() {
                    return Err(EngineError::syntax(format!(
                        "unterminated string in expression: {body}"
                    )));
                }
                tokens.push(Token::Str(chars[i + 1..j].iter().collect()));
                i = j + 1;
            }
            _ => {
                let mut j = i;
                while j < chars.len()
                    && !chars[j].is_whitespace()
                    && !matches!(chars[j], '(' | ')' | '\'' | '"')
                {
                    j += 1;
                }
                tokens.push(Token::Word(chars[i..j].iter().collect()));
                i = j;
            }
        }
    }

    Ok(tokens)
}

fn parse_expression(body: &str) -> Result<Expr, EngineError> {
    let tokens = tokenize(body)?;
    match tokens.first() {
        Some(Token::Word(name)) if name.starts_with('$') => {
            let name = name.clone();
            let mut pos = 1;
            let mut args = Vec::new();
            while pos < tokens.len() {
                args.push(parse_arg(&tokens, &mut pos, body)?);
            }
            Ok(Expr::Call { name, args })
        }
        Some(token) if tokens.len() == 1 => parse_term(token, body),
        _ => Err(EngineError::syntax(format!(
            "could not parse expression: {body}"
        ))),
    }
}

fn parse_arg(tokens: &[Token], pos: &mut usize, body: &str) -> Result<Expr, EngineError> {
    match &tokens[*pos] {
        Token::LParen => {
            *pos += 1;
            let name = match tokens.get(*pos) {
                Some(Token::Word(name)) if name.starts_with('$') => name.clone(),
                _ => {
                    return Err(EngineError::syntax(format!(
                        "expected a helper name after '(' in expression: {body}"
                    )))
                }
            };
            *pos += 1;
            let mut args = Vec::new();
            loop {
                match tokens.get(*pos) {
                    Some(Token::RParen) => {
                        *pos += 1;
                        break;
                    }
                    Some(_) => args.push(parse_arg(tokens, pos, body)?),
                    None => {
                        return Err(EngineError::syntax(format!(
                            "missing ')' in expression: {body}"
                        )))
                    }
                }
            }
            Ok(Expr::Call { name, args })
        }
        Token::RParen => Err(EngineError::syntax(format!(
            "unexpected ')' in expression: {body}"
        ))),
        token => {
            let expr = parse_term(token, body)?;
            *pos += 1;
            Ok(expr)
        }
    }
}

fn parse_term(token: &Token, body: &str) -> Result<Expr, EngineError> {
    match token {
        Token::Str(s) => Ok(Expr::Literal(Value::String(s.clone()))),
        Token::Word(word) => {
            if word == "null" {
                return Ok(Expr::Literal(Value::Null));
            }
            if word == "true" {
                return Ok(Expr::Literal(Value::Bool(true)));
            }
            if word == "false" {
                return Ok(Expr::Literal(Value::Bool(false)));
            }
            if let Ok(n) = word.parse::<f64>() {
                return Ok(Expr::Literal(Value::Number(n)));
            }
            if word.starts_with('$') {
                return Err(EngineError::syntax(format!(
                    "helper '{word}' must be parenthesized when used as an argument: {body}"
                )));
            }
            Ok(Expr::Path(word.clone()))
        }
        Token::LParen | Token::RParen => Err(EngineError::syntax(format!(
            "could not parse expression: {body}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_only_template() {
        let template = parse("no expressions here").unwrap();
        assert_eq!(
            template.segments,
            vec![Segment::Literal("no expressions here".to_string())]
        );
        assert!(!template.has_expressions());
    }

    #[test]
    fn test_empty_input() {
        let template = parse("").unwrap();
        assert!(template.segments.is_empty());
    }

    #[test]
    fn test_mixed_segments() {
        let template = parse("Hello {{ $json \"User\" \"name\" }}!").unwrap();
        assert_eq!(
            template.segments,
            vec![
                Segment::Literal("Hello ".to_string()),
                Segment::Expr(Expr::Call {
                    name: "$json".to_string(),
                    args: vec![
                        Expr::Literal(Value::String("User".to_string())),
                        Expr::Literal(Value::String("name".to_string())),
                    ],
                }),
                Segment::Literal("!".to_string()),
            ]
        );
    }

    #[test]
    fn test_single_quotes_and_literals() {
        let template = parse("{{ $if true 'yes' 0.5 }}").unwrap();
        assert_eq!(
            template.segments,
            vec![Segment::Expr(Expr::Call {
                name: "$if".to_string(),
                args: vec![
                    Expr::Literal(Value::Bool(true)),
                    Expr::Literal(Value::String("yes".to_string())),
                    Expr::Literal(Value::Number(0.5)),
                ],
            })]
        );
    }

    #[test]
    fn test_null_literal_and_negative_number() {
        let template = parse("{{ $eq null -2 }}").unwrap();
        assert_eq!(
            template.segments,
            vec![Segment::Expr(Expr::Call {
                name: "$eq".to_string(),
                args: vec![
                    Expr::Literal(Value::Null),
                    Expr::Literal(Value::Number(-2.0)),
                ],
            })]
        );
    }

    #[test]
    fn test_bare_path() {
        let template = parse("{{ items.0.name }}").unwrap();
        assert_eq!(
            template.segments,
            vec![Segment::Expr(Expr::Path("items.0.name".to_string()))]
        );
    }

    #[test]
    fn test_path_as_argument() {
        let template = parse("{{ $length items }}").unwrap();
        assert_eq!(
            template.segments,
            vec![Segment::Expr(Expr::Call {
                name: "$length".to_string(),
                args: vec![Expr::Path("items".to_string())],
            })]
        );
    }

    #[test]
    fn test_nested_invocation() {
        let template = parse("{{ $length ($json \"HTTP Request\" \"data.users\") }}").unwrap();
        assert_eq!(
            template.segments,
            vec![Segment::Expr(Expr::Call {
                name: "$length".to_string(),
                args: vec![Expr::Call {
                    name: "$json".to_string(),
                    args: vec![
                        Expr::Literal(Value::String("HTTP Request".to_string())),
                        Expr::Literal(Value::String("data.users".to_string())),
                    ],
                }],
            })]
        );
    }

    #[test]
    fn test_deeply_nested_invocation() {
        let template = parse("{{ $first ($sort ($json 'N') 'k') }}").unwrap();
        let Segment::Expr(Expr::Call { name, args }) = &template.segments[0] else {
            panic!("expected a call segment");
        };
        assert_eq!(name, "$first");
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_unterminated_expression() {
        let err = parse("broken {{ $json 'A'").unwrap_err();
        assert!(matches!(err, EngineError::Syntax(_)));
    }

    #[test]
    fn test_empty_expression() {
        assert!(matches!(parse("{{ }}"), Err(EngineError::Syntax(_))));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(parse("{{ $json 'A }}"), Err(EngineError::Syntax(_))));
    }

    #[test]
    fn test_missing_close_paren() {
        assert!(matches!(
            parse("{{ $length ($json 'A' }}"),
            Err(EngineError::Syntax(_))
        ));
    }

    #[test]
    fn test_unparenthesized_helper_argument() {
        assert!(matches!(
            parse("{{ $length $json }}"),
            Err(EngineError::Syntax(_))
        ));
    }

    #[test]
    fn test_two_bare_words_is_an_error() {
        assert!(matches!(parse("{{ items extra }}"), Err(EngineError::Syntax(_))));
    }
}
