// Permissive literal parser for model output that is almost, but not quite, JSON.
//
// Accepts what models commonly emit when asked for JSON: single-quoted
// strings, bare object keys, trailing commas, Python-style True/False/None,
// and tuples in place of arrays. The whole input must be one literal; any
// trailing garbage fails the parse just like a strict parser would.

use serde_json::{Map, Number, Value};

/// Nesting deeper than this is rejected rather than risking the stack.
const MAX_DEPTH: usize = 128;

/// Parse `text` as a loose literal. Returns `None` on any syntax error.
pub fn parse_loose(text: &str) -> Option<Value> {
    let mut parser = Parser { src: text, pos: 0 };
    let value = parser.value(0)?;
    parser.skip_ws();
    if parser.pos == text.len() {
        Some(value)
    } else {
        None
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn value(&mut self, depth: usize) -> Option<Value> {
        if depth > MAX_DEPTH {
            return None;
        }
        self.skip_ws();
        match self.peek()? {
            '{' => self.object(depth),
            '[' => self.sequence(depth, ']'),
            '(' => self.sequence(depth, ')'),
            '"' | '\'' => self.string().map(Value::String),
            c if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            c if is_ident_char(c) => self.keyword(),
            _ => None,
        }
    }

    fn object(&mut self, depth: usize) -> Option<Value> {
        self.bump(); // '{'
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.eat('}') {
                return Some(Value::Object(map));
            }
            let key = match self.peek()? {
                '"' | '\'' => self.string()?,
                c if is_ident_char(c) => self.ident().to_string(),
                _ => return None,
            };
            self.skip_ws();
            if !self.eat(':') {
                return None;
            }
            let value = self.value(depth + 1)?;
            map.insert(key, value);
            self.skip_ws();
            if !self.eat(',') {
                self.skip_ws();
                return self.eat('}').then_some(Value::Object(map));
            }
        }
    }

    fn sequence(&mut self, depth: usize, close: char) -> Option<Value> {
        self.bump(); // '[' or '('
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(close) {
                return Some(Value::Array(items));
            }
            items.push(self.value(depth + 1)?);
            self.skip_ws();
            if !self.eat(',') {
                self.skip_ws();
                return self.eat(close).then_some(Value::Array(items));
            }
        }
    }

    fn string(&mut self) -> Option<String> {
        let quote = self.bump()?;
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == quote => return Some(out),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'b' => out.push('\u{8}'),
                    'f' => out.push('\u{c}'),
                    '0' => out.push('\0'),
                    'u' => out.push(self.hex_escape(4)?),
                    'x' => out.push(self.hex_escape(2)?),
                    // \\, \', \", \/ and any unknown escape keep the character
                    other => out.push(other),
                },
                c => out.push(c),
            }
        }
    }

    fn hex_escape(&mut self, digits: usize) -> Option<char> {
        let hex = self.src.get(self.pos..self.pos + digits)?;
        let code = u32::from_str_radix(hex, 16).ok()?;
        self.pos += digits;
        // Lone surrogates can't be represented; substitute rather than fail.
        Some(char::from_u32(code).unwrap_or('\u{fffd}'))
    }

    fn number(&mut self) -> Option<Value> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_'))
        {
            self.bump();
        }
        let literal: String = self.src[start..self.pos].chars().filter(|&c| c != '_').collect();
        let literal = literal.strip_prefix('+').unwrap_or(&literal);
        if let Ok(int) = literal.parse::<i64>() {
            return Some(Value::from(int));
        }
        let float = literal.parse::<f64>().ok()?;
        Number::from_f64(float).map(Value::Number)
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn keyword(&mut self) -> Option<Value> {
        match self.ident() {
            "true" | "True" => Some(Value::Bool(true)),
            "false" | "False" => Some(Value::Bool(false)),
            "null" | "None" => Some(Value::Null),
            _ => None,
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_python_style_list_of_dicts() {
        let text = "[{'platform': 'Twitter', 'content': 'It\\'s fast', 'char_count': 10,}]";
        let value = parse_loose(text).unwrap();
        assert_eq!(
            value,
            json!([{"platform": "Twitter", "content": "It's fast", "char_count": 10}])
        );
    }

    #[test]
    fn test_bare_keys_and_python_keywords() {
        let value = parse_loose("{platform: \"LinkedIn\", draft: True, error: None}").unwrap();
        assert_eq!(value, json!({"platform": "LinkedIn", "draft": true, "error": null}));
    }

    #[test]
    fn test_tuple_becomes_array() {
        assert_eq!(parse_loose("('a', 'b',)").unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn test_strict_json_still_parses() {
        let text = r#"{"platform": "Instagram", "content": "Line\nbreak é", "n": -1.5}"#;
        assert_eq!(
            parse_loose(text).unwrap(),
            json!({"platform": "Instagram", "content": "Line\nbreak é", "n": -1.5})
        );
    }

    #[test]
    fn test_rejects_prose_and_trailing_text() {
        assert!(parse_loose("Here is your post").is_none());
        assert!(parse_loose("{'a': 1} and more").is_none());
        assert!(parse_loose("{'a': 1").is_none());
        assert!(parse_loose("").is_none());
    }

    #[test]
    fn test_deep_nesting_rejected() {
        let text = "[".repeat(MAX_DEPTH + 10);
        assert!(parse_loose(&text).is_none());
    }
}
