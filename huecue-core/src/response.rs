//! Tolerant extraction of clue and guess payloads from free model output
//!
//! Models are asked to answer with a small JSON object but routinely wrap it
//! in prose or code fences. Nothing here fails: every unusable shape comes
//! back as `None` fields.

use serde_json::Value;

use crate::board::{parse_coordinate, Coordinate};

/// Fields read from a clue-giver reply
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClueResponse {
    pub clue: Option<String>,
    pub reasoning: Option<String>,
}

/// Fields read from a guesser reply
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuessResponse {
    pub guess: Option<Coordinate>,
    pub reasoning: Option<String>,
}

/// First balanced `{...}` fragment in the text
///
/// Braces inside JSON string literals do not count towards the balance.
pub fn find_json_fragment(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Decode the first JSON object embedded in the text
fn decode_fragment(text: &str) -> Option<serde_json::Map<String, Value>> {
    let fragment = find_json_fragment(text)?;
    match serde_json::from_str::<Value>(fragment) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Reasoning passed through as text
///
/// Strings are kept verbatim and other values in their JSON form. Null,
/// `false`, zero, and the empty string count as absent.
fn reasoning_field(map: &serde_json::Map<String, Value>) -> Option<String> {
    match map.get("reasoning")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Reduce a clue to a single alphabetic word
///
/// Keeps the first whitespace-separated token and strips everything that is
/// not an ASCII letter. `"  deep-sea blue"` becomes `"deepsea"`.
pub fn normalize_clue(raw: &str) -> Option<String> {
    let first = raw.split_whitespace().next()?;
    let word: String = first.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    (!word.is_empty()).then_some(word)
}

/// Normalize a guess token to a board coordinate
///
/// Uppercases and removes all whitespace, then requires exactly one row
/// letter followed by a column number in 1..=24.
pub fn normalize_guess(raw: &str) -> Option<Coordinate> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    parse_coordinate(&compact.to_uppercase())
}

/// Extract the clue word and reasoning from a clue-giver reply
pub fn parse_clue_response(text: &str) -> ClueResponse {
    let Some(map) = decode_fragment(text) else {
        return ClueResponse::default();
    };

    let clue = match map.get("clue") {
        Some(Value::String(raw)) => normalize_clue(raw),
        _ => None,
    };

    ClueResponse {
        clue,
        reasoning: reasoning_field(&map),
    }
}

/// Extract the guessed coordinate and reasoning from a guesser reply
///
/// Reasoning is only kept alongside a usable coordinate.
pub fn parse_guess_response(text: &str) -> GuessResponse {
    let Some(map) = decode_fragment(text) else {
        return GuessResponse::default();
    };

    let guess = match map.get("guess") {
        Some(Value::String(raw)) => normalize_guess(raw),
        _ => None,
    };

    match guess {
        Some(coordinate) => GuessResponse {
            guess: Some(coordinate),
            reasoning: reasoning_field(&map),
        },
        None => GuessResponse::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_json_fragment() {
        assert_eq!(find_json_fragment("no json here"), None);
        assert_eq!(find_json_fragment("x {\"a\": 1} y"), Some("{\"a\": 1}"));
        assert_eq!(
            find_json_fragment("{\"a\": {\"b\": 2}} trailing {\"c\": 3}"),
            Some("{\"a\": {\"b\": 2}}")
        );
        assert_eq!(
            find_json_fragment(r#"{"reasoning": "a } in text", "clue": "x"}"#),
            Some(r#"{"reasoning": "a } in text", "clue": "x"}"#)
        );
        assert_eq!(find_json_fragment("{ unclosed"), None);
    }

    #[test]
    fn test_parse_clue_plain() {
        let parsed = parse_clue_response(r#"{"clue": "Lagoon", "reasoning": "tropical water"}"#);
        assert_eq!(parsed.clue.as_deref(), Some("Lagoon"));
        assert_eq!(parsed.reasoning.as_deref(), Some("tropical water"));
    }

    #[test]
    fn test_parse_clue_wrapped_and_noisy() {
        let text = "Sure! Here you go:\n```json\n{\"clue\": \"  sea-foam green \"}\n```";
        let parsed = parse_clue_response(text);
        assert_eq!(parsed.clue.as_deref(), Some("seafoam"));
        assert_eq!(parsed.reasoning, None);
    }

    #[test]
    fn test_parse_clue_failures() {
        assert_eq!(parse_clue_response("Teal"), ClueResponse::default());
        assert_eq!(parse_clue_response("{clue: Teal}"), ClueResponse::default());
        assert_eq!(parse_clue_response(r#"{"clue": "123 !!"}"#).clue, None);
        assert_eq!(parse_clue_response(r#"{"clue": 42}"#).clue, None);
        assert_eq!(parse_clue_response(r#"{"clue": ""}"#).clue, None);

        let reasoning_only = parse_clue_response(r#"{"clue": "   ", "reasoning": "hm"}"#);
        assert_eq!(reasoning_only.clue, None);
        assert_eq!(reasoning_only.reasoning.as_deref(), Some("hm"));
    }

    #[test]
    fn test_reasoning_passes_through_non_strings() {
        let numeric = parse_clue_response(r#"{"clue": "Teal", "reasoning": 5}"#);
        assert_eq!(numeric.clue.as_deref(), Some("Teal"));
        assert_eq!(numeric.reasoning.as_deref(), Some("5"));

        let listed = parse_clue_response(r#"{"clue": "Teal", "reasoning": ["sea", "glass"]}"#);
        assert_eq!(listed.reasoning.as_deref(), Some(r#"["sea","glass"]"#));

        let flagged = parse_guess_response(r#"{"guess": "K12", "reasoning": true}"#);
        assert_eq!(flagged.reasoning.as_deref(), Some("true"));

        for absent in ["null", "false", "0", "\"\""] {
            let text = format!(r#"{{"clue": "Teal", "reasoning": {absent}}}"#);
            assert_eq!(parse_clue_response(&text).reasoning, None, "{absent}");
        }
    }

    #[test]
    fn test_parse_guess_valid() {
        let parsed = parse_guess_response(r#"I think {"guess": "k 12", "reasoning": "teal"}"#);
        assert_eq!(parsed.guess.map(|c| c.to_string()).as_deref(), Some("K12"));
        assert_eq!(parsed.reasoning.as_deref(), Some("teal"));

        let leading_zero = parse_guess_response(r#"{"guess": "b07"}"#);
        assert_eq!(leading_zero.guess.map(|c| c.to_string()).as_deref(), Some("B7"));
    }

    #[test]
    fn test_parse_guess_rejects_bad_shapes() {
        for guess in ["K25", "K0", "U3", "K12!", "row K col 12", "12K", ""] {
            let text = format!(r#"{{"guess": "{guess}", "reasoning": "why"}}"#);
            assert_eq!(parse_guess_response(&text), GuessResponse::default(), "{guess:?}");
        }
        assert_eq!(parse_guess_response("K12"), GuessResponse::default());
        assert_eq!(parse_guess_response(r#"{"guess": 12}"#), GuessResponse::default());
    }

    #[test]
    fn test_normalize_helpers() {
        assert_eq!(normalize_clue("Ocean breeze"), Some("Ocean".to_string()));
        assert_eq!(normalize_clue("   "), None);
        assert_eq!(normalize_guess(" t 2 4 ").map(|c| c.to_string()).as_deref(), Some("T24"));
        assert_eq!(normalize_guess("T2 5"), None);
    }
}
