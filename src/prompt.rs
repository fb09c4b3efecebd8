use std::collections::{BTreeSet, HashMap};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Variable(String),
}

/// A prompt with `{name}` placeholders. `{{` and `}}` produce literal braces.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
    input_variables: Vec<String>,
}

impl PromptTemplate {
    /// Parses `template` and checks that its placeholders are exactly
    /// `input_variables`.
    pub fn new(template: &str, input_variables: &[&str]) -> Result<Self> {
        let segments = parse(template)?;

        let found: BTreeSet<&str> = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Variable(name) => Some(name.as_str()),
                Segment::Text(_) => None,
            })
            .collect();
        let declared: BTreeSet<&str> = input_variables.iter().copied().collect();
        if found != declared {
            return Err(AppError::ConfigError(format!(
                "template placeholders {found:?} do not match input variables {declared:?}"
            )));
        }

        Ok(Self {
            segments,
            input_variables: input_variables.iter().map(|v| v.to_string()).collect(),
        })
    }

    pub fn input_variables(&self) -> &[String] {
        &self.input_variables
    }

    pub fn format(&self, variables: &HashMap<&str, String>) -> Result<String> {
        let mut result = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => result.push_str(text),
                Segment::Variable(name) => {
                    let value = variables.get(name.as_str()).ok_or_else(|| {
                        AppError::ConfigError(format!("missing template variable {name:?}"))
                    })?;
                    result.push_str(value);
                }
            }
        }
        Ok(result)
    }
}

fn parse(template: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                text.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                text.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => {
                            return Err(AppError::ConfigError(
                                "unclosed '{' in prompt template".to_string(),
                            ));
                        }
                    }
                }
                let name = name.trim();
                if name.is_empty() || name.contains('{') {
                    return Err(AppError::ConfigError(format!(
                        "invalid placeholder {{{name}}} in prompt template"
                    )));
                }
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Variable(name.to_string()));
            }
            '}' => {
                return Err(AppError::ConfigError(
                    "single '}' in prompt template".to_string(),
                ));
            }
            other => text.push(other),
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_placeholders() {
        let template =
            PromptTemplate::new("Hello {name}, meet {other}.", &["name", "other"]).unwrap();
        let vars = HashMap::from([("name", "Eden".to_string()), ("other", "Ada".to_string())]);
        assert_eq!(template.format(&vars).unwrap(), "Hello Eden, meet Ada.");
    }

    #[test]
    fn repeated_placeholder_is_filled_everywhere() {
        let template = PromptTemplate::new("{x}-{x}", &["x"]).unwrap();
        let vars = HashMap::from([("x", "1".to_string())]);
        assert_eq!(template.format(&vars).unwrap(), "1-1");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let template = PromptTemplate::new("{{\"person\": {info}}}", &["info"]).unwrap();
        let vars = HashMap::from([("info", "1".to_string())]);
        assert_eq!(template.format(&vars).unwrap(), "{\"person\": 1}");
    }

    #[test]
    fn substituted_values_are_not_reparsed() {
        let template = PromptTemplate::new("data: {info}", &["info"]).unwrap();
        let vars = HashMap::from([("info", "{\"name\": \"{x}\"}".to_string())]);
        assert_eq!(template.format(&vars).unwrap(), "data: {\"name\": \"{x}\"}");
    }

    #[test]
    fn undeclared_placeholder_is_rejected() {
        let err = PromptTemplate::new("{a} {b}", &["a"]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn unused_input_variable_is_rejected() {
        assert!(PromptTemplate::new("no placeholders", &["a"]).is_err());
    }

    #[test]
    fn unbalanced_braces_are_rejected() {
        assert!(PromptTemplate::new("{open", &[]).is_err());
        assert!(PromptTemplate::new("close}", &[]).is_err());
        assert!(PromptTemplate::new("{}", &[]).is_err());
    }

    #[test]
    fn missing_variable_fails_format() {
        let template = PromptTemplate::new("{a}", &["a"]).unwrap();
        let err = template.format(&HashMap::new()).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(ref msg) if msg.contains("\"a\"")));
    }
}
