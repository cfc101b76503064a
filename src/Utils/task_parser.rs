/// parse task documents with structure like " title1 key1: value1, value2 key2: value3 title2 key3: value4"
/// (sections with a title and key - list of values pairs) into
/// HashMap<String, HashMap<String, Vec<Value>>>. The same map can be read from a TOML file
/// where every top-level table is a section.
///
/// Example of a task document:
/// ```text
/// // comment lines start with //, #, % or ;
/// problem
///   name: Bernoulli
/// initial_conditions
///   x0: 0.0  y0: 3.0  x_end: 5.5
/// grid
///   n_steps: 50
/// ```
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, multispace1, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, terminated},
};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

pub type SectionMap = HashMap<String, Vec<Value>>;
pub type TaskDocument = HashMap<String, SectionMap>;

/// typed value of a task entry
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    fn from_token(s: &str) -> Value {
        if let Ok(val) = s.parse::<i64>() {
            Value::Integer(val)
        } else if let Ok(val) = s.parse::<f64>() {
            Value::Float(val)
        } else if let Ok(val) = s.parse::<bool>() {
            Value::Boolean(val)
        } else {
            Value::String(s.to_string())
        }
    }

    /// floats and integers both read as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// word starting with a letter or underscore: used for both titles and keys
fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

fn parse_value(input: &str) -> IResult<&str, Value> {
    let token = take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r'));
    map(token, Value::from_token).parse(input)
}

fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let separator = delimited(space0, tag(","), space0);
    separated_list0(separator, parse_value).parse(input)
}

/// key: value1, value2
fn parse_key_values(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let (input, key) = parse_identifier(input)?;
    let (input, _) = delimited(space0, tag(":"), space0).parse(input)?;
    let (input, values) = parse_value_list(input)?;
    Ok((input, (key, values)))
}

/// title followed by one or more key-values pairs; ends where an identifier is not followed by ':'
fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, title) = parse_identifier(input)?;
    let (input, _) = multispace1(input)?;
    let (input, pairs) = many1(terminated(parse_key_values, multispace0)).parse(input)?;
    Ok((input, (title, pairs.into_iter().collect())))
}

/// drops comment lines (starting with //, #, % or ;) and blank lines
fn strip_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !(trimmed.is_empty()
                || trimmed.starts_with("//")
                || trimmed.starts_with('#')
                || trimmed.starts_with('%')
                || trimmed.starts_with(';'))
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the whole document. Sections with the same title are merged, later keys win.
pub fn parse_task_document(input: &str) -> Result<TaskDocument, String> {
    let cleaned = strip_comments(input);
    let mut parser = many1(delimited(multispace0, parse_section, multispace0));
    let (remaining, sections) = parser
        .parse(cleaned.as_str())
        .map_err(|e| format!("Parsing error: {:?}", e))?;
    if !remaining.trim().is_empty() {
        return Err(format!(
            "Failed to parse entire document. Remaining: '{}'",
            remaining
        ));
    }
    let mut document = TaskDocument::new();
    for (title, section) in sections {
        document.entry(title).or_default().extend(section);
    }
    Ok(document)
}

fn toml_to_values(value: &toml::Value) -> Result<Vec<Value>, String> {
    match value {
        toml::Value::String(s) => Ok(vec![Value::String(s.clone())]),
        toml::Value::Integer(i) => Ok(vec![Value::Integer(*i)]),
        toml::Value::Float(f) => Ok(vec![Value::Float(*f)]),
        toml::Value::Boolean(b) => Ok(vec![Value::Boolean(*b)]),
        toml::Value::Datetime(d) => Ok(vec![Value::String(d.to_string())]),
        toml::Value::Array(items) => {
            let mut values = Vec::new();
            for item in items {
                values.extend(toml_to_values(item)?);
            }
            Ok(values)
        }
        toml::Value::Table(_) => Err("nested tables are not supported inside a section".to_string()),
    }
}

/// TOML flavour of the task document: top-level tables are sections
pub fn parse_toml_document(input: &str) -> Result<TaskDocument, String> {
    let table = input
        .parse::<toml::Table>()
        .map_err(|e| format!("TOML parsing error: {}", e))?;
    let mut document = TaskDocument::new();
    for (title, section) in table.iter() {
        let toml::Value::Table(entries) = section else {
            return Err(format!("top-level key '{}' must be a [section] table", title));
        };
        let mut section_map = SectionMap::new();
        for (key, value) in entries.iter() {
            section_map.insert(key.clone(), toml_to_values(value)?);
        }
        document.insert(title.clone(), section_map);
    }
    Ok(document)
}

/// reads a task file; `.toml` files go through the TOML parser, everything else through the section parser
pub fn parse_task_file(path: &Path) -> Result<TaskDocument, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("cannot read task file {}: {}", path.display(), e))?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_toml_document(&content),
        _ => parse_task_document(&content),
    }
}
