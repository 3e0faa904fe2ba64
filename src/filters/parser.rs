//! Filter query parser for conversation filtering.
//!
//! Parses user-provided filter expressions into an AST ([`FilterExpr`]) for evaluation.
//! Values are validated and converted to typed [`FilterValue`]s at parse time.
//!
//! # Syntax
//!
//! ```text
//! filter_expr := field_filter (operator? field_filter)*
//! field_filter := field_name:value | field_name:"quoted value"
//! operator := AND | OR (case-insensitive)
//! field_name := project | model | title | text | since | archived (case-insensitive)
//! ```
//!
//! Without an explicit operator, filters on the same field are OR'd and filters on
//! different fields are AND'd.
//!
//! # Examples
//!
//! ```rust
//! # use chat_archive_explorer::filters::parser::parse_filter;
//! // Conversations in a project whose id or name contains "mars"
//! let expr = parse_filter("project:mars").unwrap();
//!
//! // Either model, created in 2024 or later
//! let expr = parse_filter("model:gpt-4o model:o1 since:2024-01-01").unwrap();
//!
//! // Quoted values for spaces
//! let expr = parse_filter("title:\"launch plan\" OR text:budget").unwrap();
//! ```

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;

use super::ast::{FieldFilter, FilterExpr, FilterField, FilterOperator, FilterValue};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    FieldValue { field: String, value: String },
    And,
    Or,
}

/// Split the input into field:value pairs and operator keywords
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = input.trim_start();

    while !rest.is_empty() {
        let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let word = &rest[..word_end];

        if word.eq_ignore_ascii_case("AND") {
            tokens.push(Token::And);
            rest = rest[word_end..].trim_start();
            continue;
        }
        if word.eq_ignore_ascii_case("OR") {
            tokens.push(Token::Or);
            rest = rest[word_end..].trim_start();
            continue;
        }

        let Some((field, after_colon)) = rest.split_once(':').filter(|(f, _)| f.len() < word_end)
        else {
            bail!("Invalid token: '{}' (expected field:value or AND/OR)", word);
        };

        let (value, remainder) = if let Some(quoted) = after_colon.strip_prefix('"') {
            let close = quoted.find('"').ok_or_else(|| anyhow!("Unterminated quoted string"))?;
            (&quoted[..close], &quoted[close + 1..])
        } else {
            let end = after_colon.find(char::is_whitespace).unwrap_or(after_colon.len());
            (&after_colon[..end], &after_colon[end..])
        };

        if field.is_empty() || value.is_empty() {
            bail!("Invalid field:value format: {}", word);
        }

        tokens.push(Token::FieldValue { field: field.to_string(), value: value.to_string() });
        rest = remainder.trim_start();
    }

    Ok(tokens)
}

fn parse_field_filter(field: &str, value: &str) -> Result<FieldFilter> {
    let field = FilterField::from_name(field).ok_or_else(|| {
        let valid: Vec<&str> = FilterField::ALL.iter().map(FilterField::name).collect();
        anyhow!("Unknown field: '{}' (valid fields: {})", field, valid.join(", "))
    })?;

    let value = match field {
        FilterField::Since => FilterValue::Date(parse_date(value)?),
        FilterField::Archived => match value.to_ascii_lowercase().as_str() {
            "true" => FilterValue::Flag(true),
            "false" => FilterValue::Flag(false),
            _ => bail!("Invalid archived value: '{}' (must be 'true' or 'false')", value),
        },
        FilterField::Project | FilterField::Model | FilterField::Title | FilterField::Text => {
            FilterValue::Needle(value.to_lowercase())
        }
    };

    Ok(FieldFilter { field, value })
}

/// Strict YYYY-MM-DD, rejecting impossible dates such as 2024-02-31
fn parse_date(value: &str) -> Result<NaiveDate> {
    if value.len() != 10 {
        bail!("Invalid date format: '{}' (expected YYYY-MM-DD)", value);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date format: '{}' (expected YYYY-MM-DD)", value))
}

/// Parse a filter string into a [`FilterExpr`]; blank input yields an empty expression
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    let tokens = tokenize(input).context("Failed to tokenize filter")?;

    let mut expr = FilterExpr::new();
    let mut pending_operator: Option<FilterOperator> = None;

    for token in tokens {
        match token {
            Token::FieldValue { field, value } => {
                let filter = parse_field_filter(&field, &value)?;

                if let Some(previous) = expr.filters.last() {
                    let operator = pending_operator.take().unwrap_or(if previous.field == filter.field {
                        FilterOperator::Or
                    } else {
                        FilterOperator::And
                    });
                    expr.operators.push(operator);
                }
                expr.filters.push(filter);
            }
            Token::And | Token::Or => {
                if expr.filters.is_empty() || pending_operator.is_some() {
                    bail!("Unexpected operator (expected field:value)");
                }
                pending_operator =
                    Some(if token == Token::And { FilterOperator::And } else { FilterOperator::Or });
            }
        }
    }

    if pending_operator.is_some() {
        bail!("Filter ended with operator (expected field:value)");
    }

    Ok(expr)
}
