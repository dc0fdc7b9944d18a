//! # SQL Extraction and Validation
//!
//! Models rarely return a bare statement. This module pulls the SQL out of a
//! completion (fenced block first, then the first line that starts with a SQL
//! keyword) and rejects anything that is not a single read-only query.

use crate::errors::AgentError;
use regex::Regex;

/// Keywords that may open a statement in a completion.
const STATEMENT_KEYWORDS: &[&str] = &[
    "SELECT", "WITH", "INSERT", "UPDATE", "DELETE", "REPLACE", "CREATE", "DROP", "ALTER",
    "PRAGMA",
];

/// Keywords that make a statement write to or restructure the database.
const FORBIDDEN_KEYWORDS: &[&str] = &[
    "INSERT", "UPDATE", "DELETE", "DROP", "ALTER", "CREATE", "TRUNCATE", "ATTACH", "DETACH",
    "PRAGMA", "VACUUM", "REINDEX",
];

/// Statement openings accepted when the keyword is not written in upper case.
const LOWER_CASE_OPENING: &str = r"(?i)^(?:select\b|with\s+(?:recursive\s+)?\w+\s*(?:\([^)]*\)\s*)?as\s*\(|(?:insert|replace)\s+into\b|update\s+\w+\s+set\b|delete\s+from\b|(?:create|drop|alter)\s+(?:table|view|index|trigger)\b|pragma\s+\w)";

/// Labels a model may put in front of the statement on the same line.
const LABELS: &[&str] = &["sql query:", "sqlquery:", "sql:", "query:"];

/// The SQL statement found in a completion, plus whatever prose surrounded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSql {
    pub sql: String,
    pub narrative: Option<String>,
}

/// Extracts a single SQL statement from a model completion.
///
/// The first fenced code block wins when it contains a statement. Otherwise the
/// first line that starts with a SQL keyword (optionally after a `SQL:` or
/// `Query:` label) opens the statement, preferring upper-case keywords so that
/// prose such as "Select a product..." is not mistaken for SQL. A lower-case
/// opening is only accepted when it has the shape of a statement, e.g.
/// `with <name> as (` rather than "With the schema above".
///
/// The statement ends at the first `;` outside a string literal or at the end
/// of the text. Outside a fenced block a blank line ends it too.
pub fn extract_sql(response: &str) -> Result<ExtractedSql, AgentError> {
    let code_block_re = Regex::new(r"(?i)```[ \t]*(?:sqlite|sql|query)?[ \t]*\r?\n?([\s\S]*?)```")?;
    let opening_re = Regex::new(LOWER_CASE_OPENING)?;

    if let Some(caps) = code_block_re.captures(response) {
        if let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) {
            if let Some(found) = find_statement(body.as_str(), true, &opening_re) {
                let narrative =
                    join_narrative(&response[..whole.start()], &response[whole.end()..]);
                return Ok(ExtractedSql {
                    sql: found.sql,
                    narrative,
                });
            }
        }
    }

    match find_statement(response, false, &opening_re) {
        Some(found) => Ok(ExtractedSql {
            narrative: join_narrative(&response[..found.line_start], &response[found.end..]),
            sql: found.sql,
        }),
        None => Err(AgentError::NoSqlFound(preview(response))),
    }
}

/// Rejects anything other than a single read-only `SELECT`/`WITH` statement.
///
/// Keywords inside string literals, quoted identifiers and comments are ignored.
pub fn ensure_read_only(sql: &str) -> Result<(), AgentError> {
    let tokens = tokenize(sql);

    let mut words = tokens.iter().filter_map(|t| match t {
        Token::Word(w) => Some(w.as_str()),
        Token::Semicolon => None,
    });
    match words.next() {
        Some("SELECT") | Some("WITH") => {}
        Some(other) => {
            return Err(AgentError::ReadOnlyViolation(format!(
                "statement starts with {other}; only SELECT or WITH queries are allowed"
            )))
        }
        None => {
            return Err(AgentError::ReadOnlyViolation(
                "the statement is empty".to_string(),
            ))
        }
    }

    if let Some(pos) = tokens.iter().position(|t| *t == Token::Semicolon) {
        if tokens[pos..].iter().any(|t| matches!(t, Token::Word(_))) {
            return Err(AgentError::ReadOnlyViolation(
                "multiple statements are not allowed".to_string(),
            ));
        }
    }

    for (i, token) in tokens.iter().enumerate() {
        let Token::Word(word) = token else { continue };
        let replace_into = word == "REPLACE"
            && matches!(tokens.get(i + 1), Some(Token::Word(next)) if next == "INTO");
        if replace_into || FORBIDDEN_KEYWORDS.contains(&word.as_str()) {
            return Err(AgentError::ReadOnlyViolation(format!(
                "{word} is not allowed in a read-only query"
            )));
        }
    }

    Ok(())
}

struct FoundStatement {
    sql: String,
    /// Byte offset of the line the statement starts on.
    line_start: usize,
    /// Byte offset just past the statement and its terminator.
    end: usize,
}

fn find_statement(text: &str, fenced: bool, opening_re: &Regex) -> Option<FoundStatement> {
    find_statement_with(text, fenced, None)
        .or_else(|| find_statement_with(text, fenced, Some(opening_re)))
}

/// Scans line by line for an opening keyword. Without `lower_case_opening`
/// only upper-case keywords count; with it, any case counts as long as the
/// text matches the statement shape.
fn find_statement_with(
    text: &str,
    fenced: bool,
    lower_case_opening: Option<&Regex>,
) -> Option<FoundStatement> {
    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let mut start = line_start + indent;
        let rest = &text[start..];

        if let Some(label) = LABELS.iter().find(|l| starts_with_ignore_case(rest, l)) {
            let after = &rest[label.len()..];
            start += label.len() + (after.len() - after.trim_start().len());
        }

        let candidate = &text[start..];
        let opens = match lower_case_opening {
            None => starts_with_keyword(candidate),
            Some(re) => re.is_match(candidate) && !reads_as_prose(candidate),
        };
        if opens {
            let (stmt_end, consumed) = statement_bounds(candidate, !fenced);
            let sql = candidate[..stmt_end].trim().to_string();
            if !sql.is_empty() {
                return Some(FoundStatement {
                    sql,
                    line_start,
                    end: start + consumed,
                });
            }
        }
        line_start += line.len();
    }
    None
}

/// A first line ending like a sentence ("Select the table you need:") is prose.
fn reads_as_prose(text: &str) -> bool {
    let first_line = text.lines().next().unwrap_or_default().trim_end();
    first_line.ends_with(':') || first_line.ends_with('.')
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn starts_with_keyword(text: &str) -> bool {
    STATEMENT_KEYWORDS.iter().any(|kw| {
        text.starts_with(kw)
            && text[kw.len()..]
                .chars()
                .next()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
    })
}

/// Returns `(statement_end, consumed_end)` as byte offsets into `text`.
fn statement_bounds(text: &str, stop_at_blank_line: bool) -> (usize, usize) {
    let mut quote: Option<char> = None;
    let mut last_newline: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            ';' => return (i, i + 1),
            '\n' if stop_at_blank_line => {
                if let Some(prev) = last_newline {
                    if text[prev + 1..i].trim().is_empty() {
                        return (prev, i + 1);
                    }
                }
                last_newline = Some(i);
            }
            _ => {}
        }
    }
    (text.len(), text.len())
}

fn join_narrative(before: &str, after: &str) -> Option<String> {
    let parts: Vec<&str> = [before.trim(), after.trim()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n\n"))
    }
}

fn preview(response: &str) -> String {
    let trimmed = response.trim();
    match trimmed.char_indices().nth(200) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Semicolon,
}

/// Splits SQL into upper-cased words and semicolons, skipping literals and comments.
fn tokenize(sql: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = sql.chars().peekable();
    let mut word = String::new();

    let flush = |word: &mut String, tokens: &mut Vec<Token>| {
        if !word.is_empty() {
            tokens.push(Token::Word(word.to_ascii_uppercase()));
            word.clear();
        }
    };

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' | '`' | '[' => {
                flush(&mut word, &mut tokens);
                let close = if c == '[' { ']' } else { c };
                for inner in chars.by_ref() {
                    if inner == close {
                        break;
                    }
                }
            }
            '-' if chars.peek() == Some(&'-') => {
                flush(&mut word, &mut tokens);
                for inner in chars.by_ref() {
                    if inner == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                flush(&mut word, &mut tokens);
                chars.next();
                let mut prev = ' ';
                for inner in chars.by_ref() {
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    prev = inner;
                }
            }
            ';' => {
                flush(&mut word, &mut tokens);
                tokens.push(Token::Semicolon);
            }
            c if c.is_alphanumeric() || c == '_' => word.push(c),
            _ => flush(&mut word, &mut tokens),
        }
    }
    flush(&mut word, &mut tokens);
    tokens
}
