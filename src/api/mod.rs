pub mod check;

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::check::Suggestion;

pub use check::LanguageToolClient;

/// Form body for `POST /v2/check`.
#[derive(Serialize, Debug, Clone)]
pub struct CheckRequest<'a> {
    pub text: &'a str,
    pub language: &'a str,
}

/// One entry of the response's `matches` list. Only `message` matters for
/// display; the rest is carried through for the `check --json` output.
/// Every field may be absent or `null`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub short_message: Option<String>,
    #[serde(default)]
    pub replacements: Option<Vec<Replacement>>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default)]
    pub rule: Option<MatchRule>,
}

#[derive(Deserialize, Debug)]
pub struct Replacement {
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MatchRule {
    pub id: Option<String>,
    pub description: Option<String>,
}

impl From<Match> for Suggestion {
    fn from(m: Match) -> Self {
        Suggestion {
            message: m.message.unwrap_or_default(),
            replacements: m
                .replacements
                .unwrap_or_default()
                .into_iter()
                .filter_map(|r| r.value)
                .collect(),
            short_message: m.short_message.filter(|s| !s.is_empty()),
            offset: m.offset,
            length: m.length,
            rule_id: m.rule.and_then(|rule| rule.id),
        }
    }
}

/// Parse a response body into suggestions. Invalid JSON and a bare `null`
/// body are errors; any other JSON without a `matches` field is an empty list.
pub fn parse_check_response(body: &str) -> Result<Vec<Suggestion>, serde_json::Error> {
    let value: Value = serde_json::from_str(body)?;
    if value.is_null() {
        return Err(serde_json::Error::custom("response body is null"));
    }
    let matches = match value.get("matches") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(matches) => Vec::<Match>::deserialize(matches)?,
    };
    Ok(matches.into_iter().map(Suggestion::from).collect())
}

#[cfg(test)]
mod tests;
