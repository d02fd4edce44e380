//! Custom query rules.
//!
//! Responsibilities:
//! - Define `QueryRule` and the ordered `RuleSet` that filters requests.
//! - Match requests against rule conditions (client address, user, query text,
//!   plan type, table name).
//! - (De)serialize rule sets from the JSON rule file format.
//!
//! Does NOT handle:
//! - Reading rule files from disk (see `loader::rules`).
//! - Executing or rewriting queries.
//!
//! Invariants:
//! - Patterns are anchored: they must match the whole input.
//! - A pattern is never empty; an empty condition in a rule file means unset.
//! - A rule only stores a rejecting `Action`; `Decision::Continue` is the
//!   outcome when no rule matches.
//! - An empty `RuleSet` permits every request.
//! - Serialization writes pattern sources, so a round trip preserves matching.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// What a matching rule does to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Action {
    /// Reject the request.
    #[default]
    #[serde(rename = "FAIL")]
    Fail,
    /// Reject the request and tell the client it may retry.
    #[serde(rename = "FAIL_RETRY")]
    FailRetry,
}

/// The outcome of evaluating a request against a `RuleSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// No rule matched; the request proceeds.
    Continue,
    Fail,
    FailRetry,
}

impl From<Action> for Decision {
    fn from(action: Action) -> Self {
        match action {
            Action::Fail => Decision::Fail,
            Action::FailRetry => Decision::FailRetry,
        }
    }
}

/// Errors building a `Pattern`.
#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Pattern must not be empty")]
    Empty,

    #[error("Invalid pattern: {0}")]
    Invalid(#[from] regex::Error),
}

/// An anchored regular expression that remembers its source.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile `source` so it only matches complete inputs.
    ///
    /// `source` is compiled on its own first, so a fragment that would close
    /// the anchoring group early is rejected.
    pub fn new(source: &str) -> Result<Self, PatternError> {
        if source.is_empty() {
            return Err(PatternError::Empty);
        }
        Regex::new(source)?;
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern as written in the rule file.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.source)
    }
}

/// Deserializes an optional pattern; an empty string means "unset".
fn optional_pattern<'de, D>(deserializer: D) -> Result<Option<Pattern>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(source) if !source.is_empty() => Pattern::new(&source)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// The attributes of a request that rules are evaluated against.
#[derive(Debug, Clone, Copy, Default)]
pub struct Request<'a> {
    /// Client address.
    pub ip: &'a str,
    pub user: &'a str,
    pub query: &'a str,
    /// Plan type chosen for the query (e.g. `PASS_SELECT`).
    pub plan: &'a str,
    /// Main table the query touches.
    pub table: &'a str,
}

/// A single filtering rule.
///
/// Every condition that is set must match for the rule to apply; unset
/// conditions match anything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryRule {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(
        rename = "RequestIP",
        default,
        deserialize_with = "optional_pattern",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_ip: Option<Pattern>,
    #[serde(
        default,
        deserialize_with = "optional_pattern",
        skip_serializing_if = "Option::is_none"
    )]
    pub user: Option<Pattern>,
    #[serde(
        default,
        deserialize_with = "optional_pattern",
        skip_serializing_if = "Option::is_none"
    )]
    pub query: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plans: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub table_names: Vec<String>,
    #[serde(default)]
    pub action: Action,
}

impl QueryRule {
    /// A rule named `name` that fails every request until conditions are added.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_request_ip(mut self, pattern: Pattern) -> Self {
        self.request_ip = Some(pattern);
        self
    }

    pub fn with_user(mut self, pattern: Pattern) -> Self {
        self.user = Some(pattern);
        self
    }

    pub fn with_query(mut self, pattern: Pattern) -> Self {
        self.query = Some(pattern);
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plans.push(plan.into());
        self
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table_names.push(table.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Returns true if every condition of this rule matches `request`.
    pub fn matches(&self, request: &Request<'_>) -> bool {
        let pattern_ok = |pattern: &Option<Pattern>, input: &str| {
            pattern.as_ref().is_none_or(|p| p.is_match(input))
        };
        let listed =
            |list: &[String], item: &str| list.is_empty() || list.iter().any(|x| x == item);

        pattern_ok(&self.request_ip, request.ip)
            && pattern_ok(&self.user, request.user)
            && pattern_ok(&self.query, request.query)
            && listed(self.plans.as_slice(), request.plan)
            && listed(self.table_names.as_slice(), request.table)
    }
}

/// An ordered collection of query rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<QueryRule>,
}

impl RuleSet {
    /// An empty rule set, which permits everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QueryRule> {
        self.rules.iter()
    }

    /// Append a rule; it is evaluated after all existing rules.
    pub fn push(&mut self, rule: QueryRule) {
        self.rules.push(rule);
    }

    /// The first rule named `name`.
    pub fn find(&self, name: &str) -> Option<&QueryRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Remove and return the first rule named `name`.
    pub fn delete(&mut self, name: &str) -> Option<QueryRule> {
        let index = self.rules.iter().position(|rule| rule.name == name)?;
        Some(self.rules.remove(index))
    }

    /// The first rule matching `request`.
    pub fn matching_rule(&self, request: &Request<'_>) -> Option<&QueryRule> {
        self.rules.iter().find(|rule| rule.matches(request))
    }

    /// The action of the first matching rule, or `Decision::Continue`.
    pub fn action_for(&self, request: &Request<'_>) -> Decision {
        self.matching_rule(request)
            .map_or(Decision::Continue, |rule| rule.action.into())
    }

    /// Returns true if no rule rejects `request`.
    pub fn permits(&self, request: &Request<'_>) -> bool {
        self.action_for(request) == Decision::Continue
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a QueryRule;
    type IntoIter = std::slice::Iter<'a, QueryRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl FromIterator<QueryRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = QueryRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
