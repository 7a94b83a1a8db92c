//! Option bags and the query/token builder.
//!
//! Callers describe a request with an [`Options`] value. Before it goes on
//! the wire the builder copies it, injects the token for the call's access
//! intent and the command name, and renders it either as a query string
//! (read service) or as a JSON-RPC parameter object (write service).

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use url::form_urlencoded::byte_serialize;

use crate::auth::{AccessIntent, Credentials};
use crate::errors::EncosionResult;

/// Reserved key holding the API token.
pub const TOKEN_KEY: &str = "token";

/// Reserved key holding the command name on read calls.
pub const COMMAND_KEY: &str = "command";

/// Ordered mapping from parameter name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: Vec<(String, Value)>,
}

impl Options {
    /// Creates an empty option bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, returning the bag.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a parameter. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value for a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Renders the bag as `key=value` pairs joined by `&`, in insertion
    /// order, with keys and values form-urlencoded.
    pub fn to_query_string(&self) -> String {
        self.entries
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    encode(key),
                    encode(&query_value(value))
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

impl Serialize for Options {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn encode(input: &str) -> String {
    byte_serialize(input.as_bytes()).collect()
}

/// Flattens a JSON value into its query-string form.
fn query_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(query_value).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Produces a copy of `options` carrying the token for `intent`.
///
/// Fails with `MissingToken` before anything is sent when the credential
/// set has no token for the intent. The caller's bag is never modified; a
/// caller-supplied `token` entry is overwritten.
pub fn with_token(
    options: &Options,
    intent: AccessIntent,
    credentials: &Credentials,
) -> EncosionResult<Options> {
    let token = credentials.token_for(intent)?;
    let mut prepared = options.clone();
    prepared.insert(TOKEN_KEY, token);
    Ok(prepared)
}

/// Builds the query string for a read command: the caller's options, then
/// the token, then the command name.
pub fn build_read_query(
    command: &str,
    options: &Options,
    credentials: &Credentials,
) -> EncosionResult<String> {
    let mut prepared = with_token(options, AccessIntent::Read, credentials)?;
    prepared.insert(COMMAND_KEY, command);
    Ok(prepared.to_query_string())
}

/// Builds the JSON-RPC payload for a write command:
/// `{"method": <command>, "params": {...options, "token": ...}}`.
pub fn build_write_payload(
    command: &str,
    options: &Options,
    credentials: &Credentials,
) -> EncosionResult<String> {
    let params = with_token(options, AccessIntent::Write, credentials)?;
    let request = RpcRequest {
        method: command,
        params: &params,
    };
    Ok(serde_json::to_string(&request)?)
}

#[derive(serde::Serialize)]
struct RpcRequest<'a> {
    method: &'a str,
    params: &'a Options,
}
