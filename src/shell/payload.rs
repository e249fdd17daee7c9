//! Options-to-payload conventions shared by every handler.
//!
//! Two construction styles exist side by side: field-by-field through
//! [`Params::put`], and whole-struct through [`Params::from_struct`]. Both
//! apply the same presence filter, so a flag that was not given never shows
//! up on the wire.

use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{CliError, CliResult};

/// Serde helper for boolean flags: only `true` is emitted.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn is_false(value: &bool) -> bool {
    !*value
}

/// Conversion of one option value into its payload form, or `None` when the
/// value counts as absent.
pub trait PayloadValue {
    fn to_payload(&self) -> Option<Value>;
}

impl PayloadValue for str {
    fn to_payload(&self) -> Option<Value> {
        (!self.is_empty()).then(|| Value::String(self.to_string()))
    }
}

impl PayloadValue for String {
    fn to_payload(&self) -> Option<Value> {
        self.as_str().to_payload()
    }
}

impl PayloadValue for bool {
    fn to_payload(&self) -> Option<Value> {
        self.then_some(Value::Bool(true))
    }
}

macro_rules! numeric_payload {
    ($($ty:ty),*) => {
        $(impl PayloadValue for $ty {
            fn to_payload(&self) -> Option<Value> {
                Some(Value::from(*self))
            }
        })*
    };
}

numeric_payload!(i32, i64, u32, u64, f64);

impl PayloadValue for Vec<String> {
    fn to_payload(&self) -> Option<Value> {
        (!self.is_empty()).then(|| Value::from(self.clone()))
    }
}

impl PayloadValue for Value {
    fn to_payload(&self) -> Option<Value> {
        (!self.is_null()).then(|| self.clone())
    }
}

impl<T: PayloadValue> PayloadValue for Option<T> {
    fn to_payload(&self) -> Option<Value> {
        self.as_ref().and_then(PayloadValue::to_payload)
    }
}

/// An insertion-ordered JSON object under construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whole-struct mode: serialize the options value and drop every absent
    /// entry (`null`, empty string, empty list), recursively.
    pub fn from_struct<T: Serialize + ?Sized>(options: &T) -> CliResult<Self> {
        let value = serde_json::to_value(options)
            .map_err(|err| CliError::invalid(format!("cannot encode options: {err}")))?;
        match prune(value) {
            Some(Value::Object(map)) => Ok(Self(map)),
            None => Ok(Self::new()),
            Some(other) => Err(CliError::invalid(format!(
                "options must encode to an object, got {other}"
            ))),
        }
    }

    /// Field-by-field mode: insert `key` only when `value` is present.
    pub fn put<V: PayloadValue + ?Sized>(&mut self, key: &str, value: &V) -> &mut Self {
        if let Some(value) = value.to_payload() {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    /// Insert unconditionally, including `false` and empty values.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Insert a value under a nested path such as `["config", "ldap"]`,
    /// creating intermediate objects as needed.
    pub fn put_path(&mut self, path: &[&str], value: impl Into<Value>) -> &mut Self {
        insert_path(&mut self.0, path, value.into());
        self
    }

    pub fn extend(&mut self, other: Params) -> &mut Self {
        self.0.extend(other.0);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Guard for update handlers: an `id` key never counts as a change, and
    /// an empty remainder is refused before any request is made.
    pub fn ensure_update(mut self, what: &str) -> CliResult<Self> {
        self.remove("id");
        if self.is_empty() {
            return Err(CliError::NothingToUpdate(format!(
                "no fields given to update {what}"
            )));
        }
        Ok(self)
    }

    /// Flatten into query-string pairs. Lists repeat their key, objects are
    /// sent as JSON text.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            match value {
                Value::Array(items) => {
                    for item in items {
                        pairs.push((key.clone(), scalar_text(item)));
                    }
                }
                other => pairs.push((key.clone(), scalar_text(other))),
            }
        }
        pairs
    }
}

impl From<Params> for Value {
    fn from(params: Params) -> Self {
        params.into_value()
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn insert_path(map: &mut Map<String, Value>, path: &[&str], value: Value) {
    match path {
        [] => {}
        [last] => {
            map.insert((*last).to_string(), value);
        }
        [first, rest @ ..] => {
            let slot = map
                .entry((*first).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(next) = slot {
                insert_path(next, rest, value);
            }
        }
    }
}

fn prune(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) => Some(Value::Object(
            map.into_iter()
                .filter_map(|(k, v)| prune(v).map(|v| (k, v)))
                .collect(),
        )),
        other => Some(other),
    }
}

/// Options types that can turn themselves into a request payload.
///
/// The default is whole-struct serialization; types whose wire shape differs
/// from their flags override `params`.
pub trait ToParams: Serialize {
    fn params(&self) -> CliResult<Params> {
        Params::from_struct(self)
    }
}

/// List options that may scope the listing under a parent resource.
pub trait ListOptions: ToParams {
    fn context_id(&self) -> Option<&str> {
        None
    }
}

/// Declare a positive/negative flag pair feeding one optional boolean.
///
/// The generated type is a clap fragment meant to be flattened into an
/// options struct, and serializes as a map of zero or one entry so it can
/// also be `#[serde(flatten)]`-ed in whole-struct mode.
#[macro_export]
macro_rules! tri_state {
    ($(#[$meta:meta])* $name:ident {
        key: $key:literal,
        on: $on:literal => $on_help:literal,
        off: $off:literal => $off_help:literal $(,)?
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ::clap::Args)]
        pub struct $name {
            #[arg(id = $on, long = $on, help = $on_help, conflicts_with = $off)]
            on: bool,
            #[arg(id = $off, long = $off, help = $off_help)]
            off: bool,
        }

        impl $name {
            pub const KEY: &'static str = $key;

            pub fn value(&self) -> Option<bool> {
                if self.on {
                    Some(true)
                } else if self.off {
                    Some(false)
                } else {
                    None
                }
            }
        }

        impl $crate::shell::payload::PayloadValue for $name {
            fn to_payload(&self) -> Option<::serde_json::Value> {
                self.value().map(::serde_json::Value::Bool)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                use ::serde::ser::SerializeMap;
                let value = self.value();
                let mut map = serializer.serialize_map(Some(usize::from(value.is_some())))?;
                if let Some(value) = value {
                    map.serialize_entry(Self::KEY, &value)?;
                }
                map.end()
            }
        }
    };
}

tri_state!(
    /// `--auto-create-project` / `--no-auto-create-project`
    AutoCreateProject {
        key: "auto_create_project",
        on: "auto-create-project" => "Automatically create a default project when importing a domain",
        off: "no-auto-create-project" => "Do not create a default project when importing a domain",
    }
);

tri_state!(
    /// `--auto-create-user` / `--no-auto-create-user`
    AutoCreateUser {
        key: "auto_create_user",
        on: "auto-create-user" => "Automatically create users on first login",
        off: "no-auto-create-user" => "Do not create users on first login",
    }
);

tri_state!(
    /// `--enabled` / `--disabled`
    EnabledState {
        key: "enabled",
        on: "enabled" => "Mark the resource enabled",
        off: "disabled" => "Mark the resource disabled",
    }
);

tri_state!(
    /// `--system` / `--no-system`
    SystemState {
        key: "is_system",
        on: "system" => "Mark as a system resource",
        off: "no-system" => "Mark as a non-system resource",
    }
);

tri_state!(
    /// `--federated-used` / `--federated-unused`
    FederatedUsed {
        key: "federated_used",
        on: "federated-used" => "Only clusters already used by a federated resource",
        off: "federated-unused" => "Only clusters not used by any federated resource",
    }
);

tri_state!(
    /// `--auto-delete` / `--no-auto-delete`
    AutoDelete {
        key: "auto_delete",
        on: "auto-delete" => "Delete together with the owning server",
        off: "no-auto-delete" => "Keep when the owning server is deleted",
    }
);

/// Paging, detail and ownership flags shared by list subcommands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Args, Serialize)]
pub struct BaseListOptions {
    /// Maximum number of records to return
    #[arg(long)]
    pub limit: Option<u64>,

    /// Number of records to skip
    #[arg(long)]
    pub offset: Option<u64>,

    /// Resume listing after this marker
    #[arg(long)]
    pub paging_marker: Option<String>,

    /// Return detailed records
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub details: bool,

    /// Fuzzy search by name
    #[arg(long)]
    pub search: Option<String>,

    /// Filter expression, e.g. status.equals(ready); repeatable
    #[arg(long, action = clap::ArgAction::Append)]
    pub filter: Vec<String>,

    /// Match any filter instead of all of them
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub filter_any: bool,

    /// Ownership scope of the listing
    #[arg(long, value_parser = ["system", "domain", "project"])]
    pub scope: Option<String>,

    /// Restrict to resources owned by this project
    #[arg(long)]
    pub project: Option<String>,

    /// Restrict to resources owned by this domain
    #[arg(long)]
    pub project_domain: Option<String>,

    /// Sort by these fields; repeatable
    #[arg(long, action = clap::ArgAction::Append)]
    pub order_by: Vec<String>,

    /// Sort direction
    #[arg(long, value_parser = ["asc", "desc"])]
    pub order: Option<String>,

    /// Show resources pending deletion
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub pending_delete: bool,
}

impl ToParams for BaseListOptions {}
impl ListOptions for BaseListOptions {}
