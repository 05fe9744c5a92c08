use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Maps a caller's raw option to the record the normalizer reads
/// (`id`, `value`, `label`, `disabled`, `group`, `options`).
pub type MapOption = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Predicate for options navigation must pass over.
pub type SkipOption = Arc<dyn Fn(&ListOption) -> bool + Send + Sync>;

/// Stable equality key of an option across re-created option lists.
///
/// Holds a canonical JSON rendering (object keys sorted), so two raw values
/// share an identity exactly when they are deeply equal. `1` and `"1"`
/// render differently and stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(String);

impl Identity {
    pub fn of(value: &Value) -> Self {
        let mut out = String::new();
        write_canonical(value, &mut out);
        Self(out)
    }

    fn group_header(ordinal: usize, label: &str) -> Self {
        // JSON text never starts with NUL, so headers cannot collide with options.
        Self(format!("\u{0}group:{ordinal}:{label}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                if let Some(child) = map.get(key) {
                    write_canonical(child, out);
                }
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Canonical option record derived from caller-supplied raw option data.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOption {
    pub identity: Identity,
    pub label: String,
    /// The caller's original, unmapped value.
    pub value: Value,
    pub disabled: bool,
    pub group: Option<String>,
    /// Position in the flattened list, group headers included.
    pub index: usize,
    /// DOM-id-safe key for the rendered element.
    pub key: String,
    /// Group headers and other structural rows that cannot be committed.
    pub unselectable: bool,
}

impl ListOption {
    pub fn is_selectable(&self) -> bool {
        !self.disabled && !self.unselectable
    }

    pub fn same_identity(&self, other: &ListOption) -> bool {
        self.identity == other.identity
    }
}

/// Default skip predicate: disabled options and group headers.
pub fn skip_unselectable(option: &ListOption) -> bool {
    !option.is_selectable()
}

/// Normalized option list plus an identity lookup.
#[derive(Clone, Default)]
pub struct Options {
    items: Vec<ListOption>,
    by_identity: IndexMap<Identity, usize>,
    map_option: Option<MapOption>,
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("items", &self.items)
            .field("mapped", &self.map_option.is_some())
            .finish()
    }
}

impl Options {
    pub fn from_raw(raw: &[Value]) -> Self {
        OptionsBuilder::new(raw).build()
    }

    pub fn builder(raw: &[Value]) -> OptionsBuilder<'_> {
        OptionsBuilder::new(raw)
    }

    pub fn from_strings<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let raw: Vec<Value> = labels
            .into_iter()
            .map(|label| Value::String(label.into()))
            .collect();
        Self::from_raw(&raw)
    }

    pub fn as_slice(&self) -> &[ListOption] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ListOption> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ListOption> {
        self.items.get(index)
    }

    pub fn find(&self, identity: &Identity) -> Option<&ListOption> {
        self.by_identity
            .get(identity)
            .and_then(|index| self.items.get(*index))
    }

    pub fn find_by_key(&self, key: &str) -> Option<&ListOption> {
        self.items.iter().find(|option| option.key == key)
    }

    /// Identity a caller value would have as an option of this list.
    pub fn identity_for_value(&self, value: &Value) -> Identity {
        match &self.map_option {
            Some(map) => resolve_identity(&map(value)),
            None => resolve_identity(value),
        }
    }

    pub fn find_value(&self, value: &Value) -> Option<&ListOption> {
        self.find(&self.identity_for_value(value))
    }

    /// Options that count as results: everything except structural rows.
    pub fn results(&self) -> impl Iterator<Item = &ListOption> {
        self.items.iter().filter(|option| !option.unselectable)
    }
}

pub struct OptionsBuilder<'a> {
    raw: &'a [Value],
    map_option: Option<MapOption>,
    id_prefix: String,
}

impl<'a> OptionsBuilder<'a> {
    pub fn new(raw: &'a [Value]) -> Self {
        Self {
            raw,
            map_option: None,
            id_prefix: "option".to_string(),
        }
    }

    pub fn with_map_option(mut self, map_option: MapOption) -> Self {
        self.map_option = Some(map_option);
        self
    }

    pub fn with_map_option_opt(mut self, map_option: Option<MapOption>) -> Self {
        self.map_option = map_option;
        self
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn build(self) -> Options {
        let mut flat = Flattener {
            items: Vec::new(),
            keys: KeyAllocator::new(&self.id_prefix),
            current_group: None,
            group_ordinal: 0,
        };

        for raw in self.raw {
            let mapped = self.map_option.as_ref().map(|map| map(raw));
            let record = mapped.as_ref().unwrap_or(raw);

            if let Some(children) = record.get("options").and_then(Value::as_array) {
                let label = label_of(record);
                flat.push_header(&label);
                for child in children {
                    let mapped_child = self.map_option.as_ref().map(|map| map(child));
                    let child_record = mapped_child.as_ref().unwrap_or(child);
                    flat.push_option(child, child_record, Some(label.clone()));
                }
                flat.current_group = Some(label);
                continue;
            }

            let group = record
                .get("group")
                .and_then(Value::as_str)
                .map(str::to_string);
            if group.is_some() && group != flat.current_group {
                if let Some(label) = &group {
                    flat.push_header(label);
                }
            }
            flat.current_group = group.clone();
            flat.push_option(raw, record, group);
        }

        let mut by_identity = IndexMap::with_capacity(flat.items.len());
        for option in &flat.items {
            by_identity
                .entry(option.identity.clone())
                .or_insert(option.index);
        }

        Options {
            items: flat.items,
            by_identity,
            map_option: self.map_option,
        }
    }
}

struct Flattener {
    items: Vec<ListOption>,
    keys: KeyAllocator,
    current_group: Option<String>,
    group_ordinal: usize,
}

impl Flattener {
    fn push_header(&mut self, label: &str) {
        let index = self.items.len();
        let key = self.keys.allocate(&format!("group_{label}"));
        self.items.push(ListOption {
            identity: Identity::group_header(self.group_ordinal, label),
            label: label.to_string(),
            value: Value::Null,
            disabled: false,
            group: None,
            index,
            key,
            unselectable: true,
        });
        self.group_ordinal += 1;
    }

    fn push_option(&mut self, raw: &Value, record: &Value, group: Option<String>) {
        let index = self.items.len();
        let identity = resolve_identity(record);
        let key = self.keys.allocate(identity.as_str());
        self.items.push(ListOption {
            identity,
            label: label_of(record),
            value: raw.clone(),
            disabled: record
                .get("disabled")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            group,
            index,
            key,
            unselectable: false,
        });
    }
}

fn resolve_identity(record: &Value) -> Identity {
    match record {
        Value::Object(map) => field(map, "id")
            .or_else(|| field(map, "value"))
            .map(Identity::of)
            .unwrap_or_else(|| Identity::of(record)),
        other => Identity::of(other),
    }
}

fn field<'v>(map: &'v Map<String, Value>, name: &str) -> Option<&'v Value> {
    map.get(name).filter(|value| !value.is_null())
}

fn label_of(record: &Value) -> String {
    match record {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Object(map) => ["label", "value", "id"]
            .iter()
            .find_map(|name| field(map, name))
            .map(scalar_text)
            .unwrap_or_default(),
        other => other.to_string(),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

struct KeyAllocator {
    prefix: String,
    used: IndexMap<String, usize>,
}

impl KeyAllocator {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: sanitize(prefix),
            used: IndexMap::new(),
        }
    }

    fn allocate(&mut self, seed: &str) -> String {
        let base = format!("{}_{}", self.prefix, sanitize(seed));
        let count = self.used.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}_{count}")
        }
    }
}

fn sanitize(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}
