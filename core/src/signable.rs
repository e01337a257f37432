use std::collections::BTreeMap;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use serde::Serialize;

use crate::value::ToValue;
use crate::value::Value;
use crate::Error;
use crate::Result;

/// Field is one named value of a record, optionally carrying tags.
///
/// A tag maps a source name (for example `json` or `form`) to an alternate
/// field name. When the signer is configured with that source the tag's
/// name replaces the declared one.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    tags: Vec<(String, String)>,
    value: Value,
}

impl Field {
    /// Create a new untagged field.
    pub fn new(name: impl Into<String>, value: impl ToValue) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            value: value.to_value(),
        }
    }

    /// Attach a tag for the given source.
    ///
    /// Like struct tags, only the part before the first `,` is the name:
    /// `tag("json", "amount,omitempty")` names the field `amount`.
    pub fn tag(mut self, source: impl Into<String>, name: impl Into<String>) -> Self {
        self.tags.push((source.into(), name.into()));
        self
    }

    /// Declared name of the field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the field.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Name carried by the tag of `source`, if any.
    pub fn tag_name(&self, source: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(s, _)| s == source)
            .and_then(|(_, v)| v.split(',').next())
            .filter(|v| !v.is_empty())
    }

    /// The key this field is signed under.
    pub fn key(&self, tag: Option<&str>) -> &str {
        tag.and_then(|t| self.tag_name(t)).unwrap_or(&self.name)
    }
}

/// Entries is the shape of an input as seen by the extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum Entries {
    /// Named fields of a record. Tags apply, values must be scalars.
    Record(Vec<Field>),
    /// Entries of a mapping. Sequence values are signed by their first element.
    Mapping(Vec<(String, Value)>),
}

/// Signable is implemented by every input the signer accepts.
///
/// Implement it for your own request types by listing their fields:
///
/// ```
/// use kvsign_core::{Entries, Field, Result, Signable};
///
/// struct Order {
///     order_id: String,
///     amount: u64,
/// }
///
/// impl Signable for Order {
///     fn entries(&self) -> Result<Entries> {
///         Ok(Entries::Record(vec![
///             Field::new("OrderId", &self.order_id).tag("json", "order_id"),
///             Field::new("Amount", self.amount).tag("json", "amount"),
///         ]))
///     }
/// }
/// ```
pub trait Signable {
    /// List the entries of this input.
    fn entries(&self) -> Result<Entries>;
}

impl<T: Signable + ?Sized> Signable for &T {
    fn entries(&self) -> Result<Entries> {
        (**self).entries()
    }
}

impl<T: Signable + ?Sized> Signable for Box<T> {
    fn entries(&self) -> Result<Entries> {
        (**self).entries()
    }
}

impl<T: Signable + ?Sized> Signable for Rc<T> {
    fn entries(&self) -> Result<Entries> {
        (**self).entries()
    }
}

impl<T: Signable + ?Sized> Signable for Arc<T> {
    fn entries(&self) -> Result<Entries> {
        (**self).entries()
    }
}

impl<K: AsRef<str>, V: ToValue, S> Signable for HashMap<K, V, S> {
    fn entries(&self) -> Result<Entries> {
        Ok(Entries::Mapping(
            self.iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.to_value()))
                .collect(),
        ))
    }
}

impl<K: AsRef<str>, V: ToValue> Signable for BTreeMap<K, V> {
    fn entries(&self) -> Result<Entries> {
        Ok(Entries::Mapping(
            self.iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.to_value()))
                .collect(),
        ))
    }
}

impl Signable for serde_json::Map<String, serde_json::Value> {
    fn entries(&self) -> Result<Entries> {
        Ok(Entries::Mapping(
            self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect(),
        ))
    }
}

impl Signable for serde_json::Value {
    fn entries(&self) -> Result<Entries> {
        match self {
            serde_json::Value::Object(m) => m.entries(),
            v => Err(Error::unsupported_input_kind(format!(
                "expected a JSON object, got {}",
                v.to_value().kind()
            ))),
        }
    }
}

impl Signable for Value {
    fn entries(&self) -> Result<Entries> {
        match self {
            Value::Map(m) => Ok(Entries::Mapping(m.clone())),
            v => Err(Error::unsupported_input_kind(format!(
                "expected a map, got {}",
                v.kind()
            ))),
        }
    }
}

/// Record is an ad-hoc record built field by field.
///
/// ```
/// use kvsign_core::{Field, Record};
///
/// let record = Record::new()
///     .field("MerchantId", "M100")
///     .push(Field::new("Amount", 1200).tag("json", "amount"));
/// assert_eq!(record.fields().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an untagged field.
    pub fn field(self, name: impl Into<String>, value: impl ToValue) -> Self {
        self.push(Field::new(name, value))
    }

    /// Append a prepared field.
    pub fn push(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl Signable for Record {
    fn entries(&self) -> Result<Entries> {
        Ok(Entries::Record(self.fields.clone()))
    }
}

/// Json signs any serializable value through its JSON representation.
///
/// The value must serialize to a JSON object; serde attributes such as
/// `rename` decide the keys.
#[derive(Debug, Clone, Copy)]
pub struct Json<T>(pub T);

impl<T: Serialize> Signable for Json<T> {
    fn entries(&self) -> Result<Entries> {
        let v = serde_json::to_value(&self.0).map_err(|e| {
            Error::unsupported_input_kind("value can't be represented as JSON").with_source(e)
        })?;
        v.entries()
    }
}

/// FormUrlEncoded signs an `application/x-www-form-urlencoded` body.
///
/// Repeated keys collapse into a sequence, so the first occurrence is signed.
#[derive(Debug, Clone, Copy)]
pub struct FormUrlEncoded<'a>(pub &'a str);

impl Signable for FormUrlEncoded<'_> {
    fn entries(&self) -> Result<Entries> {
        let mut entries: Vec<(String, Vec<Value>)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (k, v) in form_urlencoded::parse(self.0.as_bytes()) {
            let v = Value::Str(v.into_owned());
            match index.get(k.as_ref()) {
                Some(&idx) => entries[idx].1.push(v),
                None => {
                    let k = k.into_owned();
                    index.insert(k.clone(), entries.len());
                    entries.push((k, vec![v]));
                }
            }
        }

        Ok(Entries::Mapping(
            entries
                .into_iter()
                .map(|(k, vs)| (k, Value::Seq(vs)))
                .collect(),
        ))
    }
}
