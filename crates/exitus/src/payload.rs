//! Kind-bound payload shapes.
//!
//! Payload fields are domain data for programmatic handling (which file,
//! which parameter), never text for humans. Each recognized kind fixes a set
//! of fields; every shape also carries an `extra` map that is passed through
//! untouched.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

pub use serde_json::Value;

/// Open field map used by ad hoc kinds and for extra payload/context fields.
pub type Fields = BTreeMap<String, Value>;

/// A payload shape bound to a [`Kind`](crate::Kind).
pub trait Payload: Clone + fmt::Debug + Default + Send + Sync + 'static {
    /// Flatten into a field map. Fixed fields win over same-named extras.
    fn to_fields(&self) -> Fields;
}

impl Payload for Fields {
    fn to_fields(&self) -> Fields {
        self.clone()
    }
}

/// Payload of the filesystem kind: the files involved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FsPayload {
    pub files: Vec<PathBuf>,
    pub extra: Fields,
}

impl FsPayload {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            files: vec![path.into()],
            ..Default::default()
        }
    }

    pub fn files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: paths.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Payload for FsPayload {
    fn to_fields(&self) -> Fields {
        let mut fields = self.extra.clone();
        let files = self
            .files
            .iter()
            .map(|p| Value::String(p.display().to_string()))
            .collect();
        fields.insert("files".to_string(), Value::Array(files));
        fields
    }
}

/// Payload of the invalid-parameters kind: the offending parameter names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamsPayload {
    pub params: Vec<String>,
    pub extra: Fields,
}

impl ParamsPayload {
    pub fn param(name: impl Into<String>) -> Self {
        Self {
            params: vec![name.into()],
            ..Default::default()
        }
    }

    pub fn params<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            params: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Payload for ParamsPayload {
    fn to_fields(&self) -> Fields {
        let mut fields = self.extra.clone();
        let params = self.params.iter().cloned().map(Value::String).collect();
        fields.insert("params".to_string(), Value::Array(params));
        fields
    }
}
