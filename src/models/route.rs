use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::DispatchError;

/// Handler invoked with the coerced query parameters of a matched route.
pub type Handler = fn(Args) -> Result<Reply, DispatchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Text,
    Integer,
}

impl ParamType {
    /// Converts a raw query value into this type.
    pub fn coerce(self, name: &str, raw: &str) -> Result<ParamValue, DispatchError> {
        match self {
            ParamType::Text => Ok(ParamValue::Text(raw.to_string())),
            ParamType::Integer => raw.parse::<i32>().map(ParamValue::Integer).map_err(|_| {
                DispatchError::ParameterCoercion {
                    param: name.to_string(),
                    value: raw.to_string(),
                }
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Integer(i32),
}

/// Body of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Reply {
    Text(String),
    Texts(Vec<String>),
    Integer(i32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub kind: ParamType,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub params: Vec<Param>,
    pub handler: Handler,
}

impl Route {
    /// Starts a GET route on `path`; a leading `/` is dropped.
    pub fn get(path: &str, handler: Handler) -> Self {
        Self {
            path: normalize_path(path).to_string(),
            params: Vec::new(),
            handler,
        }
    }

    pub fn param(mut self, name: &str, kind: ParamType) -> Self {
        self.params.push(Param {
            name: name.to_string(),
            kind,
        });
        self
    }

    /// Parameter names as a set, the second half of the dispatch key.
    pub fn param_names(&self) -> BTreeSet<&str> {
        self.params.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn key(&self) -> (&str, BTreeSet<&str>) {
        (self.path.as_str(), self.param_names())
    }
}

pub(crate) fn normalize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Coerced values in the order the route declared them.
#[derive(Debug, Default)]
pub struct Args {
    values: Vec<(String, ParamValue)>,
}

impl Args {
    pub fn new(values: Vec<(String, ParamValue)>) -> Self {
        Self { values }
    }

    pub fn text(&mut self, name: &str) -> Result<String, DispatchError> {
        match self.take(name) {
            Some(ParamValue::Text(value)) => Ok(value),
            _ => Err(mismatch(name)),
        }
    }

    pub fn integer(&mut self, name: &str) -> Result<i32, DispatchError> {
        match self.take(name) {
            Some(ParamValue::Integer(value)) => Ok(value),
            _ => Err(mismatch(name)),
        }
    }

    fn take(&mut self, name: &str) -> Option<ParamValue> {
        let idx = self.values.iter().position(|(n, _)| n == name)?;
        Some(self.values.remove(idx).1)
    }
}

fn mismatch(name: &str) -> DispatchError {
    DispatchError::ArgumentMismatch {
        param: name.to_string(),
    }
}
