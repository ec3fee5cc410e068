//! Loose named arguments for the namespace layer.
//!
//! A namespace method plucks its fixed field list out of a `Kwargs` into the
//! typed body. What remains must name query parameters of the endpoint;
//! anything else is an `UnknownArgument`.

use customgpt_core::models::QueryFields;
use customgpt_core::multipart::MultipartForm;
use customgpt_core::{ApiError, File, Model};
use serde_json::{Map, Value};

/// One loose argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(Value),
    File(File),
}

/// Ordered bag of named arguments. Setting a name twice keeps the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kwargs {
    args: Vec<(String, Arg)>,
}

impl Kwargs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.put(name.into(), Arg::Value(value.into()))
    }

    /// Send `name` as an explicit null.
    pub fn null(self, name: impl Into<String>) -> Self {
        self.put(name.into(), Arg::Value(Value::Null))
    }

    pub fn file(self, name: impl Into<String>, file: File) -> Self {
        self.put(name.into(), Arg::File(file))
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.args.iter().find(|(key, _)| key == name).map(|(_, arg)| arg)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    fn put(mut self, name: String, arg: Arg) -> Self {
        match self.args.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = arg,
            None => self.args.push((name, arg)),
        }
        self
    }

    fn take(&mut self, fields: &[&str]) -> Vec<(String, Arg)> {
        let (taken, rest) = std::mem::take(&mut self.args)
            .into_iter()
            .partition(|(name, _)| fields.contains(&name.as_str()));
        self.args = rest;
        taken
    }

    /// Move `fields` into a JSON body model.
    pub(crate) fn pluck_json<M: Model>(&mut self, operation: &'static str, fields: &[&str]) -> Result<M, ApiError> {
        let mut map = Map::new();
        for (name, arg) in self.take(fields) {
            match arg {
                Arg::Value(value) => {
                    map.insert(name, value);
                }
                Arg::File(_) => return Err(file_not_accepted(operation, &name)),
            }
        }
        M::from_dict(map)
    }

    /// Move `fields` into a multipart body model, attaching files.
    pub(crate) fn pluck_form<F>(&mut self, operation: &'static str, fields: &[&str]) -> Result<F, ApiError>
    where
        F: Model + MultipartForm,
    {
        let mut map = Map::new();
        let mut files = Vec::new();
        for (name, arg) in self.take(fields) {
            match arg {
                Arg::File(file) => files.push((name, file)),
                Arg::Value(_) if F::FILE_FIELDS.contains(&name.as_str()) => {
                    return Err(ApiError::InvalidArgument(format!(
                        "{operation} expects a file for `{name}`"
                    )));
                }
                Arg::Value(value) => {
                    map.insert(name, value);
                }
            }
        }
        let mut form = F::from_dict(map)?;
        for (name, file) in files {
            form.attach(&name, file)?;
        }
        Ok(form)
    }

    /// Turn the remaining arguments into query parameters over the defaults.
    pub(crate) fn into_query<Q>(self, operation: &'static str) -> Result<Q, ApiError>
    where
        Q: Model + QueryFields + Default,
    {
        let mut map = Q::default().to_dict()?;
        for (name, arg) in self.args {
            if !Q::FIELDS.contains(&name.as_str()) {
                return Err(ApiError::UnknownArgument { operation, name });
            }
            match arg {
                Arg::Value(value) => {
                    map.insert(name, value);
                }
                Arg::File(_) => return Err(file_not_accepted(operation, &name)),
            }
        }
        Q::from_dict(map)
    }

    /// Fail on the first argument nothing consumed.
    pub(crate) fn finish(self, operation: &'static str) -> Result<(), ApiError> {
        match self.args.into_iter().next() {
            Some((name, _)) => Err(ApiError::UnknownArgument { operation, name }),
            None => Ok(()),
        }
    }
}

fn file_not_accepted(operation: &str, name: &str) -> ApiError {
    ApiError::InvalidArgument(format!("{operation} does not take a file for `{name}`"))
}
