//! Declared JSON shapes of API responses.
//!
//! Each response type lists the fields it expects and the JSON kind of each
//! one, so raw payloads can be checked without deserialising them.

use crate::error::{Error, Result};
use crate::models::{
    ActionResponse, CreditsSummary, EmailVerification, FileInfo, FileList, ReportEntry,
};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    String,
    Integer,
    Boolean,
    Array,
    Object,
    /// Integer, or a string holding one
    IntegerOrString,
    /// String, or a boolean flag in its place
    StringOrBoolean,
}

impl JsonKind {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            JsonKind::String => value.is_string(),
            JsonKind::Integer => value.is_i64() || value.is_u64(),
            JsonKind::Boolean => value.is_boolean(),
            JsonKind::Array => value.is_array(),
            JsonKind::Object => value.is_object(),
            JsonKind::IntegerOrString => {
                JsonKind::Integer.accepts(value)
                    || value.as_str().map_or(false, |s| s.trim().parse::<u64>().is_ok())
            }
            JsonKind::StringOrBoolean => value.is_string() || value.is_boolean(),
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::String => "string",
            JsonKind::Integer => "integer",
            JsonKind::Boolean => "boolean",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
            JsonKind::IntegerOrString => "integer or numeric string",
            JsonKind::StringOrBoolean => "string or boolean",
        };
        f.write_str(name)
    }
}

pub trait ResponseShape {
    /// Field name and expected kind, for every field the API always sends
    const FIELDS: &'static [(&'static str, JsonKind)];

    /// Check that `value` is an object carrying every declared field
    fn check_shape(value: &Value) -> Result<()> {
        check_fields(value, Self::FIELDS, true)
    }

    /// Like [`ResponseShape::check_shape`] but only checks presence
    fn check_fields_present(value: &Value) -> Result<()> {
        check_fields(value, Self::FIELDS, false)
    }
}

fn check_fields(
    value: &Value,
    fields: &[(&'static str, JsonKind)],
    check_kinds: bool,
) -> Result<()> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::InvalidData(format!("expected an object, got {value}")))?;

    for (name, kind) in fields {
        let field = object
            .get(*name)
            .ok_or_else(|| Error::InvalidData(format!("missing field `{name}`")))?;

        if check_kinds && !kind.accepts(field) {
            return Err(Error::InvalidData(format!(
                "field `{name}` should be {kind}, got {field}"
            )));
        }
    }

    Ok(())
}

impl ResponseShape for EmailVerification {
    const FIELDS: &'static [(&'static str, JsonKind)] = &[
        ("email", JsonKind::String),
        ("quality", JsonKind::String),
        ("result", JsonKind::String),
        ("resultcode", JsonKind::Integer),
        ("subresult", JsonKind::String),
        ("free", JsonKind::Boolean),
        ("role", JsonKind::Boolean),
        ("didyoumean", JsonKind::String),
        ("credits", JsonKind::Integer),
        ("executiontime", JsonKind::Integer),
        ("error", JsonKind::String),
        ("livemode", JsonKind::Boolean),
    ];
}

impl ResponseShape for CreditsSummary {
    const FIELDS: &'static [(&'static str, JsonKind)] = &[("credits", JsonKind::Integer)];
}

impl ResponseShape for FileInfo {
    const FIELDS: &'static [(&'static str, JsonKind)] = &[
        ("file_id", JsonKind::IntegerOrString),
        ("file_name", JsonKind::String),
        ("status", JsonKind::String),
        ("unique_emails", JsonKind::Integer),
        ("updated_at", JsonKind::String),
        ("createdate", JsonKind::String),
        ("percent", JsonKind::Integer),
        ("total_rows", JsonKind::Integer),
        ("verified", JsonKind::Integer),
        ("unverified", JsonKind::Integer),
        ("ok", JsonKind::Integer),
        ("catch_all", JsonKind::Integer),
        ("disposable", JsonKind::Integer),
        ("invalid", JsonKind::Integer),
        ("unknown", JsonKind::Integer),
        ("reverify", JsonKind::Integer),
        ("credit", JsonKind::Integer),
        ("estimated_time_sec", JsonKind::Integer),
        ("error", JsonKind::StringOrBoolean),
    ];
}

impl ResponseShape for FileList {
    const FIELDS: &'static [(&'static str, JsonKind)] =
        &[("files", JsonKind::Array), ("total", JsonKind::Integer)];

    /// Also checks every listed file against the [`FileInfo`] shape
    fn check_shape(value: &Value) -> Result<()> {
        check_fields(value, Self::FIELDS, true)?;
        if let Some(files) = value.get("files").and_then(Value::as_array) {
            for file in files {
                FileInfo::check_shape(file)?;
            }
        }
        Ok(())
    }
}

impl ResponseShape for ReportEntry {
    const FIELDS: &'static [(&'static str, JsonKind)] = &[
        ("email", JsonKind::String),
        ("quality", JsonKind::String),
        ("result", JsonKind::String),
        ("free", JsonKind::Boolean),
        ("role", JsonKind::Boolean),
    ];
}

impl ResponseShape for ActionResponse {
    const FIELDS: &'static [(&'static str, JsonKind)] = &[("result", JsonKind::String)];
}
