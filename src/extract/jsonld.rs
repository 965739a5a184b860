// src/extract/jsonld.rs

//! JSON-LD reader.
//!
//! Finds the job-posting record among a page's
//! `<script type="application/ld+json">` blocks and pulls organization
//! and job metadata from it.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use super::text::clean;
use crate::models::StructuredJobData;

static TYPED_SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script[type]").expect("script selector"));

const LD_JSON_MIME: &str = "application/ld+json";

/// Read the first linked-data record of `type_name` from the whole document.
///
/// Returns `None` when no block parses or none has the requested type.
pub fn read_structured_data(document: &Html, type_name: &str) -> Option<StructuredJobData> {
    let candidates = collect_candidates(document);
    let posting = candidates.iter().find(|c| has_type(c, type_name))?;

    Some(StructuredJobData {
        company_name: json_path(posting, &["hiringOrganization", "name"])
            .and_then(as_text)
            .or_else(|| json_path(posting, &["hiringOrganization", "legalName"]).and_then(as_text)),
        company_url: json_path(posting, &["hiringOrganization", "sameAs"])
            .and_then(as_text)
            .or_else(|| json_path(posting, &["hiringOrganization", "url"]).and_then(as_text)),
        location: json_path(posting, &["jobLocation", "address", "addressLocality"])
            .and_then(as_text),
        employment_type: json_path(posting, &["employmentType"]).and_then(as_joined_text),
        base_salary: json_path(posting, &["baseSalary"]).and_then(salary_text),
    })
}

/// Parse every linked-data block and flatten them into one candidate list.
fn collect_candidates(document: &Html) -> Vec<Value> {
    let mut candidates = Vec::new();

    let scripts = document
        .select(&TYPED_SCRIPT)
        .filter(|script| script.value().attr("type").is_some_and(is_ld_json));

    for (index, script) in scripts.enumerate() {
        let content = script.text().collect::<String>();
        let content = content
            .trim()
            .trim_start_matches("<![CDATA[")
            .trim_end_matches("]]>")
            .trim();

        if content.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(content) {
            Ok(value) => flatten(value, &mut candidates),
            Err(e) => log::debug!("Skipping JSON-LD block {index}: {e}"),
        }
    }

    candidates
}

/// Whether a `type` attribute names JSON-LD, ignoring case and parameters.
fn is_ld_json(mime: &str) -> bool {
    let essence = mime.split(';').next().unwrap_or_default();
    essence.trim().eq_ignore_ascii_case(LD_JSON_MIME)
}

fn flatten(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => items.into_iter().for_each(|item| flatten(item, out)),
        Value::Object(mut obj) => match obj.remove("@graph") {
            Some(graph) => flatten(graph, out),
            None => out.push(Value::Object(obj)),
        },
        _ => {}
    }
}

fn has_type(value: &Value, type_name: &str) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t == type_name,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(type_name)),
        _ => false,
    }
}

/// Walk `path` through nested objects.
///
/// A list met along the way is entered through its first entry. Any
/// missing link yields `None`.
pub fn json_path<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, key| first(current)?.get(key))
}

fn first(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

fn as_text(value: &Value) -> Option<String> {
    match first(value)? {
        Value::String(s) => clean(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_joined_text(value: &Value) -> Option<String> {
    match value {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(as_text).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        other => as_text(other),
    }
}

/// Render a `baseSalary` as `USD 100000-150000/YEAR`.
fn salary_text(salary: &Value) -> Option<String> {
    if !salary.is_object() {
        return as_text(salary);
    }

    let value = salary.get("value")?;
    let amount = if value.is_object() {
        let min = value.get("minValue").and_then(as_text);
        let max = value.get("maxValue").and_then(as_text);
        match (min, max) {
            (Some(min), Some(max)) => Some(format!("{min}-{max}")),
            (Some(single), None) | (None, Some(single)) => Some(single),
            (None, None) => value.get("value").and_then(as_text),
        }
    } else {
        as_text(value)
    }?;

    let mut text = match salary.get("currency").and_then(as_text) {
        Some(currency) => format!("{currency} {amount}"),
        None => amount,
    };
    let unit = json_path(salary, &["value", "unitText"])
        .or_else(|| salary.get("unitText"))
        .and_then(as_text);
    if let Some(unit) = unit {
        text.push('/');
        text.push_str(&unit);
    }

    Some(text)
}
