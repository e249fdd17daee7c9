//! Output rendering for records, lists and batch results.

use std::borrow::Cow;
use std::io::{self, Write};

use cloudadm_api_types::{ListResult, SubmitResult};
use prettytable::{Cell, Row, Table, row};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::OutputFormat;

pub mod transforms;

/// A view-only rewrite applied to each record before it is printed.
pub type Transform = fn(&Value) -> Result<Value, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("output error: {0}")]
    Io(#[from] io::Error),
    #[error("output error: {0}")]
    Encode(String),
    #[error("render error: {0}")]
    Shape(String),
}

impl RenderError {
    pub fn shape(detail: impl Into<String>) -> Self {
        Self::Shape(detail.into())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    format: OutputFormat,
}

impl Printer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn print_list(&self, list: &ListResult, columns: &[&str]) -> Result<(), RenderError> {
        self.print_list_with(list, columns, None)
    }

    pub fn print_list_with(
        &self,
        list: &ListResult,
        columns: &[&str],
        transform: Option<Transform>,
    ) -> Result<(), RenderError> {
        self.write_list(&mut io::stdout().lock(), list, columns, transform)
    }

    pub fn print_object(&self, record: &Value) -> Result<(), RenderError> {
        self.print_object_with(record, None)
    }

    pub fn print_object_with(
        &self,
        record: &Value,
        transform: Option<Transform>,
    ) -> Result<(), RenderError> {
        self.write_object(&mut io::stdout().lock(), record, transform)
    }

    pub fn print_batch(
        &self,
        results: &[SubmitResult],
        columns: &[&str],
    ) -> Result<(), RenderError> {
        self.write_batch(&mut io::stdout().lock(), results, columns)
    }

    pub fn print_text(&self, value: &Value) -> Result<(), RenderError> {
        write_text(&mut io::stdout().lock(), value)
    }

    pub fn write_list(
        &self,
        out: &mut dyn Write,
        list: &ListResult,
        columns: &[&str],
        transform: Option<Transform>,
    ) -> Result<(), RenderError> {
        let records: Vec<Value> = list
            .data
            .iter()
            .map(|record| apply(record, transform).into_owned())
            .collect();

        match self.format {
            OutputFormat::Table => {
                if !records.is_empty() {
                    list_table(&records, columns).print(out)?;
                }
                if let Some(total) = list.total {
                    writeln!(out, "***  Total: {total}  ***")?;
                }
                Ok(())
            }
            OutputFormat::Kv => {
                for (index, record) in records.iter().enumerate() {
                    if index > 0 {
                        writeln!(out)?;
                    }
                    write_kv(out, record)?;
                }
                Ok(())
            }
            OutputFormat::Json | OutputFormat::Yaml => {
                let page = ListResult {
                    data: records,
                    ..list.clone()
                };
                self.write_encoded(out, &page)
            }
        }
    }

    pub fn write_object(
        &self,
        out: &mut dyn Write,
        record: &Value,
        transform: Option<Transform>,
    ) -> Result<(), RenderError> {
        let record = apply(record, transform);
        match self.format {
            OutputFormat::Table => {
                record_table(&record).print(out)?;
                Ok(())
            }
            OutputFormat::Kv => write_kv(out, &record),
            OutputFormat::Json | OutputFormat::Yaml => self.write_encoded(out, &*record),
        }
    }

    pub fn write_batch(
        &self,
        out: &mut dyn Write,
        results: &[SubmitResult],
        columns: &[&str],
    ) -> Result<(), RenderError> {
        if matches!(self.format, OutputFormat::Json | OutputFormat::Yaml) {
            return self.write_encoded(out, &results);
        }

        let succeeded: Vec<Value> = results
            .iter()
            .filter(|result| result.is_success())
            .map(|result| result.data.clone())
            .collect();
        if !succeeded.is_empty() {
            let page = ListResult {
                data: succeeded,
                ..ListResult::default()
            };
            self.write_list(out, &page, columns, None)?;
        }
        for failed in results.iter().filter(|result| !result.is_success()) {
            writeln!(
                out,
                "error: {} ({}): {}",
                failed.id,
                failed.status,
                failed.error_message().unwrap_or("unknown error")
            )?;
        }
        Ok(())
    }

    fn write_encoded<T: Serialize + ?Sized>(
        &self,
        out: &mut dyn Write,
        value: &T,
    ) -> Result<(), RenderError> {
        let text = match self.format {
            OutputFormat::Yaml => {
                serde_yaml::to_string(value).map_err(|err| RenderError::Encode(err.to_string()))?
            }
            _ => serde_json::to_string_pretty(value)
                .map_err(|err| RenderError::Encode(err.to_string()))?,
        };
        writeln!(out, "{}", text.trim_end())?;
        Ok(())
    }
}

/// Print a value verbatim: strings without quotes, anything else as pretty JSON.
pub fn write_text(out: &mut dyn Write, value: &Value) -> Result<(), RenderError> {
    match value {
        Value::String(text) => writeln!(out, "{}", text.trim_end())?,
        other => {
            let text = serde_json::to_string_pretty(other)
                .map_err(|err| RenderError::Encode(err.to_string()))?;
            writeln!(out, "{text}")?;
        }
    }
    Ok(())
}

fn apply(record: &Value, transform: Option<Transform>) -> Cow<'_, Value> {
    let Some(transform) = transform else {
        return Cow::Borrowed(record);
    };
    match transform(record) {
        Ok(view) => Cow::Owned(view),
        Err(err) => {
            tracing::warn!(error = %err, "render transform failed; printing raw record");
            Cow::Borrowed(record)
        }
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn list_table(records: &[Value], columns: &[&str]) -> Table {
    let columns: Vec<String> = if columns.is_empty() {
        let mut seen = Vec::new();
        for key in records.iter().filter_map(Value::as_object).flat_map(|o| o.keys()) {
            if !seen.contains(key) {
                seen.push(key.clone());
            }
        }
        seen
    } else {
        columns.iter().map(|c| (*c).to_string()).collect()
    };

    let mut table = Table::new();
    table.set_titles(Row::new(columns.iter().map(|c| Cell::new(c)).collect()));
    for record in records {
        table.add_row(Row::new(
            columns
                .iter()
                .map(|column| Cell::new(&cell_text(record.get(column))))
                .collect(),
        ));
    }
    table
}

fn record_table(record: &Value) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Field", "Value"]);
    match record.as_object() {
        Some(object) => {
            let mut keys: Vec<&String> = object.keys().collect();
            keys.sort();
            for key in keys {
                table.add_row(row![key, cell_text(object.get(key))]);
            }
        }
        None => {
            table.add_row(row!["value", cell_text(Some(record))]);
        }
    }
    table
}

fn write_kv(out: &mut dyn Write, record: &Value) -> Result<(), RenderError> {
    match record.as_object() {
        Some(object) => {
            for (key, value) in object {
                writeln!(out, "{key}: {}", cell_text(Some(value)))?;
            }
        }
        None => writeln!(out, "{}", cell_text(Some(record)))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn rendered(f: impl FnOnce(&mut Vec<u8>) -> Result<(), RenderError>) -> String {
        let mut out = Vec::new();
        f(&mut out).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    fn failing(_: &Value) -> Result<Value, RenderError> {
        Err(RenderError::shape("unexpected shape"))
    }

    #[test]
    fn record_table_sorts_fields() {
        let printer = Printer::new(OutputFormat::Table);
        let text = rendered(|out| {
            printer.write_object(out, &json!({"name": "d1", "id": "x", "size": 10}), None)
        });
        let id = text.find("| id").expect("id row");
        let name = text.find("| name").expect("name row");
        let size = text.find("| size").expect("size row");
        assert!(id < name && name < size, "{text}");
        assert!(text.contains("Field") && text.contains("Value"));
    }

    #[test]
    fn list_table_uses_columns_and_total() {
        let printer = Printer::new(OutputFormat::Table);
        let list = ListResult {
            data: vec![json!({"id": "a", "name": "disk-a", "extra": true})],
            total: Some(7),
            ..ListResult::default()
        };
        let text = rendered(|out| printer.write_list(out, &list, &["id", "name"], None));
        assert!(text.contains("disk-a"));
        assert!(!text.contains("extra"));
        assert!(text.ends_with("***  Total: 7  ***\n"), "{text}");
    }

    #[test]
    fn list_without_columns_takes_record_keys() {
        let printer = Printer::new(OutputFormat::Table);
        let list = ListResult {
            data: vec![json!({"id": "a"}), json!({"id": "b", "zone": "z1"})],
            ..ListResult::default()
        };
        let text = rendered(|out| printer.write_list(out, &list, &[], None));
        assert!(text.contains("zone") && text.contains("z1"));
        assert!(!text.contains("Total"));
    }

    #[test]
    fn failed_transform_prints_raw_record() {
        let printer = Printer::new(OutputFormat::Json);
        let record = json!({"id": "id42", "acl_entries": "broken"});
        let text = rendered(|out| printer.write_object(out, &record, Some(failing)));
        let parsed: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(parsed, record);
    }

    #[test]
    fn batch_reports_failures_after_successes() {
        let printer = Printer::new(OutputFormat::Table);
        let results = vec![
            SubmitResult::ok("d1", json!({"id": "d1", "status": "deleting"})),
            SubmitResult::failed("d2", 404, "disk not found"),
        ];
        let text = rendered(|out| printer.write_batch(out, &results, &["id", "status"]));
        assert!(text.contains("deleting"));
        assert!(text.ends_with("error: d2 (404): disk not found\n"), "{text}");
    }

    #[test]
    fn kv_and_yaml_formats() {
        let record = json!({"id": "x", "tags": ["a"]});
        let kv = rendered(|out| Printer::new(OutputFormat::Kv).write_object(out, &record, None));
        assert_eq!(kv, "id: x\ntags: [\"a\"]\n");

        let yaml =
            rendered(|out| Printer::new(OutputFormat::Yaml).write_object(out, &record, None));
        assert!(yaml.contains("id: x"), "{yaml}");
    }

    #[test]
    fn text_prints_strings_unquoted() {
        let text = rendered(|out| write_text(out, &json!("apiVersion: v1\n")));
        assert_eq!(text, "apiVersion: v1\n");
        let text = rendered(|out| write_text(out, &json!({"a": 1})));
        assert_eq!(text, "{\n  \"a\": 1\n}\n");
    }
}
