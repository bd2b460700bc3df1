use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use kvwire_dict::{DictParser, Entry};
use kvwire_types::{type_id, TypeRegistry};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct EntryOutput<'a> {
    key: &'a str,
    type_id: u8,
    type_name: &'a str,
    count: usize,
    value: serde_json::Value,
}

/// Print a parsed dictionary in key order.
pub fn print_dict(dict: &DictParser<'_>, registry: &TypeRegistry, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let entries: Vec<EntryOutput<'_>> = dict
                .iter()
                .map(|entry| entry_output(entry, registry))
                .collect();
            println!(
                "{}",
                serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["KEY", "TYPE", "COUNT", "VALUE"]);
            for entry in dict.iter() {
                let out = entry_output(entry, registry);
                table.add_row(vec![
                    out.key.to_string(),
                    out.type_name.to_string(),
                    out.count.to_string(),
                    render_value(&out.value),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for entry in dict.iter() {
                let out = entry_output(entry, registry);
                println!(
                    "{} = {} ({}[{}])",
                    out.key,
                    render_value(&out.value),
                    out.type_name,
                    out.count
                );
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn entry_output<'a>(entry: &'a Entry<'_>, registry: &'a TypeRegistry) -> EntryOutput<'a> {
    let tid = entry.type_id();
    let raw = entry.raw_value();

    if tid == type_id::CHAR {
        if let Ok(text) = entry.get_str() {
            return EntryOutput {
                key: entry.key(),
                type_id: tid,
                type_name: "char",
                count: raw.len(),
                value: serde_json::Value::String(text.to_string()),
            };
        }
    }

    match registry.info(tid) {
        Some(info) if info.size > 0 && raw.len() % info.size == 0 => {
            let values: Vec<serde_json::Value> = raw
                .chunks(info.size)
                .map(|chunk| {
                    registry
                        .decode_value(tid, chunk)
                        .ok()
                        .and_then(|value| serde_json::to_value(value).ok())
                        .unwrap_or(serde_json::Value::Null)
                })
                .collect();
            let count = values.len();
            let value = if count == 1 {
                values.into_iter().next().unwrap_or(serde_json::Value::Null)
            } else {
                serde_json::Value::Array(values)
            };
            EntryOutput {
                key: entry.key(),
                type_id: tid,
                type_name: info.name,
                count,
                value,
            }
        }
        _ => EntryOutput {
            key: entry.key(),
            type_id: tid,
            type_name: type_id::type_name(tid),
            count: raw.len(),
            value: serde_json::Value::String(hex_string(raw)),
        },
    }
}

fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn hex_string(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
