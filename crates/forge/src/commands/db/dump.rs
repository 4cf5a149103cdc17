use clap::Args;
use forge_fdb::{Database, Item, Value};
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{fs::File, path::PathBuf};

#[derive(Args)]
pub struct DumpArgs {
    /// An input FDB file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl DumpArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let db = Database::new(f)?;

        dump_item(db.root(), 0)
    }
}

fn dump_item(item: Item<'_>, depth: usize) -> Result<()> {
    let indent = "  ".repeat(depth);
    let name = item.name()?;
    let name = if name.is_empty() { "/" } else { name };
    println!("{indent}{}", name.bold());

    for index in 0..item.attribute_count()? {
        let (key, value) = item.attribute_at(index)?;
        println!("{indent}  {} = {}", key.cyan(), render(&value)?);
    }

    for index in 0..item.child_count()? {
        dump_item(item.child_at(index)?, depth + 1)?;
    }

    Ok(())
}

fn render(value: &Value<'_>) -> Result<String> {
    Ok(match value {
        Value::Int32(value) => value.to_string(),
        Value::Float32(value) => value.to_string(),
        Value::Bool(value) => value.to_string(),
        Value::String(text) => format!("{text:?}"),
        Value::Blob(block) => {
            if block.is_compressed() {
                format!(
                    "<{} bytes, {} stored>",
                    block.size(),
                    block.stored_size()
                )
            } else {
                format!("<{} bytes>", block.size())
            }
        }
        Value::Int32Array(block) => preview(&block.int32_values()?, block.size() / 4),
        Value::Float32Array(block) => preview(&block.float32_values()?, block.size() / 4),
    })
}

fn preview<T: ToString>(values: &[T], total: u32) -> String {
    let head = values.iter().take(8).map(ToString::to_string).join(", ");
    if total > 8 {
        format!("[{head}, ... {total} elements]")
    } else {
        format!("[{head}]")
    }
}
