use clap::Args;
use forge_fdb::write::DbWriterOptions;
use forge_fdb::{CompressionMethod, DbWriter, ItemTree};
use miette::miette;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use tracing::info;
use walkdir::WalkDir;

#[derive(Args)]
pub struct PackArgs {
    /// An input directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// A target FDB file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl PackArgs {
    pub fn handle(&self) -> Result<()> {
        info!("creating {}", &self.file.display());

        let files = WalkDir::new(&self.directory)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| !e.file_type().is_dir())
            .collect::<Vec<_>>();

        if files.is_empty() {
            return Err(miette!("directory is empty"));
        }

        let mut tree = ItemTree::new();
        for file in files {
            let name = file
                .path()
                .strip_prefix(&self.directory)
                .into_diagnostic()?;
            info!("packing {}", name.display());

            let mut item = tree.root();
            for component in name.components() {
                let part = component.as_os_str().to_str().ok_or(miette!(
                    "unable to convert {} to a string",
                    name.display()
                ))?;
                item = tree
                    .fetch_child(item, part)
                    .context(format!("creating item for {}", name.display()))?;
            }

            let bytes = std::fs::read(file.path())
                .into_diagnostic()
                .context(format!("reading {}", file.path().display()))?;

            tree.set_int32(item, "size", bytes.len() as i32)?;
            tree.set_data(item, "data", bytes, true)?;
        }

        let out = if !self.overwrite {
            File::create_new(&self.file)
                .into_diagnostic()
                .context(format!("creating {}", &self.file.display()))?
        } else {
            File::create(&self.file)
                .into_diagnostic()
                .context(format!("creating {}", &self.file.display()))?
        };

        let writer = DbWriter::new(
            out,
            DbWriterOptions::builder()
                .compression(CompressionMethod::Zlib)
                .build(),
        );
        writer.save(&tree).context("finalizing database file")?;

        Ok(())
    }
}
