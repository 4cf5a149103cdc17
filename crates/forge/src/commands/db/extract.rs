use clap::Args;
use forge_fdb::{Database, Item, Value};
use miette::{Context, IntoDiagnostic, Result};
use std::io::Write;
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use tracing::info;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input FDB file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let db = Database::new(f)?;

        self.extract_item(db.root(), Path::new("").to_path_buf())
    }

    fn extract_item(&self, item: Item<'_>, path: PathBuf) -> Result<()> {
        for index in 0..item.attribute_count()? {
            let (key, value) = item.attribute_at(index)?;
            let Value::Blob(block) = value else {
                continue;
            };

            let target = self.directory.join(&path).join(key);
            info!("writing {}", target.display());

            if let Some(parent) = target.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let mut out = if !self.overwrite {
                File::create_new(&target)
                    .into_diagnostic()
                    .context(format!("creating {}", &target.display()))?
            } else {
                File::create(&target)
                    .into_diagnostic()
                    .context(format!("creating {}", &target.display()))?
            };

            out.write_all(&block.bytes()?).into_diagnostic()?;
        }

        for index in 0..item.child_count()? {
            let child = item.child_at(index)?;
            let name = child.name()?;
            self.extract_item(child, path.join(name))?;
        }

        Ok(())
    }
}
