use clap::Args;
use forge_fdb::Database;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};

#[derive(Args)]
pub struct InfoArgs {
    /// An input FDB file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let db = Database::new(f)?;
        let header = db.header();

        let (uncompressed, stored) = db
            .data_blocks()
            .iter()
            .fold((0u64, 0u64), |(uncompressed, stored), desc| {
                (
                    uncompressed + u64::from(desc.uncompressed),
                    stored + u64::from(desc.stored),
                )
            });

        println!("file size:        {} bytes", db.file_size());
        println!("strings:          {}", db.string_count());
        println!("data blocks:      {}", db.data_block_count());
        println!("item section:     {:#x}", header.item_offset);
        println!("data desc table:  {:#x}", header.data_desc_offset);
        println!("data section:     {:#x}", header.data_offset);
        println!("payload bytes:    {uncompressed} uncompressed, {stored} stored");

        Ok(())
    }
}
