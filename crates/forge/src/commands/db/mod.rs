pub mod dump;
pub mod extract;
pub mod info;
pub mod pack;

#[derive(clap::Subcommand)]
pub enum DbCommands {
    /// Print header statistics for a database
    Info(info::InfoArgs),
    /// Print the item tree of a database
    Dump(dump::DumpArgs),
    /// Extract every data payload of a database into a directory
    Extract(extract::ExtractArgs),
    /// Pack a directory into a database
    Pack(pack::PackArgs),
}

impl DbCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            DbCommands::Info(info) => info.handle(),
            DbCommands::Dump(dump) => dump.handle(),
            DbCommands::Extract(extract) => extract.handle(),
            DbCommands::Pack(pack) => pack.handle(),
        }
    }
}
