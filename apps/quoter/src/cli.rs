use std::path::PathBuf;

use clap::Parser;

use crate::state::ConfigOverrides;

#[derive(Debug, Parser)]
#[command(name = "quoter")]
#[command(about = "Configure and quote PACs HMI and PLC products", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: quoter.toml in the platform config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Price list JSON, overrides [catalog] path
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Print one JSON document per command instead of text
    #[arg(long)]
    pub json: bool,

    /// Order phone number in international form, overrides [order] phone
    #[arg(long)]
    pub phone: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            catalog_path: self.catalog.clone(),
            phone: self.phone.clone(),
        }
    }
}
