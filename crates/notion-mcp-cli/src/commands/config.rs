//! Config inspection

use super::print_json;
use crate::app::{ConfigAction, ConfigArgs};
use anyhow::Result;
use notion_mcp_core::Config;
use std::path::Path;

pub fn run(args: ConfigArgs, config: Config, path: Option<&Path>) -> Result<()> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(Config::default_path);

    match args.action {
        ConfigAction::Show => print_json(&redacted(config)),
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Init => {
            config.save_to(&path)?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        }
    }
}

fn redacted(mut config: Config) -> Config {
    if !config.token.is_empty() {
        config.token = "***".to_string();
    }
    config
}
