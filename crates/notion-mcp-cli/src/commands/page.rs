//! Page and block commands

use super::{connect, print_json, read_content};
use crate::app::{AppendArgs, CreatePageArgs, UpdatePageArgs};
use anyhow::Result;
use notion_mcp::params::{AppendBlockParams, CreatePageParams, IconParam, UpdatePageParams};
use notion_mcp_core::{BlockKind, Config, NotionError};

pub async fn run_create(args: CreatePageArgs, config: Config) -> Result<()> {
    let mut params = CreatePageParams::new(args.parent_id, args.title);
    params.content = args.content.as_deref().map(read_content).transpose()?;
    params.icon = args.icon.map(|emoji| IconParam::Emoji { emoji });

    let sdk = connect(config)?;
    print_json(&sdk.create_page(&params).await?)
}

pub async fn run_update(args: UpdatePageArgs, config: Config) -> Result<()> {
    let mut params = UpdatePageParams::new(args.page_id);
    params.title = args.title;
    params.content = args.content.as_deref().map(read_content).transpose()?;
    params.archived = match (args.archive, args.restore) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };

    let sdk = connect(config)?;
    print_json(&sdk.update_page(&params).await?)
}

pub async fn run_append(args: AppendArgs, config: Config) -> Result<()> {
    let kind = parse_block_kind(&args.block_type)?;
    let content = read_content(&args.content)?;

    let sdk = connect(config)?;
    let params = AppendBlockParams::new(args.page_id, content, kind);
    print_json(&sdk.append_block(&params).await?)
}

/// Unlike the tool, the CLI rejects unknown block types
fn parse_block_kind(name: &str) -> Result<BlockKind> {
    BlockKind::ALL
        .into_iter()
        .find(|kind| kind.as_str() == name)
        .ok_or_else(|| {
            let known: Vec<&str> = BlockKind::ALL.iter().map(|k| k.as_str()).collect();
            NotionError::InvalidInput(format!(
                "unknown block type '{}' (expected one of: {})",
                name,
                known.join(", ")
            ))
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_block_kind() {
        assert_eq!(parse_block_kind("heading_2").unwrap(), BlockKind::Heading2);
        assert_eq!(parse_block_kind("to_do").unwrap(), BlockKind::ToDo);

        let err = parse_block_kind("table").unwrap_err();
        assert!(err.to_string().contains("unknown block type 'table'"));
        assert!(err.downcast_ref::<NotionError>().is_some());
    }
}
