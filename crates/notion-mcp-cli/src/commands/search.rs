//! Search and workspace commands

use super::{connect, print_json};
use crate::app::SearchArgs;
use anyhow::Result;
use notion_mcp::params::SearchParams;
use notion_mcp_core::Config;

pub async fn run(args: SearchArgs, config: Config) -> Result<()> {
    let sdk = connect(config)?;
    print_json(&sdk.search(&build_params(args)).await?)
}

pub async fn run_workspace(config: Config) -> Result<()> {
    let sdk = connect(config)?;
    print_json(&sdk.workspace_info().await?)
}

fn build_params(args: SearchArgs) -> SearchParams {
    let query = args.query.join(" ");
    let (sort_by, sort_order) = if args.recent {
        (
            Some("last_edited_time".to_string()),
            Some("descending".to_string()),
        )
    } else {
        (None, None)
    };

    SearchParams {
        query: (!query.is_empty()).then_some(query),
        filter: args.filter.map(Into::into),
        sort_by,
        sort_order,
        start_cursor: args.cursor,
        page_size: args.limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ObjectFilter;
    use notion_mcp_core::model::ObjectKind;

    fn args(query: &[&str]) -> SearchArgs {
        SearchArgs {
            query: query.iter().map(|s| s.to_string()).collect(),
            filter: None,
            limit: None,
            recent: false,
            cursor: None,
        }
    }

    #[test]
    fn test_query_words_are_joined() {
        let params = build_params(args(&["weekly", "notes"]));
        assert_eq!(params.query.as_deref(), Some("weekly notes"));
        assert!(params.sort().is_none());
    }

    #[test]
    fn test_empty_query_lists_everything() {
        let mut search = args(&[]);
        search.filter = Some(ObjectFilter::Database);
        search.recent = true;

        let params = build_params(search);
        assert_eq!(params.query, None);
        assert_eq!(params.filter, Some(ObjectKind::Database));
        assert!(params.sort().is_some());
    }
}
