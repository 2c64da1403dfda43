//! Catalog command handler.
//!
//! Lists models or MCP servers through a `CatalogQuery`.

use anyhow::Result;

use assetdeck_core::{
    CatalogQuery, CatalogView, McpServerAsset, ModelAsset, Settings, SortDirection, SortKey,
};

use crate::bootstrap::CliContext;
use crate::commands::{CatalogCommand, ListArgs};
use crate::presentation::{format_optional, print_separator, truncate_string};

pub fn execute(ctx: &CliContext, command: CatalogCommand) -> Result<()> {
    match command {
        CatalogCommand::Models(args) => {
            let view = build_query(&args, &ctx.settings).project(ctx.catalog.models());
            print_models(&view);
        }
        CatalogCommand::Servers(args) => {
            let view = build_query(&args, &ctx.settings).project(ctx.catalog.mcp_servers());
            print_servers(&view);
        }
    }
    Ok(())
}

/// Translate listing arguments into a query.
pub fn build_query(args: &ListArgs, settings: &Settings) -> CatalogQuery {
    let page_size = args.page_size.unwrap_or_else(|| settings.effective_page_size());
    let mut query = CatalogQuery::new(page_size);
    for (attribute, value) in &args.filters {
        query.add_filter(*attribute, value.clone());
    }
    if let Some(key) = args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        query.set_sort(key, direction);
    } else if args.desc {
        query.set_sort(SortKey::Name, SortDirection::Descending);
    }
    query.set_page(args.page);
    query
}

fn print_footer<T>(view: &CatalogView<T>) {
    let page = &view.page;
    println!(
        "\nPage {} of {} ({} total)",
        page.page,
        page.total_pages().max(1),
        page.total_items
    );
}

fn print_models(view: &CatalogView<ModelAsset>) {
    if let Some(empty) = view.empty_state {
        println!("{empty}.");
        return;
    }

    println!(
        "{:<32} {:<28} {:<10} {:<9} {:<16} Endpoint",
        "Key", "Name", "Status", "Version", "Use case"
    );
    print_separator(120);

    for model in &view.page.items {
        println!(
            "{:<32} {:<28} {:<10} {:<9} {:<16} {}",
            truncate_string(&format!("model:{}", model.id), 31),
            truncate_string(&model.name, 27),
            truncate_string(&model.details.status, 9),
            truncate_string(&model.details.version, 8),
            truncate_string(&model.details.use_case, 15),
            format_optional(model.external_endpoint.as_deref(), "--"),
        );
    }
    if view.page.items.is_empty() {
        println!("(no entries on this page)");
    }
    print_footer(view);
}

fn print_servers(view: &CatalogView<McpServerAsset>) {
    if let Some(empty) = view.empty_state {
        println!("{empty}.");
        return;
    }

    println!(
        "{:<24} {:<16} {:<10} {:<9} {:<6} Description",
        "Key", "Name", "Status", "Version", "Tools"
    );
    print_separator(100);

    for server in &view.page.items {
        println!(
            "{:<24} {:<16} {:<10} {:<9} {:<6} {}",
            truncate_string(&format!("mcp:{}", server.id), 23),
            truncate_string(&server.name, 15),
            truncate_string(&server.details.status, 9),
            truncate_string(&server.details.version, 8),
            server.tools.len(),
            truncate_string(&server.details.description, 40),
        );
    }
    if view.page.items.is_empty() {
        println!("(no entries on this page)");
    }
    print_footer(view);
}
