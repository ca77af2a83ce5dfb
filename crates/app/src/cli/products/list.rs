use std::io::Write;

use catalog_app::domain::products::{ProductsService, data::ProductListRequest};
use clap::Args;

use super::write_json;

#[derive(Debug, Args)]
pub(crate) struct ListProductsArgs {
    /// Rows to skip
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset: i64,

    /// Page size; zero or less uses the default of 10
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    limit: i64,

    /// Only list products whose name contains this text (case-insensitive)
    #[arg(long)]
    search: Option<String>,
}

pub(crate) async fn run(
    args: ListProductsArgs,
    service: &dyn ProductsService,
    out: &mut impl Write,
) -> Result<(), String> {
    let list = service
        .list_products(ProductListRequest {
            offset: args.offset,
            limit: args.limit,
            search: args.search,
        })
        .await
        .map_err(|error| format!("failed to list products: {error}"))?;

    write_json(out, &list)
}
