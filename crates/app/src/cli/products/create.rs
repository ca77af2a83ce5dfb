use std::io::Write;

use catalog_app::domain::products::{ProductsService, data::NewProduct};
use clap::Args;
use rust_decimal::Decimal;

use super::write_error;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product display name
    #[arg(long)]
    name: String,

    /// Unit price, e.g. 9.99
    #[arg(long)]
    price: Decimal,

    /// Category the product belongs to
    #[arg(long)]
    category_id: String,
}

pub(crate) async fn run(
    args: CreateProductArgs,
    service: &dyn ProductsService,
    out: &mut impl Write,
) -> Result<(), String> {
    let uuid = service
        .create_product(NewProduct {
            name: args.name,
            price: args.price,
            category_id: args.category_id,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    writeln!(out, "product_uuid: {uuid}").map_err(write_error)
}
