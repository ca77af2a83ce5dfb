use std::io::Write;

use catalog_app::domain::products::{ProductsService, data::ProductUpdate};
use clap::Args;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::write_error;

#[derive(Debug, Args)]
pub(crate) struct UpdateProductArgs {
    /// Product UUID
    #[arg(long)]
    uuid: Uuid,

    /// New display name
    #[arg(long)]
    name: String,

    /// New unit price
    #[arg(long)]
    price: Decimal,

    /// New category
    #[arg(long)]
    category_id: String,
}

pub(crate) async fn run(
    args: UpdateProductArgs,
    service: &dyn ProductsService,
    out: &mut impl Write,
) -> Result<(), String> {
    let uuid = service
        .update_product(ProductUpdate {
            uuid: args.uuid.into(),
            name: args.name,
            price: args.price,
            category_id: args.category_id,
        })
        .await
        .map_err(|error| format!("failed to update product: {error}"))?;

    writeln!(out, "product_uuid: {uuid}").map_err(write_error)
}
