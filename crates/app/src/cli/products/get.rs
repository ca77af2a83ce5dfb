use std::io::Write;

use catalog_app::domain::products::ProductsService;
use clap::Args;
use uuid::Uuid;

use super::write_json;

#[derive(Debug, Args)]
pub(crate) struct GetProductArgs {
    /// Product UUID
    #[arg(long)]
    uuid: Uuid,
}

pub(crate) async fn run(
    args: GetProductArgs,
    service: &dyn ProductsService,
    out: &mut impl Write,
) -> Result<(), String> {
    let product = service
        .get_product(args.uuid.into())
        .await
        .map_err(|error| format!("failed to get product: {error}"))?;

    write_json(out, &product)
}
