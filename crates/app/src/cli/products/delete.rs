use std::io::Write;

use catalog_app::domain::products::ProductsService;
use clap::Args;
use uuid::Uuid;

use super::write_error;

#[derive(Debug, Args)]
pub(crate) struct DeleteProductArgs {
    /// Product UUID
    #[arg(long)]
    uuid: Uuid,
}

pub(crate) async fn run(
    args: DeleteProductArgs,
    service: &dyn ProductsService,
    out: &mut impl Write,
) -> Result<(), String> {
    service
        .delete_product(args.uuid.into())
        .await
        .map_err(|error| format!("failed to delete product: {error}"))?;

    writeln!(out, "deleted: {}", args.uuid).map_err(write_error)
}
