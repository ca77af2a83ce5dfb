use std::io::{self, Write};

use catalog_app::domain::products::ProductsService;
use clap::{Args, Subcommand};
use serde::Serialize;

mod create;
mod delete;
mod get;
mod list;
mod update;

#[derive(Debug, Args)]
pub(crate) struct ProductsCommand {
    #[command(subcommand)]
    command: ProductsSubcommand,
}

#[derive(Debug, Subcommand)]
enum ProductsSubcommand {
    Create(create::CreateProductArgs),
    Get(get::GetProductArgs),
    List(list::ListProductsArgs),
    Update(update::UpdateProductArgs),
    Delete(delete::DeleteProductArgs),
}

pub(crate) async fn run(
    command: ProductsCommand,
    service: &dyn ProductsService,
    out: &mut impl Write,
) -> Result<(), String> {
    match command.command {
        ProductsSubcommand::Create(args) => create::run(args, service, out).await,
        ProductsSubcommand::Get(args) => get::run(args, service, out).await,
        ProductsSubcommand::List(args) => list::run(args, service, out).await,
        ProductsSubcommand::Update(args) => update::run(args, service, out).await,
        ProductsSubcommand::Delete(args) => delete::run(args, service, out).await,
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), String> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|error| format!("failed to write output: {error}"))?;

    writeln!(out).map_err(write_error)
}

fn write_error(error: io::Error) -> String {
    format!("failed to write output: {error}")
}

#[cfg(test)]
mod tests {
    use catalog_app::domain::products::{
        MockProductsService, ProductsServiceError,
        records::{ProductList, ProductRecord, ProductUuid},
    };
    use clap::Parser;
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Debug, Subcommand)]
    enum TestCommands {
        Products(ProductsCommand),
    }

    fn parse(args: &[&str]) -> Result<ProductsCommand, clap::Error> {
        let cli = TestCli::try_parse_from(["catalog-app", "products"].iter().chain(args))?;

        let TestCommands::Products(command) = cli.command;

        Ok(command)
    }

    async fn execute(args: &[&str], service: &MockProductsService) -> io::Result<String> {
        let command = parse(args).map_err(io::Error::other)?;
        let mut out = Vec::new();

        run(command, service, &mut out)
            .await
            .map_err(io::Error::other)?;

        String::from_utf8(out).map_err(io::Error::other)
    }

    fn make_product(uuid: ProductUuid, name: &str) -> ProductRecord {
        ProductRecord {
            uuid,
            name: name.to_string(),
            price: Decimal::new(999, 2),
            category_id: "c1".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[tokio::test]
    async fn create_passes_fields_and_prints_uuid() -> TestResult {
        let uuid = ProductUuid::new();
        let mut service = MockProductsService::new();

        service
            .expect_create_product()
            .once()
            .withf(|product| {
                product.name == "Widget"
                    && product.price == Decimal::new(999, 2)
                    && product.category_id == "c1"
            })
            .return_once(move |_| Ok(uuid));

        let output = execute(
            &[
                "create",
                "--name",
                "Widget",
                "--price",
                "9.99",
                "--category-id",
                "c1",
            ],
            &service,
        )
        .await?;

        assert_eq!(output, format!("product_uuid: {uuid}\n"));

        Ok(())
    }

    #[tokio::test]
    async fn get_prints_product_as_json() -> TestResult {
        let uuid = ProductUuid::new();
        let mut service = MockProductsService::new();

        service
            .expect_get_product()
            .once()
            .withf(move |product| *product == uuid)
            .return_once(move |_| Ok(make_product(uuid, "Widget")));

        let output = execute(&["get", "--uuid", &uuid.to_string()], &service).await?;
        let json: serde_json::Value = serde_json::from_str(&output)?;

        assert_eq!(json["uuid"], uuid.to_string());
        assert_eq!(json["name"], "Widget");
        assert_eq!(json["price"], "9.99");
        assert_eq!(json["category_id"], "c1");

        Ok(())
    }

    #[tokio::test]
    async fn get_reports_not_found() -> TestResult {
        let mut service = MockProductsService::new();

        service
            .expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let uuid = ProductUuid::new().to_string();
        let result = execute(&["get", "--uuid", &uuid], &service).await;

        let error = result.err().map(|error| error.to_string());

        assert_eq!(
            error.as_deref(),
            Some("failed to get product: product not found")
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_forwards_paging_and_search() -> TestResult {
        let uuid = ProductUuid::new();
        let mut service = MockProductsService::new();

        service
            .expect_list_products()
            .once()
            .withf(|request| {
                request.offset == -1
                    && request.limit == 5
                    && request.search.as_deref() == Some("wid")
            })
            .return_once(move |_| {
                Ok(ProductList {
                    count: 7,
                    products: vec![make_product(uuid, "Widget")],
                })
            });

        let output = execute(
            &["list", "--offset", "-1", "--limit", "5", "--search", "wid"],
            &service,
        )
        .await?;
        let json: serde_json::Value = serde_json::from_str(&output)?;

        assert_eq!(json["count"].as_u64(), Some(7));
        assert_eq!(json["products"][0]["uuid"], uuid.to_string());

        Ok(())
    }

    #[tokio::test]
    async fn update_passes_all_fields() -> TestResult {
        let uuid = ProductUuid::new();
        let mut service = MockProductsService::new();

        service
            .expect_update_product()
            .once()
            .withf(move |update| {
                update.uuid == uuid
                    && update.name == "Gizmo"
                    && update.price == Decimal::new(1250, 2)
                    && update.category_id == "c2"
            })
            .return_once(|update| Ok(update.uuid));

        let output = execute(
            &[
                "update",
                "--uuid",
                &uuid.to_string(),
                "--name",
                "Gizmo",
                "--price",
                "12.50",
                "--category-id",
                "c2",
            ],
            &service,
        )
        .await?;

        assert_eq!(output, format!("product_uuid: {uuid}\n"));

        Ok(())
    }

    #[tokio::test]
    async fn delete_confirms_uuid() -> TestResult {
        let uuid = ProductUuid::new();
        let mut service = MockProductsService::new();

        service
            .expect_delete_product()
            .once()
            .withf(move |product| *product == uuid)
            .return_once(|_| Ok(()));

        let output = execute(&["delete", "--uuid", &uuid.to_string()], &service).await?;

        assert_eq!(output, format!("deleted: {uuid}\n"));

        Ok(())
    }

    #[tokio::test]
    async fn storage_errors_are_reported() -> TestResult {
        let mut service = MockProductsService::new();

        service
            .expect_delete_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let uuid = ProductUuid::new().to_string();
        let result = execute(&["delete", "--uuid", &uuid], &service).await;

        assert_eq!(
            result.err().map(|error| error.to_string()).as_deref(),
            Some("failed to delete product: storage error")
        );

        Ok(())
    }
}
