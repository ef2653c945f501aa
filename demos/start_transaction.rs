//! Start a transaction and look it up again.
//!
//! ```sh
//! PAYNL_API_TOKEN=... PAYNL_SERVICE_ID=SL-xxxx-xxxx cargo run --example start_transaction
//! ```

use paynl_kit::{
    client::PaynlClient,
    config::ClientConfig,
    transaction::{EndUser, Product, ProductType, TransactionStartOptions},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let api_token = std::env::var("PAYNL_API_TOKEN")?;
    let service_id = std::env::var("PAYNL_SERVICE_ID")?;

    let client = PaynlClient::new(
        ClientConfig::builder()
            .api_token(api_token)
            .service_id(service_id)
            .verbose(std::env::var("PAYNL_VERBOSE").is_ok())
            .build(),
    )?;

    let service = client.get_service().await?;
    tracing::info!(
        "Service has {} payment options",
        service["paymentOptions"]
            .as_object()
            .map(|options| options.len())
            .unwrap_or_default()
    );

    let options = TransactionStartOptions::builder()
        .amount(24.2)
        .return_url("https://shop.example.com/return")
        .ip_address("10.20.30.40")
        .description("Demo order")
        .test_mode(true)
        .products(vec![
            Product::builder()
                .id("DEMO-1")
                .name("Coffee beans")
                .price(24.2)
                .tax(4.2)
                .qty(1)
                .product_type(ProductType::Article)
                .build(),
        ])
        .enduser(
            EndUser::builder()
                .initials("J.")
                .last_name("Jansen")
                .email_address("j.jansen@example.com")
                .build(),
        )
        .build();

    let started = client.start_transaction(&options).await?;
    let Some(transaction_id) = started.transaction_id() else {
        return Err("no transaction id in response".into());
    };
    tracing::info!("Started transaction {transaction_id}");
    tracing::info!("Redirect the payer to {:?}", started.redirect_url());

    let info = client.get_transaction(transaction_id).await?;
    tracing::info!(
        "Transaction {} is {:?} ({:?})",
        transaction_id,
        info.status(),
        info.state_name()
    );

    Ok(())
}
