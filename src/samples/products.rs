//! Product, product status and inventory demos.

use crate::content::{InventorySetRequest, Price, Product, ProductBatchEntry, ProductBatchResult};
use crate::error::SamplesError;
use crate::retry::{retry, RetryPolicy};
use crate::samples::builders::create_example_product;
use crate::samples::output::{ContentErrors, ProductLine, ProductStatusSummary};
use crate::session::ContentSession;

const BATCH_SIZE: u32 = 4;

fn new_offer_id(session: &ContentSession) -> String {
    format!("book#test{}", session.unique_id())
}

fn example_product(session: &ContentSession, offer_id: &str) -> Product {
    create_example_product(session.context().website_url.as_deref(), offer_id)
}

fn inserted_id(product: &Product) -> Result<String, SamplesError> {
    product
        .id
        .clone()
        .ok_or_else(|| SamplesError::UnexpectedResponse("inserted product has no ID".to_string()))
}

async fn list_products(session: &ContentSession) -> Result<(), SamplesError> {
    println!("Listing products:");
    session
        .content()
        .products()
        .list_all(session.merchant_id(), None, |page| {
            for product in page {
                print!("{}", ProductLine(product));
            }
        })
        .await?;
    println!();
    Ok(())
}

fn print_batch_results(results: &[ProductBatchResult]) {
    for result in results {
        if let Some(errors) = &result.errors {
            println!("Item {} in batch failed.", result.batch_id);
            print!(
                "{}",
                ContentErrors {
                    errors: &errors.errors,
                    is_error: true,
                }
            );
        } else {
            println!("Item {} in batch succeeded.", result.batch_id);
            if let Some(product) = &result.product {
                print!(
                    "{}",
                    ContentErrors {
                        errors: &product.warnings,
                        is_error: false,
                    }
                );
            }
        }
    }
}

/// Inserts the example product, lists products, reads it back and deletes it.
pub(super) async fn products(session: &ContentSession) -> Result<(), SamplesError> {
    session.context().require_non_mca()?;
    let merchant_id = session.merchant_id();
    let products = session.content().products();

    let offer_id = new_offer_id(session);
    print!("Inserting product with offerId {offer_id}... ");
    let inserted = products
        .insert(merchant_id, &example_product(session, &offer_id))
        .await?;
    println!("done.");
    print!(
        "{}",
        ContentErrors {
            errors: &inserted.warnings,
            is_error: false,
        }
    );
    let product_id = inserted_id(&inserted)?;

    list_products(session).await?;

    print!("Retrieving product ID {product_id}... ");
    let product = retry(&RetryPolicy::default(), || {
        products.get(merchant_id, &product_id)
    })
    .await?;
    println!("done.");
    println!(
        "Retrieved product {} with title {}",
        product.id.as_deref().unwrap_or_default(),
        product.title.as_deref().unwrap_or_default()
    );

    print!("Deleting product ID {product_id}... ");
    products.delete(merchant_id, &product_id).await?;
    println!("done.");
    Ok(())
}

/// Inserts several example products in one batch, lists products and
/// deletes the inserted ones in a second batch.
pub(super) async fn products_batch(session: &ContentSession) -> Result<(), SamplesError> {
    session.context().require_non_mca()?;
    let merchant_id = session.merchant_id();
    let products = session.content().products();

    let entries: Vec<ProductBatchEntry> = (1..=BATCH_SIZE)
        .map(|batch_id| {
            let product = example_product(session, &new_offer_id(session));
            ProductBatchEntry::insert(batch_id, merchant_id, product)
        })
        .collect();

    print!("Inserting {} products... ", entries.len());
    let results = products.custombatch(&entries).await?;
    println!("done.");
    print_batch_results(&results);
    println!();

    let inserted: Vec<String> = results
        .iter()
        .filter(|result| result.errors.is_none())
        .filter_map(|result| result.product.as_ref().and_then(|p| p.id.clone()))
        .collect();

    list_products(session).await?;

    if inserted.is_empty() {
        println!("No products were inserted, nothing to delete.");
        return Ok(());
    }

    let entries: Vec<ProductBatchEntry> = (1..)
        .zip(&inserted)
        .map(|(batch_id, product_id)| {
            ProductBatchEntry::delete(batch_id, merchant_id, product_id.as_str())
        })
        .collect();

    print!("Deleting {} products... ", entries.len());
    let results = products.custombatch(&entries).await?;
    println!("done.");
    print_batch_results(&results);
    Ok(())
}

/// Lists the status of every product.
pub(super) async fn product_statuses(session: &ContentSession) -> Result<(), SamplesError> {
    session.context().require_non_mca()?;

    println!("Listing product statuses:");
    let count = session
        .content()
        .productstatuses()
        .list_all(session.merchant_id(), None, |page| {
            for status in page {
                print!("{}", ProductStatusSummary(status));
            }
        })
        .await?;
    if count == 0 {
        println!("No products found.");
    }
    println!();
    Ok(())
}

fn print_price_and_availability(product: &Product) {
    println!(
        "Retrieved product {} @ ({}, {})",
        product.id.as_deref().unwrap_or_default(),
        product.availability.as_deref().unwrap_or_default(),
        product.price.as_ref().map(ToString::to_string).unwrap_or_default()
    );
    println!();
}

/// Inserts the example product, changes its price and availability and
/// deletes it again.
pub(super) async fn inventory(session: &ContentSession) -> Result<(), SamplesError> {
    session.context().require_non_mca()?;
    let merchant_id = session.merchant_id();
    let products = session.content().products();

    let offer_id = new_offer_id(session);
    print!("Inserting product with offerId {offer_id}... ");
    let inserted = products
        .insert(merchant_id, &example_product(session, &offer_id))
        .await?;
    println!("done.");
    let product_id = inserted_id(&inserted)?;

    print!("Retrieving product ID {product_id}... ");
    let product = retry(&RetryPolicy::default(), || {
        products.get(merchant_id, &product_id)
    })
    .await?;
    println!("done.");
    print_price_and_availability(&product);

    let request = InventorySetRequest {
        price: Price::new("5.00", "USD"),
        availability: "out of stock".to_string(),
    };
    print!("Setting new price and availability... ");
    session
        .content()
        .inventory()
        .set(merchant_id, &product_id, &request)
        .await?;
    println!("done.");
    println!();

    print!("Retrieving product ID {product_id}... ");
    let product = products.get(merchant_id, &product_id).await?;
    println!("done.");
    print_price_and_availability(&product);

    print!("Deleting product ID {product_id}... ");
    products.delete(merchant_id, &product_id).await?;
    println!("done.");
    Ok(())
}
