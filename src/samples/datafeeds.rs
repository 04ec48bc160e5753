//! Datafeed demos.

use crate::content::{DatafeedBatchEntry, DatafeedBatchResult};
use crate::error::SamplesError;
use crate::retry::{retry, RetryPolicy};
use crate::samples::builders::create_example_datafeed;
use crate::samples::output::{ContentErrors, DatafeedLine};
use crate::session::ContentSession;

const BATCH_SIZE: u32 = 5;

async fn list_datafeeds(session: &ContentSession) -> Result<(), SamplesError> {
    println!("Listing datafeeds:");
    session
        .content()
        .datafeeds()
        .list_all(session.merchant_id(), None, |page| {
            for feed in page {
                print!("{}", DatafeedLine(feed));
            }
        })
        .await?;
    println!();
    Ok(())
}

fn print_batch_results(results: &[DatafeedBatchResult]) {
    for result in results {
        match &result.errors {
            Some(errors) => {
                println!("Item {} in batch failed.", result.batch_id);
                print!(
                    "{}",
                    ContentErrors {
                        errors: &errors.errors,
                        is_error: true,
                    }
                );
            }
            None => println!("Item {} in batch succeeded.", result.batch_id),
        }
    }
}

/// Inserts an example datafeed, lists datafeeds, reads it back and removes it.
pub(super) async fn datafeeds(session: &ContentSession) -> Result<(), SamplesError> {
    let merchant_id = session.merchant_id();
    let datafeeds = session.content().datafeeds();

    let name = format!("feed{}", session.unique_id());
    print!("Inserting datafeed with filename {name}... ");
    let inserted = datafeeds
        .insert(merchant_id, &create_example_datafeed(&name))
        .await?;
    println!("done.");
    let feed_id = inserted
        .id
        .ok_or_else(|| SamplesError::UnexpectedResponse("inserted datafeed has no ID".to_string()))?;
    println!("New feed ID: {feed_id}");
    println!();

    list_datafeeds(session).await?;

    print!("Retrieving datafeed {feed_id}... ");
    retry(&RetryPolicy::default(), || datafeeds.get(merchant_id, feed_id)).await?;
    println!("done.");

    print!("Removing datafeed {feed_id}... ");
    datafeeds.delete(merchant_id, feed_id).await?;
    println!("done.");
    println!();
    Ok(())
}

/// Inserts several example datafeeds in one batch, lists datafeeds and
/// removes the inserted ones in a second batch.
pub(super) async fn datafeeds_batch(session: &ContentSession) -> Result<(), SamplesError> {
    let merchant_id = session.merchant_id();
    let datafeeds = session.content().datafeeds();

    let entries: Vec<DatafeedBatchEntry> = (1..=BATCH_SIZE)
        .map(|batch_id| {
            let name = format!("feed{}", session.unique_id());
            DatafeedBatchEntry::insert(batch_id, merchant_id, create_example_datafeed(&name))
        })
        .collect();

    print!("Inserting {} datafeeds... ", entries.len());
    let results = datafeeds.custombatch(&entries).await?;
    println!("done.");
    print_batch_results(&results);
    println!();

    let inserted: Vec<u64> = results
        .iter()
        .filter(|result| result.errors.is_none())
        .filter_map(|result| result.datafeed.as_ref().and_then(|feed| feed.id))
        .collect();

    list_datafeeds(session).await?;

    if inserted.is_empty() {
        println!("No datafeeds were inserted, nothing to remove.");
        return Ok(());
    }

    let entries: Vec<DatafeedBatchEntry> = (1..)
        .zip(&inserted)
        .map(|(batch_id, feed_id)| DatafeedBatchEntry::delete(batch_id, merchant_id, *feed_id))
        .collect();

    print!("Removing {} datafeeds... ", entries.len());
    let results = datafeeds.custombatch(&entries).await?;
    println!("done.");
    print_batch_results(&results);
    Ok(())
}
