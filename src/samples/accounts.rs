//! Account and account status demos.

use crate::content::{Account, AccountAdsLink, AccountUser};
use crate::error::SamplesError;
use crate::retry::{retry, RetryPolicy};
use crate::samples::builders::create_example_account;
use crate::samples::output::{AccountStatusSummary, AccountSummary};
use crate::session::ContentSession;

/// Shows the account, then adds and removes the configured sample user and
/// Ads link. On a multi-client account, also adds and removes a sub-account.
pub(super) async fn accounts(session: &ContentSession) -> Result<(), SamplesError> {
    primary_account(session).await?;
    if session.context().is_mca {
        sub_accounts(session).await?;
    }
    Ok(())
}

async fn primary_account(session: &ContentSession) -> Result<(), SamplesError> {
    let merchant_id = session.merchant_id();
    let accounts = session.content().accounts();
    let sample_user = session.config().account_sample_user.as_deref();
    let sample_ads_id = session.config().account_sample_ads_cid;

    println!("Getting account information.");
    let mut account = accounts.get(merchant_id, merchant_id).await?;
    print!("{}", AccountSummary(&account));

    if sample_user.is_none() && sample_ads_id.is_none() {
        println!("No account changes available in sample configuration.");
        return Ok(());
    }

    if let Some(email) = sample_user {
        println!("Adding user {email}.");
        account.users.push(AccountUser {
            email_address: Some(email.to_string()),
            admin: Some(false),
        });
    }
    if let Some(ads_id) = sample_ads_id {
        println!("Linking Google Ads ID {ads_id}.");
        account.ads_links.push(AccountAdsLink {
            ads_id: Some(ads_id),
            status: Some("active".to_string()),
        });
    }

    println!("Updating account information.");
    let updated = accounts.update(merchant_id, merchant_id, &account).await?;
    print!("{}", AccountSummary(&updated));

    println!("Rolling back changes.");
    let mut reverted = updated;
    if let Some(email) = sample_user {
        println!("Removing user {email}.");
        reverted
            .users
            .retain(|user| user.email_address.as_deref() != Some(email));
    }
    if let Some(ads_id) = sample_ads_id {
        println!("Removing link to Google Ads ID {ads_id}.");
        reverted.ads_links.retain(|link| link.ads_id != Some(ads_id));
    }

    println!("Reverting account information.");
    let reverted = accounts.update(merchant_id, merchant_id, &reverted).await?;
    print!("{}", AccountSummary(&reverted));
    Ok(())
}

async fn print_sub_accounts(session: &ContentSession) -> Result<(), SamplesError> {
    let merchant_id = session.merchant_id();
    println!("Printing subaccounts of {merchant_id}:");
    session
        .content()
        .accounts()
        .list_all(merchant_id, None, |page| {
            for account in page {
                print!("{}", AccountSummary(account));
            }
        })
        .await?;
    println!();
    Ok(())
}

async fn sub_accounts(session: &ContentSession) -> Result<(), SamplesError> {
    session.context().require_mca()?;
    let merchant_id = session.merchant_id();
    let accounts = session.content().accounts();

    print_sub_accounts(session).await?;

    let name = format!("sampleAccount#{}", session.unique_id());
    println!("Adding subaccount with name {name}.");
    let inserted: Account = accounts
        .insert(merchant_id, &create_example_account(&name))
        .await?;
    let account_id = inserted.id.ok_or_else(|| {
        SamplesError::UnexpectedResponse("inserted subaccount has no ID".to_string())
    })?;
    println!("Subaccount added with ID {account_id}.");

    // New sub-accounts can take a while to become readable.
    println!("Retrieving subaccount with ID {account_id}.");
    let account = retry(&RetryPolicy::exponential(), || {
        accounts.get(merchant_id, account_id)
    })
    .await?;
    print!("{}", AccountSummary(&account));
    println!();

    print_sub_accounts(session).await?;

    println!("Removing subaccount with ID {account_id}.");
    accounts.delete(merchant_id, account_id).await?;
    println!("Subaccount removed.");

    print_sub_accounts(session).await
}

/// Shows the account's status and, on a multi-client account, the status of
/// every sub-account.
pub(super) async fn account_statuses(session: &ContentSession) -> Result<(), SamplesError> {
    let merchant_id = session.merchant_id();
    let statuses = session.content().accountstatuses();

    println!("Getting account status:");
    let status = statuses.get(merchant_id, merchant_id).await?;
    print!("{}", AccountStatusSummary(&status));

    if !session.context().is_mca {
        return Ok(());
    }

    println!("Printing statuses of subaccounts of {merchant_id}:");
    statuses
        .list_all(merchant_id, None, |page| {
            for status in page {
                print!("{}", AccountStatusSummary(status));
            }
        })
        .await?;
    println!();
    Ok(())
}
