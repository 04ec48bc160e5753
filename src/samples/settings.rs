//! Shipping settings and account tax demos.

use crate::clients::HttpError;
use crate::content::{AccountTaxService, ShippingSettingsService};
use crate::error::SamplesError;
use crate::samples::builders::{
    apply_settings_patch, create_example_shipping_settings,
    create_example_shipping_settings_patch, create_example_tax_patch,
    create_example_tax_settings,
};
use crate::samples::output::{AccountTaxSummary, CarriersSummary, ShippingSettingsSummary};
use crate::session::ContentSession;

/// Replaces the account's shipping settings with the example ones, patches in
/// postal code groups and restores the original settings.
///
/// On a multi-client account, prints the settings of every sub-account
/// instead.
pub(super) async fn shipping_settings(session: &ContentSession) -> Result<(), SamplesError> {
    let merchant_id = session.merchant_id();
    let service = session.content().shippingsettings();

    if session.context().is_mca {
        println!("Printing shipping settings of subaccounts of {merchant_id}:");
        let count = service
            .list_all(merchant_id, None, |page| {
                for settings in page {
                    print!("{}", ShippingSettingsSummary(settings));
                }
            })
            .await?;
        if count == 0 {
            println!("No subaccounts found.");
        }
        println!();
        return Ok(());
    }

    println!("Retrieving original shipping settings:");
    let original = service.get(merchant_id, merchant_id).await?;
    print!("{}", ShippingSettingsSummary(&original));
    println!();

    println!("Retrieving supported carriers:");
    let carriers = service.get_supported_carriers(merchant_id).await?;
    print!("{}", CarriersSummary(&carriers));
    println!();

    let changed = replace_shipping_settings(service, merchant_id).await;

    print!("Replacing original shipping settings... ");
    let restored = service.update(merchant_id, merchant_id, &original).await;
    finish_restore(changed, restored)
}

async fn replace_shipping_settings(
    service: ShippingSettingsService<'_>,
    merchant_id: u64,
) -> Result<(), SamplesError> {
    print!("Setting new example shipping settings... ");
    let updated = service
        .update(merchant_id, merchant_id, &create_example_shipping_settings())
        .await?;
    println!("done.");
    print!("{}", ShippingSettingsSummary(&updated));
    println!();

    println!("Patching new example shipping settings to add postal code groups...");
    let current = service.get(merchant_id, merchant_id).await?;
    let patched = apply_settings_patch(&current, &create_example_shipping_settings_patch());
    let patched = service.update(merchant_id, merchant_id, &patched).await?;
    println!("done.");
    print!("{}", ShippingSettingsSummary(&patched));
    println!();
    Ok(())
}

/// Replaces the account's tax settings with the example ones, adds a rule and
/// restores the original settings.
///
/// On a multi-client account, prints the tax settings of every sub-account
/// instead.
pub(super) async fn account_tax(session: &ContentSession) -> Result<(), SamplesError> {
    let merchant_id = session.merchant_id();
    let service = session.content().accounttax();

    if session.context().is_mca {
        println!("Printing tax settings of subaccounts of {merchant_id}:");
        let count = service
            .list_all(merchant_id, None, |page| {
                for tax in page {
                    print!("{}", AccountTaxSummary(tax));
                }
            })
            .await?;
        if count == 0 {
            println!("No subaccounts found.");
        }
        println!();
        return Ok(());
    }

    print!("Retrieving original tax settings... ");
    let original = service.get(merchant_id, merchant_id).await?;
    println!("done.");
    print!("{}", AccountTaxSummary(&original));
    println!();

    let changed = replace_tax_settings(service, merchant_id).await;

    print!("Restoring original tax settings... ");
    let restored = service.update(merchant_id, merchant_id, &original).await;
    finish_restore(changed, restored)
}

async fn replace_tax_settings(
    service: AccountTaxService<'_>,
    merchant_id: u64,
) -> Result<(), SamplesError> {
    print!("Setting new tax settings... ");
    let updated = service
        .update(merchant_id, merchant_id, &create_example_tax_settings())
        .await?;
    println!("done.");
    print!("{}", AccountTaxSummary(&updated));
    println!();

    print!("Adding a tax rule to the new settings... ");
    let patched = service
        .update(merchant_id, merchant_id, &create_example_tax_patch(&updated))
        .await?;
    println!("done.");
    print!("{}", AccountTaxSummary(&patched));
    println!();
    Ok(())
}

/// Reports the restore of the original settings.
///
/// The restore also runs after a failed change. Its own failure is then only
/// logged, and the error from the change is returned.
fn finish_restore<T>(
    changed: Result<(), SamplesError>,
    restored: Result<T, HttpError>,
) -> Result<(), SamplesError> {
    match (changed, restored) {
        (Ok(()), Ok(_)) => {
            println!("done.");
            Ok(())
        }
        (Ok(()), Err(e)) => {
            println!("failed.");
            Err(e.into())
        }
        (Err(e), Ok(_)) => {
            println!("done.");
            Err(e)
        }
        (Err(e), Err(restore)) => {
            println!("failed.");
            tracing::warn!("Could not restore the original settings: {restore}");
            Err(e)
        }
    }
}
