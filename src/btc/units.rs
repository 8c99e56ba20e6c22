//! Whole-unit (BTC) and smallest-unit (satoshi) conversion

use bitcoin::{Amount, Denomination};

use crate::error::{GuideError, Result};

/// Convert a decimal BTC amount to satoshis (`"0.001"` -> `"100000"`)
pub fn bitcoins_to_satoshis(btc: &str) -> Result<String> {
    let btc = btc.trim();
    if btc.is_empty() {
        return Err(GuideError::MissingInput("amount in BTC"));
    }
    let amount = Amount::from_str_in(btc, Denomination::Bitcoin)
        .map_err(|e| GuideError::InvalidAmount(e.to_string()))?;
    Ok(amount.to_sat().to_string())
}

/// Convert an integer satoshi amount to BTC (`"100000"` -> `"0.001"`)
pub fn satoshis_to_bitcoins(sats: &str) -> Result<String> {
    let sats = sats.trim();
    if sats.is_empty() {
        return Err(GuideError::MissingInput("amount in satoshis"));
    }
    let amount = Amount::from_str_in(sats, Denomination::Satoshi)
        .map_err(|e| GuideError::InvalidAmount(e.to_string()))?;
    Ok(format_btc(amount))
}

/// Render an amount in BTC with trailing zeros trimmed
pub fn format_btc(amount: Amount) -> String {
    amount.to_string_in(Denomination::Bitcoin)
}
