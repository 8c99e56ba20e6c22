//! Address validation

use std::str::FromStr;

use bitcoin::address::NetworkUnchecked;
use bitcoin::Address;

use crate::error::{GuideError, Result};
use crate::network::NetworkSelection;

/// Check that `address` decodes and belongs to `network`.
///
/// Returns `None` when the address is valid, otherwise a description of
/// the problem.
pub fn validate_address(address: &str, network: NetworkSelection) -> Option<String> {
    let address = address.trim();
    if address.is_empty() {
        return Some("Address cannot be blank.".to_string());
    }

    let unchecked = match Address::<NetworkUnchecked>::from_str(address) {
        Ok(a) => a,
        Err(e) => return Some(format!("Address is invalid: {}", e)),
    };

    if !unchecked.is_valid_for_network(network.to_bitcoin_network()) {
        return Some(format!(
            "Address is not valid for {}.",
            network.display_name()
        ));
    }

    None
}

/// Parse an address and require it to match the selected network
pub fn parse_address(address: &str, network: NetworkSelection) -> Result<Address> {
    let address = address.trim();
    if address.is_empty() {
        return Err(GuideError::MissingInput("address"));
    }

    Address::<NetworkUnchecked>::from_str(address)
        .map_err(|e| GuideError::InvalidAddress(e.to_string()))?
        .require_network(network.to_bitcoin_network())
        .map_err(|e| GuideError::InvalidAddress(e.to_string()))
}
