//! Network selection shared by every guide page

use bitcoin::Network;
use serde::{Deserialize, Serialize};

use crate::error::GuideError;

/// Network chosen in the guide. Testnet unless configured otherwise.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkSelection {
    Mainnet,
    #[default]
    Testnet,
}

impl NetworkSelection {
    pub fn to_bitcoin_network(&self) -> Network {
        match self {
            Self::Mainnet => Network::Bitcoin,
            Self::Testnet => Network::Testnet,
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Self::Mainnet)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Mainnet => "Mainnet",
            Self::Testnet => "Testnet",
        }
    }

    pub fn all() -> &'static [NetworkSelection] {
        &[Self::Mainnet, Self::Testnet]
    }

    /// Position in [`NetworkSelection::all`]
    pub fn index(&self) -> usize {
        match self {
            Self::Mainnet => 0,
            Self::Testnet => 1,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Mainnet => Self::Testnet,
            Self::Testnet => Self::Mainnet,
        }
    }
}

impl std::fmt::Display for NetworkSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for NetworkSelection {
    type Err = GuideError;

    /// Parse a network name. Accepts the same spellings as the config file.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            other => Err(GuideError::UnknownNetwork(other.to_string())),
        }
    }
}
