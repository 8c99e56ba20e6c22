//! Page routes

use crate::guide::GuideAction;

/// A page of the guide, addressed by a URL-like path
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Route {
    #[default]
    Home,
    Bitcoin,
    Psbt,
}

impl Route {
    pub fn all() -> &'static [Route] {
        &[Self::Home, Self::Bitcoin, Self::Psbt]
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Bitcoin => "/bitcoin",
            Self::Psbt => "/psbt",
        }
    }

    /// Sidebar label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Bitcoin => "Bitcoin",
            Self::Psbt => "PSBT",
        }
    }

    /// Page header
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Bitcoin => "Bitcoin Guide",
            Self::Psbt => "PSBT Guide",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            Self::Home => "Overview of the available guides.",
            Self::Bitcoin => {
                "Addresses, public keys, BIP32 paths, units, fees, multisig and signatures."
            }
            Self::Psbt => "Create, sign and inspect Partially Signed Bitcoin Transactions.",
        }
    }

    /// Introductory prose shown above the sections, one paragraph per line
    pub fn intro(&self) -> &'static str {
        match self {
            Self::Home => {
                "Pick a guide from the sidebar. Every section runs a real library call \
                 and shows the Rust code that makes it."
            }
            Self::Bitcoin => {
                "Work through the building blocks of a Bitcoin wallet against the \
                 selected network. Validate addresses and public keys, derive child keys \
                 from an extended public key, convert between BTC and satoshis, check and \
                 estimate fees, and build multisig addresses.\n\
                 Switch networks with 'n'. Testnet is the default."
            }
            Self::Psbt => {
                "What is a PSBT?\n\
                 Partially Signed Bitcoin Transactions (PSBTs) are a data format for \
                 exchanging information about a Bitcoin transaction between multiple \
                 parties. They are particularly useful for multisig wallets and hardware \
                 wallet interactions.\n\
                 Key features of PSBTs:\n\
                 - Standardized format for sharing transaction information\n\
                 - Support for multi-party signing workflows\n\
                 - Separation of transaction construction from transaction signing\n\
                 - Enhanced privacy and security in transaction creation"
            }
        }
    }

    /// Sections shown on the page, in order
    pub fn actions(&self) -> &'static [GuideAction] {
        match self {
            Self::Home => &[],
            Self::Bitcoin => GuideAction::bitcoin(),
            Self::Psbt => GuideAction::psbt(),
        }
    }

    /// Resolve a path; anything unknown lands on Home
    pub fn from_path(path: &str) -> Route {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        Self::all()
            .iter()
            .copied()
            .find(|r| r.path() == path)
            .unwrap_or_default()
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|r| r == self).unwrap_or(0)
    }
}
