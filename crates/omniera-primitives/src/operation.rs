//! Marketplace operations that can be dispatched across the bridge.

use std::fmt;

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::abi::marketplace::IOmniMarketplace::{
    acceptOfferCall, buyCall, customCall, delistCall, listCall, makeOfferCall,
};

/// A typed marketplace intent.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    List {
        asset_contract: Address,
        asset_id: U256,
        payment_token: Address,
        price: U256,
    },
    Delist {
        listing_id: U256,
    },
    Buy {
        listing_id: U256,
    },
    MakeOffer {
        listing_id: U256,
        payment_token: Address,
        amount: U256,
    },
    AcceptOffer {
        listing_id: U256,
        offer_id: U256,
    },
    /// Escape hatch for operations added after this protocol version.
    Custom {
        numeric_payload: U256,
    },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::List { .. } => OperationKind::List,
            Operation::Delist { .. } => OperationKind::Delist,
            Operation::Buy { .. } => OperationKind::Buy,
            Operation::MakeOffer { .. } => OperationKind::MakeOffer,
            Operation::AcceptOffer { .. } => OperationKind::AcceptOffer,
            Operation::Custom { .. } => OperationKind::Custom,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::List {
                asset_contract,
                asset_id,
                payment_token,
                price,
            } => write!(
                f,
                "list({asset_contract}, {asset_id}, {payment_token}, {price})"
            ),
            Operation::Delist { listing_id } => write!(f, "delist({listing_id})"),
            Operation::Buy { listing_id } => write!(f, "buy({listing_id})"),
            Operation::MakeOffer {
                listing_id,
                payment_token,
                amount,
            } => write!(f, "makeOffer({listing_id}, {payment_token}, {amount})"),
            Operation::AcceptOffer {
                listing_id,
                offer_id,
            } => write!(f, "acceptOffer({listing_id}, {offer_id})"),
            Operation::Custom { numeric_payload } => write!(f, "custom({numeric_payload})"),
        }
    }
}

macro_rules! count {
    () => (0usize);
    ($head:tt $(,$tail:tt)*) => (1usize + count!($($tail),*));
}

// Generates `OperationKind` and the selector table from the `sol!` call types. `$slots` is the
// number of 32-byte argument slots following the selector.
macro_rules! operation_kinds {
    (
        $(
            $(#[$attr:meta])*
            ($variant:ident, $call:ty, $slots:literal)
        ),* $(,)?
    ) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum OperationKind {
            $(
                $(#[$attr])*
                $variant
            ),*
        }

        impl OperationKind {
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub const fn selector(&self) -> [u8; 4] {
                match self {
                    $(Self::$variant => <$call as SolCall>::SELECTOR),*
                }
            }

            /// Canonical textual signature the selector is derived from.
            pub const fn signature(&self) -> &'static str {
                match self {
                    $(Self::$variant => <$call as SolCall>::SIGNATURE),*
                }
            }

            pub const fn arg_slots(&self) -> usize {
                match self {
                    $(Self::$variant => $slots),*
                }
            }

            pub const fn all() -> [OperationKind; {count!($($variant),*)}] {
                [$(Self::$variant),*]
            }

            pub fn from_selector(selector: [u8; 4]) -> Option<Self> {
                $(
                    if selector == <$call as SolCall>::SELECTOR {
                        return Some(Self::$variant);
                    }
                )*
                None
            }
        }

        pub const SELECTORS: [[u8; 4]; {count!($($variant),*)}] =
            [$(<$call as SolCall>::SELECTOR),*];
    };
}

operation_kinds! {
    (List, listCall, 4),
    (Delist, delistCall, 1),
    (Buy, buyCall, 1),
    (MakeOffer, makeOfferCall, 3),
    (AcceptOffer, acceptOfferCall, 2),
    (Custom, customCall, 1),
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}

const fn selectors_are_distinct(selectors: &[[u8; 4]]) -> bool {
    let mut i = 0;
    while i < selectors.len() {
        let mut j = i + 1;
        while j < selectors.len() {
            if u32::from_be_bytes(selectors[i]) == u32::from_be_bytes(selectors[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

// selector -> variant must stay injective; a collision fails the build.
const _: () = assert!(
    selectors_are_distinct(&SELECTORS),
    "two marketplace operations share a selector"
);
