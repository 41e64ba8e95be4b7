//! Turn command line intents into operations.

use alloy::primitives::{Address, U256};
use omniera_primitives::utils::{parse_amount, parse_uint, NATIVE_DECIMALS};
use omniera_primitives::{Operation, OperationKind};

use crate::error::{ClientError, Result};
use crate::registry::AddressRegistry;

fn kind_from_name(kind: &str) -> Result<OperationKind> {
    let normalized: String = kind
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase();
    OperationKind::all()
        .into_iter()
        .find(|k| k.name().to_lowercase() == normalized)
        .ok_or_else(|| ClientError::IntentParsingError(format!("unknown operation {kind}")))
}

fn arity_error(kind: OperationKind, got: usize) -> ClientError {
    ClientError::IntentParsingError(format!(
        "{} expects {} arguments, got {}",
        kind.name(),
        kind.arg_slots(),
        got
    ))
}

struct Args<'a> {
    kind: OperationKind,
    values: &'a [String],
    registry: &'a AddressRegistry,
    network: &'a str,
}

impl Args<'_> {
    fn get(&self, index: usize) -> Result<&str> {
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| arity_error(self.kind, self.values.len()))
    }

    fn address(&self, index: usize) -> Result<Address> {
        Ok(self.registry.resolve_or_parse(self.get(index)?, self.network)?)
    }

    fn id(&self, index: usize) -> Result<U256> {
        Ok(parse_uint(self.get(index)?)?)
    }

    fn amount(&self, index: usize) -> Result<U256> {
        Ok(parse_amount(self.get(index)?, NATIVE_DECIMALS)?)
    }
}

/// Build an operation from its name and positional arguments.
///
/// Addresses may be hex or contract names from `registry`; prices and offer amounts are
/// decimal amounts of the payment token (18 decimals); ids are integers.
pub fn parse_operation(
    kind: &str,
    args: &[String],
    registry: &AddressRegistry,
    network: &str,
) -> Result<Operation> {
    let kind = kind_from_name(kind)?;
    if args.len() != kind.arg_slots() {
        return Err(arity_error(kind, args.len()));
    }
    let args = Args {
        kind,
        values: args,
        registry,
        network,
    };

    let operation = match kind {
        OperationKind::List => Operation::List {
            asset_contract: args.address(0)?,
            asset_id: args.id(1)?,
            payment_token: args.address(2)?,
            price: args.amount(3)?,
        },
        OperationKind::Delist => Operation::Delist {
            listing_id: args.id(0)?,
        },
        OperationKind::Buy => Operation::Buy {
            listing_id: args.id(0)?,
        },
        OperationKind::MakeOffer => Operation::MakeOffer {
            listing_id: args.id(0)?,
            payment_token: args.address(1)?,
            amount: args.amount(2)?,
        },
        OperationKind::AcceptOffer => Operation::AcceptOffer {
            listing_id: args.id(0)?,
            offer_id: args.id(1)?,
        },
        OperationKind::Custom => Operation::Custom {
            numeric_payload: args.id(0)?,
        },
    };
    Ok(operation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;
    use omniera_primitives::CodecError;

    fn registry() -> AddressRegistry {
        let mut registry = AddressRegistry::default();
        registry.record_deployment(
            "zeta_testnet",
            [(
                "OmniNFT".to_string(),
                address!("aa00000000000000000000000000000000000001"),
            )],
        );
        registry
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parses_list_with_registry_name() {
        let operation = parse_operation(
            "list",
            &strings(&[
                "OmniNFT",
                "2",
                "0xbb00000000000000000000000000000000000002",
                "2",
            ]),
            &registry(),
            "zeta_testnet",
        )
        .unwrap();
        assert_eq!(
            operation,
            Operation::List {
                asset_contract: address!("aa00000000000000000000000000000000000001"),
                asset_id: U256::from(2),
                payment_token: address!("bb00000000000000000000000000000000000002"),
                price: U256::from(2_000_000_000_000_000_000u128),
            }
        );
    }

    #[test]
    fn accepts_snake_case_kind() {
        let operation =
            parse_operation("accept_offer", &strings(&["1", "3"]), &registry(), "x").unwrap();
        assert_eq!(operation.kind(), OperationKind::AcceptOffer);
    }

    #[test]
    fn rejects_bad_input() {
        let registry = registry();
        assert!(matches!(
            parse_operation("sell", &strings(&["1"]), &registry, "zeta_testnet"),
            Err(ClientError::IntentParsingError(_))
        ));
        assert!(matches!(
            parse_operation("buy", &strings(&["1", "2"]), &registry, "zeta_testnet"),
            Err(ClientError::IntentParsingError(_))
        ));
        assert!(matches!(
            parse_operation("delist", &strings(&["-1"]), &registry, "zeta_testnet"),
            Err(ClientError::CodecError(CodecError::NegativeValue(_)))
        ));
        assert!(matches!(
            parse_operation(
                "makeOffer",
                &strings(&["1", "UnknownToken", "1"]),
                &registry,
                "zeta_testnet"
            ),
            Err(ClientError::RegistryError(_))
        ));
    }
}
