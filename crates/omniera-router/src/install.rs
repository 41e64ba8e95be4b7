//! Call data that installs the router as universal receiver delegate of an account.

use alloy::primitives::{Address, Bytes, B256};
use alloy::sol_types::SolCall;
use omniera_primitives::abi::lsp::IERC725Y::setDataCall;
use omniera_primitives::notification::delegate_data_key;

/// `setData(key, delegate)` for a single notification type.
pub fn install_call(type_id: &B256, delegate: Address) -> Bytes {
    setDataCall {
        dataKey: delegate_data_key(type_id),
        dataValue: Bytes::copy_from_slice(delegate.as_slice()),
    }
    .abi_encode()
    .into()
}

/// One `setData` call per type id, in the given order.
pub fn install_calls(type_ids: &[B256], delegate: Address) -> Vec<Bytes> {
    type_ids
        .iter()
        .map(|type_id| install_call(type_id, delegate))
        .collect()
}
