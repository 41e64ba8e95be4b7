use alloy::sol;
use serde::{Deserialize, Serialize};

// Payloads handed to a universal receiver delegate by LSP7/LSP8 token contracts. The token
// contract encodes them with `abi.encode(operator, from, to, amountOrTokenId, data)`, so they
// must be decoded as parameter lists rather than as a single tuple.
sol! {
    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct LSP7RecipientPayload {
        address operator;
        address from;
        address to;
        uint256 amount;
        bytes data;
    }

    #[derive(Serialize, Deserialize, PartialEq, Debug)]
    struct LSP8RecipientPayload {
        address operator;
        address from;
        address to;
        bytes32 tokenId;
        bytes data;
    }

    interface IERC725Y {
        function setData(bytes32 dataKey, bytes dataValue) external payable;
    }
}
