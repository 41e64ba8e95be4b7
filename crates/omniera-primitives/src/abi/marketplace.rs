use alloy::sol;

// Entry points of the home-chain marketplace reachable through the bridge relay. The argument
// layout of each function is the descriptor layout: every parameter is a static 32-byte slot.
sol! {
    interface IOmniMarketplace {
        function list(address assetContract, uint256 assetId, address paymentToken, uint256 price) external;
        function delist(uint256 listingId) external;
        function buy(uint256 listingId) external payable;
        function makeOffer(uint256 listingId, address paymentToken, uint256 amount) external payable;
        function acceptOffer(uint256 listingId, uint256 offerId) external;
        function custom(uint256 payload) external;
    }
}
