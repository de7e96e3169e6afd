mod common;

use common::MockChainClient;
use ethereum_types::{Address, H256, U256};
use mintpilot_core::{abi, FeeModel, PlatformTag};
use mintpilot_platforms::platforms::*;
use mintpilot_platforms::PlatformModule;

fn words(values: &[U256]) -> Vec<u8> {
    let mut out = Vec::with_capacity(values.len() * 32);
    for value in values {
        out.extend_from_slice(&abi::word_uint(*value));
    }
    out
}

fn eth(milli: u64) -> U256 {
    U256::from(milli) * U256::exp10(15)
}

#[tokio::test]
async fn flat_fee_store_charges_the_fee_once_per_transaction() {
    let address = Address::repeat_byte(0x21);
    let mut mock = MockChainClient::new();
    mock.on_read(address, "mintFee()", abi::encode_uint_return(eth(1)));
    mock.on_read(address, "mintPrice()", abi::encode_uint_return(eth(10)));

    let platform = FlatFeeStorePlatform::new();
    assert!(platform.detect(&mock, address).await);

    let snapshot = platform.analyze(&mock, address, 1).await.unwrap();
    assert_eq!(snapshot.platform, PlatformTag::FlatFeeStore);
    assert_eq!(snapshot.fee_model, FeeModel::PerTransaction(eth(1)));
    // taxa por transação: preço×qty + taxa, não (preço+taxa)×qty
    assert_eq!(snapshot.total_value(U256::from(3)), eth(30) + eth(1));
}

#[tokio::test]
async fn flat_fee_store_does_not_detect_without_the_fee_accessor() {
    let address = Address::repeat_byte(0x22);
    let mock = MockChainClient::new();
    assert!(!FlatFeeStorePlatform::new().detect(&mock, address).await);
}

#[tokio::test]
async fn singleton_drop_reads_sale_state_from_the_router() {
    let token = Address::repeat_byte(0x23);
    let router = Address::repeat_byte(0x24);

    let mut mock = MockChainClient::new();
    mock.on_read(token, "minter()", abi::encode_address_return(router));
    mock.with_bytecode(router, vec![0x60, 0x80, 0x60, 0x40]);
    mock.on_read_data(
        token,
        abi::encode_call_address("saleDetails(address)", token),
        words(&[eth(5), U256::from(1), U256::from(u64::MAX), U256::from(4)]),
    );
    // saleDetails fica no router, não no token
    mock.on_read_data(
        router,
        abi::encode_call_address("saleDetails(address)", token),
        words(&[eth(5), U256::from(1), U256::from(u64::MAX), U256::from(4)]),
    );

    let platform = SingletonDropPlatform::new();
    assert!(platform.detect(&mock, token).await);

    let snapshot = platform.analyze(&mock, token, 1).await.unwrap();
    assert_eq!(snapshot.router_address, Some(router));
    assert_eq!(snapshot.mint_price_per_token, eth(5));
    assert_eq!(snapshot.max_per_wallet, Some(U256::from(4)));
    assert!(snapshot.is_active);
    assert_eq!(snapshot.mint_function_signature, "purchase(uint256)");
}

#[tokio::test]
async fn singleton_drop_with_closed_window_is_inactive() {
    let token = Address::repeat_byte(0x25);
    let router = Address::repeat_byte(0x26);

    let mut mock = MockChainClient::new();
    mock.on_read(token, "minter()", abi::encode_address_return(router));
    mock.with_bytecode(router, vec![0x60, 0x80]);
    // Janela [1, 2): encerrada há muito tempo
    mock.on_read_data(
        router,
        abi::encode_call_address("saleDetails(address)", token),
        words(&[eth(5), U256::from(1), U256::from(2), U256::zero()]),
    );

    let snapshot = SingletonDropPlatform::new().analyze(&mock, token, 1).await.unwrap();
    assert!(!snapshot.is_active);
}

#[tokio::test]
async fn claim_condition_price_comes_from_the_active_condition() {
    let address = Address::repeat_byte(0x27);
    let mut mock = MockChainClient::new();
    mock.on_read(
        address,
        "getActiveClaimConditionId()",
        abi::encode_uint_return(U256::from(2)),
    );
    // (start, maxClaimable, claimed, perWallet, merkleRoot, price, ...)
    mock.on_read_data(
        address,
        abi::encode_call_uint("getClaimConditionById(uint256)", U256::from(2)),
        words(&[
            U256::zero(),
            U256::from(100),
            U256::from(40),
            U256::from(2),
            U256::zero(),
            eth(20),
        ]),
    );

    let platform = ClaimConditionDropPlatform::new();
    assert!(platform.detect(&mock, address).await);

    let snapshot = platform.analyze(&mock, address, 1).await.unwrap();
    assert_eq!(snapshot.mint_price_per_token, eth(20));
    assert_eq!(snapshot.max_supply, Some(U256::from(100)));
    assert_eq!(snapshot.max_per_wallet, Some(U256::from(2)));
    assert!(snapshot.is_active);
    assert_eq!(snapshot.mint_function_signature, "claim(uint256)");
}

#[tokio::test]
async fn claim_condition_missing_condition_means_inactive() {
    let address = Address::repeat_byte(0x28);
    let mut mock = MockChainClient::new();
    // Id existe mas a struct não responde
    mock.on_read(
        address,
        "getActiveClaimConditionId()",
        abi::encode_uint_return(U256::from(0)),
    );

    let snapshot = ClaimConditionDropPlatform::new().analyze(&mock, address, 1).await.unwrap();
    assert!(!snapshot.is_active);
    assert_eq!(snapshot.mint_price_per_token, U256::zero());
}

#[tokio::test]
async fn claim_condition_sold_out_supply_is_inactive() {
    let address = Address::repeat_byte(0x29);
    let mut mock = MockChainClient::new();
    mock.on_read(
        address,
        "getActiveClaimConditionId()",
        abi::encode_uint_return(U256::from(1)),
    );
    mock.on_read_data(
        address,
        abi::encode_call_uint("getClaimConditionById(uint256)", U256::from(1)),
        words(&[
            U256::zero(),
            U256::from(100),
            U256::from(100),
            U256::zero(),
            U256::zero(),
            eth(20),
        ]),
    );

    let snapshot = ClaimConditionDropPlatform::new().analyze(&mock, address, 1).await.unwrap();
    assert!(!snapshot.is_active);
}

#[tokio::test]
async fn fee_extension_charges_the_fee_per_token() {
    let address = Address::repeat_byte(0x2a);
    let mut mock = MockChainClient::new();
    mock.on_read(address, "MINT_FEE()", abi::encode_uint_return(eth(1)));
    mock.on_read(address, "claimPrice()", abi::encode_uint_return(eth(10)));

    let platform = FeeExtensionClaimPlatform::new();
    assert!(platform.detect(&mock, address).await);

    let snapshot = platform.analyze(&mock, address, 1).await.unwrap();
    assert_eq!(snapshot.fee_model, FeeModel::PerToken(eth(1)));
    // taxa por token: (preço + taxa) × qty
    assert_eq!(snapshot.total_value(U256::from(3)), eth(33));
}

#[tokio::test]
async fn invite_store_retries_with_the_derived_key() {
    let address = Address::repeat_byte(0x2b);
    let derived = H256::from_slice(&abi::keccak256(b"public"));

    let mut mock = MockChainClient::new();
    // A chave zero não computa; a derivada computa
    mock.on_read_data(
        address,
        abi::encode_call_bytes32_uint("computePrice(bytes32,uint256)", derived, U256::one()),
        abi::encode_uint_return(eth(8)),
    );

    let snapshot = InviteStorePlatform::new().analyze(&mock, address, 1).await.unwrap();
    assert_eq!(snapshot.mint_price_per_token, eth(8));
}

#[tokio::test]
async fn invite_store_defaults_to_zero_when_both_keys_fail() {
    let address = Address::repeat_byte(0x2c);
    let mock = MockChainClient::new();

    let snapshot = InviteStorePlatform::new().analyze(&mock, address, 1).await.unwrap();
    assert_eq!(snapshot.mint_price_per_token, U256::zero());
}

#[tokio::test]
async fn custom_auction_prefers_the_live_price_accessor() {
    let address = Address::repeat_byte(0x2d);
    let mut mock = MockChainClient::new();
    mock.on_read(address, "auctionActive()", abi::encode_bool_return(true));
    mock.on_read(address, "getCurrentPrice()", abi::encode_uint_return(eth(42)));

    let platform = CustomAuctionPlatform::new();
    assert!(platform.detect(&mock, address).await);

    let snapshot = platform.analyze(&mock, address, 1).await.unwrap();
    assert_eq!(snapshot.mint_price_per_token, eth(42));
    assert!(snapshot.is_active);
}

#[tokio::test]
async fn custom_auction_falls_back_to_the_start_end_pair() {
    let address = Address::repeat_byte(0x2e);
    let mut mock = MockChainClient::new();
    mock.on_read(address, "auctionActive()", abi::encode_bool_return(true));
    mock.on_read(address, "auctionStartPrice()", abi::encode_uint_return(eth(100)));
    mock.on_read(address, "auctionEndPrice()", abi::encode_uint_return(eth(10)));

    let snapshot = CustomAuctionPlatform::new().analyze(&mock, address, 1).await.unwrap();
    // teto conservador: o maior dos dois extremos
    assert_eq!(snapshot.mint_price_per_token, eth(100));
}

#[tokio::test]
async fn dutch_auction_needs_both_price_bounds_to_detect() {
    let address = Address::repeat_byte(0x2f);
    let mut mock = MockChainClient::new();
    mock.on_read(address, "startPrice()", abi::encode_uint_return(eth(50)));

    let platform = DutchAuctionPlatform::new();
    assert!(!platform.detect(&mock, address).await);

    mock.on_read(address, "endPrice()", abi::encode_uint_return(eth(5)));
    assert!(platform.detect(&mock, address).await);

    // Sem acessor de preço corrente, vale o preço inicial
    let snapshot = platform.analyze(&mock, address, 1).await.unwrap();
    assert_eq!(snapshot.mint_price_per_token, eth(50));
}

#[tokio::test]
async fn royalty_edition_applies_a_percentage_on_top() {
    let address = Address::repeat_byte(0x31);
    let mut mock = MockChainClient::new();
    mock.on_read(address, "royaltyBps()", abi::encode_uint_return(U256::from(500)));
    mock.on_read(address, "salePrice()", abi::encode_uint_return(eth(10)));

    let platform = RoyaltyEditionPlatform::new();
    assert!(platform.detect(&mock, address).await);

    let snapshot = platform.analyze(&mock, address, 1).await.unwrap();
    assert_eq!(snapshot.fee_model, FeeModel::PercentBps(500));
    // 5% sobre 2 × 0.010: 0.020 → 0.021
    assert_eq!(snapshot.total_value(U256::from(2)), eth(21));
}

#[tokio::test]
async fn generic_analyzer_assembles_a_snapshot_from_partial_reads() {
    use mintpilot_core::TokenStandard;
    use mintpilot_platforms::{GenericAnalyzer, PlatformModule};

    let address = Address::repeat_byte(0x32);
    let mut mock = MockChainClient::new();
    mock.on_read(address, "price()", abi::encode_uint_return(eth(10)));
    mock.on_read(address, "name()", abi::encode_string_return("Cool Drop"));
    mock.on_read(address, "totalSupply()", abi::encode_uint_return(U256::from(120)));
    mock.on_read_data(
        address,
        abi::encode_call_bytes4("supportsInterface(bytes4)", [0xd9, 0xb6, 0x7a, 0x26]),
        abi::encode_bool_return(true),
    );

    let snapshot = GenericAnalyzer::new().analyze(&mock, address, 1).await.unwrap();
    assert_eq!(snapshot.platform, PlatformTag::Generic);
    assert_eq!(snapshot.mint_price_per_token, eth(10));
    assert_eq!(snapshot.name.as_deref(), Some("Cool Drop"));
    assert_eq!(snapshot.total_supply, Some(U256::from(120)));
    assert_eq!(snapshot.max_supply, None);
    assert_eq!(snapshot.token_standard, TokenStandard::Erc1155);
    assert_eq!(snapshot.mint_function_signature, "mint(uint256)");
}
