//! Módulos de plataforma, um por convenção de venda suportada.

pub mod claim_condition;
pub mod custom_auction;
pub mod dutch_auction;
pub mod fee_extension;
pub mod flat_fee_store;
pub mod invite_store;
pub mod royalty_edition;
pub mod singleton_drop;

pub use claim_condition::ClaimConditionDropPlatform;
pub use custom_auction::CustomAuctionPlatform;
pub use dutch_auction::DutchAuctionPlatform;
pub use fee_extension::FeeExtensionClaimPlatform;
pub use flat_fee_store::FlatFeeStorePlatform;
pub use invite_store::InviteStorePlatform;
pub use royalty_edition::RoyaltyEditionPlatform;
pub use singleton_drop::SingletonDropPlatform;
