// Adapters from the upstream clients to the core traits
pub mod neynar;
pub mod rpc_wallet;

pub use neynar::NeynarProvider;
pub use rpc_wallet::RpcWallet;
