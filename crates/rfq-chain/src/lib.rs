//! On-chain inventory lookup over JSON-RPC.
//!
//! [`RpcBalanceOracle`] answers `balance_of` with an ERC20 `balanceOf`
//! `eth_call` against the chain's configured `rpc_url`.

pub mod error;
pub mod oracle;
pub mod rpc;

pub use error::{ChainError, ChainResult};
pub use oracle::RpcBalanceOracle;
pub use rpc::{balance_of_calldata, decode_balance, RpcClient};
