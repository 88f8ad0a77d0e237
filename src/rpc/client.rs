// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client for a single configured JSON-RPC ledger endpoint.

use std::str::FromStr;

use alloy::{
    eips::{BlockId, BlockNumberOrTag},
    network::Ethereum,
    primitives::{Address, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
};

use super::RpcError;

/// HTTP provider type (with all fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// A ready-to-use client bound to one ledger RPC endpoint.
///
/// The contract surface this crate relies on is `get_balance` and
/// `block_number`; the underlying alloy provider is richer, but anything
/// beyond these reads is the caller's business.
#[derive(Debug)]
pub struct LedgerClient {
    url: String,
    provider: HttpProvider,
}

impl LedgerClient {
    /// Connect to an endpoint URL. No network I/O happens here; the URL is
    /// only parsed and the HTTP transport prepared.
    pub fn connect(url: &str) -> Result<Self, RpcError> {
        let parsed: url::Url = url
            .parse()
            .map_err(|e: url::ParseError| RpcError::InvalidUrl(format!("{url}: {e}")))?;

        let provider = ProviderBuilder::new().connect_http(parsed);

        Ok(Self {
            url: url.to_string(),
            provider,
        })
    }

    /// The endpoint URL this client is bound to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the native balance of an address at the given block tag
    /// (`latest` when `None`).
    pub async fn get_balance(
        &self,
        address: &str,
        block_tag: Option<BlockNumberOrTag>,
    ) -> Result<U256, RpcError> {
        let addr = Address::from_str(address)
            .map_err(|e| RpcError::InvalidAddress(e.to_string()))?;

        let call = self.provider.get_balance(addr);
        let result = match block_tag {
            Some(tag) => call.block_id(BlockId::Number(tag)).await,
            None => call.await,
        };

        result.map_err(|e| RpcError::Rpc(e.to_string()))
    }

    /// Get the current block number.
    pub async fn block_number(&self) -> Result<u64, RpcError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|e| RpcError::Rpc(e.to_string()))
    }
}

/// Format a wei balance with the specified number of decimals.
pub fn format_balance(balance: U256, decimals: u8) -> String {
    if balance.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = balance / divisor;
    let remainder = balance % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        // Up to 6 decimal places
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        if trimmed.is_empty() {
            whole.to_string()
        } else {
            format!("{}.{}", whole, &trimmed[..trimmed.len().min(6)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_rejects_invalid_url() {
        let err = LedgerClient::connect("not a url").unwrap_err();
        assert!(matches!(err, RpcError::InvalidUrl(_)));
    }

    #[test]
    fn connect_records_url() {
        let client = LedgerClient::connect("https://rpc.example/ext/bc/C/rpc").unwrap();
        assert_eq!(client.url(), "https://rpc.example/ext/bc/C/rpc");
    }

    #[tokio::test]
    async fn get_balance_rejects_invalid_address() {
        let client = LedgerClient::connect("https://rpc.example").unwrap();
        let err = client.get_balance("zzz", None).await.unwrap_err();
        assert!(matches!(err, RpcError::InvalidAddress(_)));
    }

    #[test]
    fn test_format_balance() {
        // 1 token = 1e18 wei
        let one = U256::from(1_000_000_000_000_000_000u64);
        assert_eq!(format_balance(one, 18), "1");

        let half = U256::from(500_000_000_000_000_000u64);
        assert_eq!(format_balance(half, 18), "0.5");

        // Truncated to 6 decimals
        let complex = U256::from(1_234_567_890_000_000_000u64);
        assert_eq!(format_balance(complex, 18), "1.234567");

        assert_eq!(format_balance(U256::ZERO, 18), "0");
    }
}
