//! Compound III (Comet) supply rate reads

use super::math::per_second_wad_to_apr_percent;
use super::{parse_address, with_timeout, OnchainRate};
use crate::errors::ChainError;
use crate::logger::{self, LogTag};
use alloy::providers::DynProvider;
use alloy::sol;
use std::time::Duration;

sol! {
    #[sol(rpc)]
    interface IComet {
        function getUtilization() external view returns (uint256);
        function getSupplyRate(uint256 utilization) external view returns (uint64);
    }
}

/// Current supply rate of a Comet market, annualized
pub async fn read_supply_rate(
    provider: &DynProvider,
    comet: &str,
    timeout: Duration,
) -> Result<OnchainRate, ChainError> {
    let comet = parse_address(comet)?;
    let contract = IComet::new(comet, provider.clone());

    let utilization = with_timeout("getUtilization", timeout, async {
        contract.getUtilization().call().await
    })
    .await?;

    let rate_per_second = with_timeout("getSupplyRate", timeout, async {
        contract.getSupplyRate(utilization).call().await
    })
    .await?;

    let supply_apy = per_second_wad_to_apr_percent(rate_per_second);
    logger::debug(
        LogTag::Chain,
        &format!(
            "Comet {}: utilization {}, supply rate {}/s -> {:.4}%",
            comet, utilization, rate_per_second, supply_apy
        ),
    );

    Ok(OnchainRate {
        supply_apy,
        borrow_apy: None,
        source: "compound-v3",
    })
}
