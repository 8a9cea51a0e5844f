//! Aave V3 PoolDataProvider reads

use super::math::ray_to_percent;
use super::{parse_address, u256_to_u128, with_timeout, OnchainRate};
use crate::errors::ChainError;
use crate::logger::{self, LogTag};
use alloy::providers::DynProvider;
use alloy::sol;
use std::time::Duration;

sol! {
    #[sol(rpc)]
    interface IPoolDataProvider {
        function getReserveData(address asset)
            external
            view
            returns (
                uint256 unbacked,
                uint256 accruedToTreasuryScaled,
                uint256 totalAToken,
                uint256 totalStableDebt,
                uint256 totalVariableDebt,
                uint256 liquidityRate,
                uint256 variableBorrowRate,
                uint256 stableBorrowRate,
                uint256 averageStableBorrowRate,
                uint256 liquidityIndex,
                uint256 variableBorrowIndex,
                uint40 lastUpdateTimestamp
            );
    }
}

/// Supply and variable borrow rates of one reserve
pub async fn read_reserve_rates(
    provider: &DynProvider,
    data_provider: &str,
    asset: &str,
    timeout: Duration,
) -> Result<OnchainRate, ChainError> {
    let data_provider = parse_address(data_provider)?;
    let asset = parse_address(asset)?;

    logger::debug(
        LogTag::Chain,
        &format!(
            "Calling PoolDataProvider({}).getReserveData({})",
            data_provider, asset
        ),
    );

    let contract = IPoolDataProvider::new(data_provider, provider.clone());
    let reserve = with_timeout("getReserveData", timeout, async {
        contract.getReserveData(asset).call().await
    })
    .await?;

    let liquidity_rate = u256_to_u128(reserve.liquidityRate)?;
    let borrow_rate = u256_to_u128(reserve.variableBorrowRate)?;
    let supply_apy = ray_to_percent(liquidity_rate);

    logger::debug(
        LogTag::Chain,
        &format!(
            "Aave reserve {}: supply {:.4}% (RAY {}), borrow {:.4}%",
            asset,
            supply_apy,
            liquidity_rate,
            ray_to_percent(borrow_rate)
        ),
    );

    Ok(OnchainRate {
        supply_apy,
        borrow_apy: Some(ray_to_percent(borrow_rate)),
        source: "aave-v3",
    })
}
