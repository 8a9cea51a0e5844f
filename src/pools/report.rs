//! APY/TVL reports for a selection of pool descriptors

use super::descriptor::PoolDescriptor;
use super::matcher::{match_descriptor, MatchKind};
use crate::apis::defillama::types::PoolIndex;
use crate::apis::ApiManager;
use crate::chain::OnchainRate;
use crate::errors::{ApiError, ChainError};
use crate::logger::{self, LogTag};
use crate::telegram::formatters::{format_number, format_percent, html_escape};
use futures::future::join_all;

/// Where a line's APY came from
#[derive(Debug, Clone, PartialEq)]
pub enum ApySource {
    Aggregator,
    Onchain(&'static str),
}

/// One descriptor's figures
#[derive(Debug, Clone, PartialEq)]
pub struct PoolReportLine {
    pub name: String,
    pub chain: String,
    pub project: String,
    pub symbol: String,
    pub match_kind: Option<MatchKind>,
    pub apy: Option<f64>,
    pub apy_source: ApySource,
    pub tvl_usd: Option<f64>,
}

impl PoolReportLine {
    pub fn is_found(&self) -> bool {
        self.match_kind.is_some() || self.apy_source != ApySource::Aggregator
    }
}

/// Fetch the aggregator index and on-chain rates concurrently and build one
/// line per descriptor
pub async fn build_report(
    descriptors: &[PoolDescriptor],
    manager: &ApiManager,
) -> Result<Vec<PoolReportLine>, ApiError> {
    let onchain_reads = descriptors.iter().map(|descriptor| async move {
        let source = descriptor.onchain.as_ref()?;
        if !manager.chain.is_enabled() {
            return None;
        }
        Some(manager.chain.read_rate(source).await)
    });

    let (index, rates) = tokio::join!(
        manager.defillama.fetch_pool_index(),
        join_all(onchain_reads)
    );
    let index = index?;

    Ok(assemble_report(descriptors, &index, rates))
}

/// Combine index matches with on-chain results (`rates[i]` belongs to
/// `descriptors[i]`; `None` means no on-chain read was made)
pub fn assemble_report(
    descriptors: &[PoolDescriptor],
    index: &PoolIndex,
    rates: Vec<Option<Result<OnchainRate, ChainError>>>,
) -> Vec<PoolReportLine> {
    descriptors
        .iter()
        .zip(rates.into_iter().chain(std::iter::repeat_with(|| None)))
        .map(|(descriptor, rate)| {
            let matched = match_descriptor(descriptor, index);

            let mut line = PoolReportLine {
                name: descriptor.display_name().to_string(),
                chain: descriptor.chain.clone(),
                project: descriptor.project.clone(),
                symbol: descriptor.symbol.clone(),
                match_kind: matched.map(|(kind, _)| kind),
                apy: matched.and_then(|(_, pool)| pool.effective_apy()),
                apy_source: ApySource::Aggregator,
                tvl_usd: matched.and_then(|(_, pool)| pool.tvl_usd),
            };

            match rate {
                Some(Ok(rate)) => {
                    line.apy = Some(rate.supply_apy);
                    line.apy_source = ApySource::Onchain(rate.source);
                }
                Some(Err(e)) => logger::warning(
                    LogTag::Chain,
                    &format!(
                        "On-chain read for '{}' failed, using aggregator APY: {}",
                        line.name, e
                    ),
                ),
                None => {}
            }

            if !line.is_found() {
                logger::debug(
                    LogTag::Pools,
                    &format!("'{}' not found in DefiLlama data", line.name),
                );
            }
            line
        })
        .collect()
}

/// HTML report: one block per pool and a `found k of n` summary
pub fn render_report(title: &str, lines: &[PoolReportLine], show_not_found: bool) -> String {
    let mut out = format!("📊 <b>{}</b>\n", html_escape(title));

    if lines.is_empty() {
        out.push_str("\nNo pools configured for this selection.");
        return out;
    }

    for line in lines {
        if line.is_found() {
            let marker = match (&line.apy_source, line.match_kind) {
                (ApySource::Onchain(source), _) => format!(" ⛓ {}", source),
                (ApySource::Aggregator, Some(MatchKind::Fallback)) => " ≈".to_string(),
                _ => String::new(),
            };
            out.push_str(&format!(
                "\n<b>{}</b>\nAPY: {}{} | TVL: ${}\n",
                html_escape(&line.name),
                format_percent(line.apy),
                marker,
                format_number(line.tvl_usd)
            ));
        } else if show_not_found {
            out.push_str(&format!(
                "\n<b>{}</b>\n❌ not found\n",
                html_escape(&line.name)
            ));
        }
    }

    let found = lines.iter().filter(|l| l.is_found()).count();
    out.push_str(&format!("\n<i>Found {} of {} pools</i>", found, lines.len()));
    out
}
