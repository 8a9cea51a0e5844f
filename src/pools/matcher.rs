//! Match pool descriptors against the DefiLlama index

use super::descriptor::PoolDescriptor;
use crate::apis::defillama::types::{LlamaPool, PoolIndex};
use crate::logger::{self, LogTag};

/// How a descriptor found its pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// `defilama_id` found in the index
    Id,
    /// Same (chain, project, symbol), compared lower-cased
    Fallback,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Id => "id",
            MatchKind::Fallback => "fallback",
        }
    }
}

/// Find the pool for `descriptor`: by id first, then by (chain, project, symbol)
pub fn match_descriptor<'a>(
    descriptor: &PoolDescriptor,
    index: &'a PoolIndex,
) -> Option<(MatchKind, &'a LlamaPool)> {
    let id = descriptor.defilama_id.trim();
    if !id.is_empty() {
        if let Some(pool) = index.get(id) {
            return Some((MatchKind::Id, pool));
        }
    }

    let chain = descriptor.chain.trim().to_lowercase();
    let project = descriptor.project.trim().to_lowercase();
    let symbol = descriptor.symbol.trim().to_lowercase();
    if chain.is_empty() || project.is_empty() || symbol.is_empty() {
        return None;
    }

    let found = index.iter().find(|pool| {
        lower_eq(pool.chain.as_deref(), &chain)
            && lower_eq(pool.project.as_deref(), &project)
            && lower_eq(pool.symbol.as_deref(), &symbol)
    })?;

    logger::debug(
        LogTag::Pools,
        &format!(
            "'{}' matched by chain/project/symbol -> {}",
            descriptor.display_name(),
            found.pool.as_deref().unwrap_or("?")
        ),
    );
    Some((MatchKind::Fallback, found))
}

fn lower_eq(value: Option<&str>, expected_lower: &str) -> bool {
    value.is_some_and(|v| v.to_lowercase() == expected_lower)
}
