//! Loaded descriptors plus the network/group navigation used by the menu

use super::descriptor::PoolDescriptor;
use once_cell::sync::{Lazy, OnceCell};

#[derive(Debug, Default)]
pub struct PoolRegistry {
    descriptors: Vec<PoolDescriptor>,
}

impl PoolRegistry {
    pub fn new(descriptors: Vec<PoolDescriptor>) -> Self {
        Self { descriptors }
    }

    pub fn all(&self) -> &[PoolDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Distinct chains in first-appearance order (case-insensitive)
    pub fn networks(&self) -> Vec<String> {
        let mut networks: Vec<String> = Vec::new();
        for descriptor in &self.descriptors {
            let network = descriptor.network();
            if !networks.iter().any(|n| n.eq_ignore_ascii_case(network)) {
                networks.push(network.to_string());
            }
        }
        networks
    }

    /// Distinct groups within `network`, first-appearance order
    pub fn groups(&self, network: &str) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for descriptor in self.in_network(network) {
            let group = descriptor.group();
            if !groups.iter().any(|g| g.eq_ignore_ascii_case(&group)) {
                groups.push(group);
            }
        }
        groups
    }

    /// Descriptors of `network`, narrowed to `group` when given
    pub fn select(&self, network: &str, group: Option<&str>) -> Vec<PoolDescriptor> {
        self.in_network(network)
            .filter(|d| group.map_or(true, |g| d.group().eq_ignore_ascii_case(g)))
            .cloned()
            .collect()
    }

    /// Network by menu index
    pub fn network_at(&self, index: usize) -> Option<String> {
        self.networks().into_iter().nth(index)
    }

    /// (network, group) by menu indices
    pub fn group_at(&self, network_index: usize, group_index: usize) -> Option<(String, String)> {
        let network = self.network_at(network_index)?;
        let group = self.groups(&network).into_iter().nth(group_index)?;
        Some((network, group))
    }

    fn in_network<'a>(&'a self, network: &'a str) -> impl Iterator<Item = &'a PoolDescriptor> {
        self.descriptors
            .iter()
            .filter(move |d| d.network().eq_ignore_ascii_case(network))
    }
}

static POOL_REGISTRY: OnceCell<PoolRegistry> = OnceCell::new();
static EMPTY_REGISTRY: Lazy<PoolRegistry> = Lazy::new(PoolRegistry::default);

/// Install the registry loaded at startup; later calls are ignored
pub fn init_registry(registry: PoolRegistry) -> bool {
    POOL_REGISTRY.set(registry).is_ok()
}

/// The startup registry, or an empty one before initialization
pub fn get_registry() -> &'static PoolRegistry {
    POOL_REGISTRY.get().unwrap_or(&EMPTY_REGISTRY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(chain: &str, symbol: &str, comment: &str) -> PoolDescriptor {
        PoolDescriptor {
            chain: chain.to_string(),
            symbol: symbol.to_string(),
            user_comment: comment.to_string(),
            ..PoolDescriptor::default()
        }
    }

    fn registry() -> PoolRegistry {
        PoolRegistry::new(vec![
            pool("Ethereum", "USDC", "Aave USDC"),
            pool("Arbitrum", "USDC", "Comet USDC"),
            pool("ethereum", "DAI-USDC-USDT", "Curve 3pool"),
            pool("Ethereum", "usdc", "Morpho USDC"),
            pool("Base", "WETH", "Aerodrome WETH"),
        ])
    }

    #[test]
    fn test_networks_in_first_appearance_order() {
        assert_eq!(registry().networks(), vec!["Ethereum", "Arbitrum", "Base"]);
    }

    #[test]
    fn test_groups_per_network() {
        let registry = registry();
        assert_eq!(registry.groups("Ethereum"), vec!["USDC", "DAI"]);
        assert_eq!(registry.groups("Base"), vec!["WETH"]);
        assert!(registry.groups("Optimism").is_empty());
    }

    #[test]
    fn test_select() {
        let registry = registry();
        let usdc: Vec<String> = registry
            .select("Ethereum", Some("USDC"))
            .into_iter()
            .map(|d| d.user_comment)
            .collect();
        assert_eq!(usdc, vec!["Aave USDC", "Morpho USDC"]);
        assert_eq!(registry.select("ETHEREUM", None).len(), 3);
    }

    #[test]
    fn test_index_lookup() {
        let registry = registry();
        assert_eq!(registry.network_at(1).as_deref(), Some("Arbitrum"));
        assert_eq!(registry.network_at(9), None);
        assert_eq!(
            registry.group_at(0, 1),
            Some(("Ethereum".to_string(), "DAI".to_string()))
        );
        assert_eq!(registry.group_at(2, 1), None);
    }

    #[test]
    fn test_uninitialized_registry_is_empty() {
        // The global is only set by run(); tests never initialize it
        assert!(get_registry().is_empty());
    }
}
