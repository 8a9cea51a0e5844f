//! Tracked pools: descriptors, menu navigation, DefiLlama matching, reports

pub mod descriptor;
pub mod matcher;
pub mod registry;
pub mod report;

pub use descriptor::{load_pool_descriptors, parse_pool_descriptors, PoolDescriptor};
pub use matcher::{match_descriptor, MatchKind};
pub use registry::{get_registry, init_registry, PoolRegistry};
pub use report::{assemble_report, build_report, render_report, ApySource, PoolReportLine};
