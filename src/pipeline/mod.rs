//! List assembly, filtering and the snapshot build.
//!
//! - `assemble`: dedup, sort and truncate each content list
//! - `filter` / `axes`: search and category filtering over an assembled list
//! - `build`: collect every source and write the site snapshot

pub mod assemble;
pub mod axes;
pub mod build;
pub mod filter;

pub use assemble::{
    assemble_articles, assemble_assets, assemble_repositories, assemble_talks,
};
pub use build::{collect_snapshot, run_build};
pub use filter::{AxisOptions, FilterEngine, FilterState, FilterView, Filterable};
