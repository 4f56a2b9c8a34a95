mod filter;
mod walker;

pub use filter::{extract_path, matches, normalize_path};
pub use walker::{collect_source_files, scan_tree};
