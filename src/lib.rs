//! Tabulate how often attributes and values occur over a set of entities,
//! and draw the counts as bar charts.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use attr_tally::{count_by_size, BarChart};
//!
//! let samples: BTreeMap<&str, Option<Vec<&str>>> = BTreeMap::from([
//!     ("a", None),
//!     ("b", Some(vec!["tissue", "age"])),
//!     ("c", Some(vec!["tissue"])),
//! ]);
//!
//! let hist = count_by_size(&samples);
//! assert_eq!(hist.total(), samples.len());
//!
//! let chart = BarChart::from_histogram("Attributes", &hist, |k| k.to_string());
//! assert_eq!(chart.bars().len(), 3);
//! ```

mod chart;
pub use chart::{BarChart, DEFAULT_WIDTH};

mod outline;
pub use outline::{Outline, Section, MISSING};

mod tally;
pub use tally::{
    count_by_size, count_by_value, count_labels, count_matches, Histogram,
    MatchCount,
};
