//! Comparison settings.

use serde::{Deserialize, Serialize};

/// Which axes may contain inserted or removed lines.
///
/// When an axis is not gap-aware, index `n` on one side always corresponds to index `n` on the
/// other. When it is, rows (or columns) are aligned by content first and unmatched ones are
/// reported as redundant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    pub consider_row_gaps: bool,
    pub consider_column_gaps: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        DiffConfig {
            consider_row_gaps: true,
            consider_column_gaps: false,
        }
    }
}
