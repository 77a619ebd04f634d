use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::{NodeRecord, Range};

/// Occurrences of one node kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRow {
    pub syntax: String,
    pub ranges: Vec<Range>,
}

/// Groups the node records, tokens excluded, by label in label order.
pub fn statistics(records: &[NodeRecord]) -> Vec<StatisticsRow> {
    let mut rows: BTreeMap<&str, Vec<Range>> = BTreeMap::new();
    for record in records.iter().filter(|record| record.token.is_none()) {
        rows.entry(&record.text).or_default().push(record.range);
    }

    rows.into_iter()
        .map(|(syntax, ranges)| StatisticsRow { syntax: syntax.to_owned(), ranges })
        .collect()
}
