// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use super::types::{Change, Timestamp};

/// Collects the `$dumpvars` snapshot and the `#<time>` change sets while the
/// body is parsed.
///
/// Timestamps are kept in the order they are read. Nothing is merged, sorted
/// or deduplicated.
#[derive(Debug, Default)]
pub(crate) struct ValueChangeLog {
    initial_dump: Vec<Change>,
    timestamps: Vec<Timestamp>,
}

impl ValueChangeLog {
    pub(crate) fn new() -> ValueChangeLog {
        ValueChangeLog::default()
    }

    /// Append a finished `#<time>` block.
    pub(crate) fn push_timestamp(&mut self, tmstmp: Timestamp) {
        log::trace!(
            "committed #{} with {} changes",
            tmstmp.time,
            tmstmp.changes.len()
        );
        self.timestamps.push(tmstmp);
    }

    pub(crate) fn record_initial(&mut self, change: Change) {
        self.initial_dump.push(change);
    }

    pub(crate) fn num_timestamps(&self) -> usize {
        self.timestamps.len()
    }

    pub(crate) fn finish(self) -> (Vec<Change>, Vec<Timestamp>) {
        (self.initial_dump, self.timestamps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn timestamps_keep_read_order() {
        let mut log = ValueChangeLog::new();
        log.push_timestamp(Timestamp {
            time: 3,
            changes: vec![Change::new("!", "1"), Change::new("!", "0")],
        });
        log.push_timestamp(Timestamp {
            time: 1,
            changes: vec![],
        });
        assert_eq!(log.num_timestamps(), 2);

        let (initial, timestamps) = log.finish();
        assert!(initial.is_empty());
        let times: Vec<u64> = timestamps.iter().map(|t| t.time).collect();
        assert_eq!(times, vec![3, 1]);
        assert_eq!(
            timestamps[0].changes,
            vec![Change::new("!", "1"), Change::new("!", "0")]
        );
    }

    #[test]
    fn initial_dump_is_kept_apart() {
        let mut log = ValueChangeLog::new();
        log.record_initial(Change::new("!", "x"));
        log.push_timestamp(Timestamp {
            time: 0,
            changes: vec![Change::new("!", "0")],
        });
        log.record_initial(Change::new("\"", "z"));

        let (initial, timestamps) = log.finish();
        assert_eq!(initial, vec![Change::new("!", "x"), Change::new("\"", "z")]);
        assert_eq!(timestamps.len(), 1);
        assert_eq!(timestamps[0].changes, vec![Change::new("!", "0")]);
    }
}
