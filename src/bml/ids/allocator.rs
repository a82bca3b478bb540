use std::collections::HashMap;

use parking_lot::Mutex;

/// Width the counter is zero-padded to. Counters past 99999 simply widen.
const COUNTER_WIDTH: usize = 5;

/// Issues unique identifiers of the form `PREFIX00001`, strictly increasing per prefix.
///
/// All prefixes share one counter map behind a single lock, so concurrent callers never
/// observe a duplicated or skipped value.
#[derive(Debug, Default)]
pub struct IdAllocator {
    counters: Mutex<HashMap<String, u64>>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, prefix: &str) -> String {
        let mut counters = self.counters.lock();

        let counter = counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;

        format!("{prefix}{:0width$}", *counter, width = COUNTER_WIDTH)
    }

    /// Last value issued for `prefix`, 0 if none yet
    pub fn last(&self, prefix: &str) -> u64 {
        self.counters.lock().get(prefix).copied().unwrap_or(0)
    }

    /// Advances the counter for `prefix` so it never reissues `id`.
    ///
    /// Returns false if `id` is not `prefix` followed by a decimal counter.
    pub fn observe(&self, prefix: &str, id: &str) -> bool {
        let value = match id.strip_prefix(prefix).map(str::parse::<u64>) {
            Some(Ok(value)) => value,
            _ => return false,
        };

        let mut counters = self.counters.lock();

        let counter = counters.entry(prefix.to_string()).or_insert(0);
        *counter = (*counter).max(value);

        true
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::*;

    const SOME_PREFIX: &str = "ACC";
    const OTHER_PREFIX: &str = "TXN";

    #[test]
    fn next() {
        let allocator = IdAllocator::new();

        assert_eq!(allocator.next(SOME_PREFIX), "ACC00001");
        assert_eq!(allocator.next(SOME_PREFIX), "ACC00002");
        assert_eq!(allocator.next(OTHER_PREFIX), "TXN00001");
        assert_eq!(allocator.next(SOME_PREFIX), "ACC00003");

        assert_eq!(allocator.last(SOME_PREFIX), 3);
        assert_eq!(allocator.last(OTHER_PREFIX), 1);
        assert_eq!(allocator.last("CUST"), 0);
    }

    #[test]
    fn counter_widens_past_five_digits() {
        let allocator = IdAllocator::new();
        assert!(allocator.observe(SOME_PREFIX, "ACC99999"));

        assert_eq!(allocator.next(SOME_PREFIX), "ACC100000");
    }

    #[test]
    fn observe() {
        let allocator = IdAllocator::new();

        assert!(allocator.observe(SOME_PREFIX, "ACC00007"));
        assert!(allocator.observe(SOME_PREFIX, "ACC00003"));
        assert_eq!(allocator.next(SOME_PREFIX), "ACC00008");

        assert!(!allocator.observe(SOME_PREFIX, "TXN00009"));
        assert!(!allocator.observe(SOME_PREFIX, "ACCabc"));
        assert_eq!(allocator.last(SOME_PREFIX), 8);
    }

    #[test]
    fn concurrent_next_is_contiguous() {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 250;

        let allocator = Arc::new(IdAllocator::new());

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let allocator = Arc::clone(&allocator);
                thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|_| allocator.next(SOME_PREFIX))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<String> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();

        let expected: HashSet<String> = (1..=THREADS * PER_THREAD)
            .map(|n| format!("ACC{n:05}"))
            .collect();

        assert_eq!(ids, expected);
    }
}
