use std::thread;
use std::time::Duration;
use time::OffsetDateTime;

use crate::object_id::{COUNTER_MASK, ObjectId};

/// Generator for object IDs with a fixed process part.
///
/// IDs generated by one generator share their process-random bytes and
/// carry monotonically increasing counters, so they stay unique within a
/// process even when generated during the same second.
#[derive(Debug, Clone, Copy)]
pub struct ObjectIdGenerator {
    process: [u8; 5],
    next: u32,
}

/// Duration to sleep after overflowing the counter.
/// Used to avoid collisions.
const SLEEP_DURATION: Duration = Duration::from_secs(1);

impl ObjectIdGenerator {
    /// Creates a generator with fresh process-random bytes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            process: rand::random(),
            next: rand::random::<u32>() & COUNTER_MASK,
        }
    }

    /// Creates a generator with the given process bytes.
    #[must_use]
    pub const fn with_process(process: [u8; 5]) -> Self {
        Self { process, next: 0 }
    }

    /// Generates a new object ID.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// use docid_common::object_id::generator::ObjectIdGenerator;
    ///
    /// let mut g = ObjectIdGenerator::new();
    /// assert_ne!(g.generate(), g.generate());
    /// ```
    pub fn generate(&mut self) -> ObjectId {
        let id = ObjectId::from_parts(OffsetDateTime::now_utc(), self.process, self.next);

        self.next += 1;
        if self.next > COUNTER_MASK {
            self.next = 0;
            thread::sleep(SLEEP_DURATION);
        }

        id
    }

    /// Generates a series of object IDs.
    /// Faster than [`Self::generate`] for multiple IDs at a time.
    ///
    /// # Examples
    ///
    /// Basic usage:
    ///
    /// ```
    /// # use std::collections::HashSet;
    /// use docid_common::object_id::generator::ObjectIdGenerator;
    ///
    /// let mut g = ObjectIdGenerator::new();
    /// let ids = g.generate_multiple(3);
    /// let id_set: HashSet<_> = ids.iter().collect();
    /// assert_eq!(id_set.len(), ids.len());
    /// ```
    pub fn generate_multiple(&mut self, count: usize) -> Vec<ObjectId> {
        if count == 0 {
            return Vec::new();
        }

        let mut ids = Vec::with_capacity(count);
        let mut now = OffsetDateTime::now_utc();

        for _ in 0..count {
            let id = ObjectId::from_parts(now, self.process, self.next);
            ids.push(id);

            self.next += 1;
            if self.next > COUNTER_MASK {
                self.next = 0;
                thread::sleep(SLEEP_DURATION);
                now = OffsetDateTime::now_utc();
            }
        }

        ids
    }
}

impl Default for ObjectIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn it_works() {
        let mut g = ObjectIdGenerator::with_process([1, 2, 3, 4, 5]);

        let id = g.generate();
        let (_timestamp, process, counter) = id.decode_parts();
        assert_eq!(process, [1, 2, 3, 4, 5]);
        assert_eq!(counter, 0);

        let id = g.generate();
        assert_eq!(id.decode_parts().2, 1);
    }

    #[test]
    fn generate_multiple() {
        const N: usize = 10;

        let mut g = ObjectIdGenerator::new();
        let ids = g.generate_multiple(N);
        assert_eq!(ids.len(), N);

        let id_set: HashSet<_> = ids.iter().collect();
        assert_eq!(id_set.len(), N);

        assert!(g.generate_multiple(0).is_empty());
    }
}
