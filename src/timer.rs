//! Delay queue for timed continuations.
//!
//! Presentation delays and round-end pauses are modelled as items scheduled to fire after
//! some simulated time. The queue is advanced by the tick loop and never blocks; an item
//! whose delay elapses during a tick is handed back from [`DelayQueue::advance`].

/// Handle used to cancel a scheduled item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<T> {
    due: f64,
    id: TimerId,
    item: T,
}

/// Items waiting for their delay to elapse, ordered by due time then insertion order.
#[derive(Debug)]
pub struct DelayQueue<T> {
    now: f64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DelayQueue<T> {
    /// An empty queue with its clock at zero.
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            entries: vec![],
        }
    }

    /// Schedules `item` to fire `delay` seconds from now. Negative delays count as zero.
    pub fn schedule(&mut self, delay: f32, item: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now + f64::from(delay.max(0.0));
        // keep FIFO order among equal due times
        let pos = self.entries.partition_point(|e| e.due <= due);
        self.entries.insert(pos, Entry { due, id, item });
        id
    }

    /// Removes a pending item. Returns it if it had not fired yet.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).item)
    }

    /// Drops every pending item.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Moves the clock forward and returns the items that became due, earliest first.
    pub fn advance(&mut self, dt: f32) -> Vec<T> {
        self.now += f64::from(dt.max(0.0));
        let ready = self.entries.partition_point(|e| e.due <= self.now);
        self.entries.drain(..ready).map(|e| e.item).collect()
    }

    /// Time left before `id` fires.
    pub fn remaining(&self, id: TimerId) -> Option<f32> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| (e.due - self.now) as f32)
    }

    /// Number of pending items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
