use crate::pose::{Pose, PoseGenerator};

pub const DEFAULT_CAPACITY: usize = 42;

/// A pose in the retention list, tagged with the order it was spawned in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed {
    /// Strictly increasing across the store's lifetime, never reused
    pub id: u64,
    pub pose: Pose,
}

/// Bounded spawn-ordered list of placed paddles
///
/// Appending past `capacity` drops entries from the front, so the list always
/// holds the most recent `capacity` spawns in the order they arrived.
#[derive(Debug, Clone)]
pub struct RetentionStore {
    entries: Vec<Placed>,
    capacity: usize,
    next_id: u64,
    generator: PoseGenerator,
}

impl RetentionStore {
    /// Capacity is clamped to at least one entry
    pub fn new(capacity: usize, generator: PoseGenerator) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
            next_id: 0,
            generator,
        }
    }

    /// Replace the contents with the seed list
    ///
    /// A seed longer than the capacity keeps only its last `capacity` poses.
    pub fn initialize(&mut self, seed: &[Pose]) {
        self.entries.clear();
        for pose in seed {
            self.push(*pose);
        }
    }

    /// Append one freshly generated pose and evict from the front if full
    pub fn tick(&mut self) -> &[Placed] {
        let pose = self.generator.generate();
        self.push(pose);
        &self.entries
    }

    /// Append a pose, returning how many entries were evicted to make room
    pub fn push(&mut self, pose: Pose) -> usize {
        let placed = Placed {
            id: self.next_id,
            pose,
        };
        self.next_id += 1;
        self.entries.push(placed);

        let excess = self.entries.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.entries.drain(..excess);
        }
        excess
    }

    /// Drop every entry; ids keep counting up
    pub fn release(&mut self) {
        self.entries.clear();
        self.entries.shrink_to_fit();
    }

    pub fn entries(&self) -> &[Placed] {
        &self.entries
    }

    pub fn poses(&self) -> impl Iterator<Item = &Pose> + '_ {
        self.entries.iter().map(|placed| &placed.pose)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
