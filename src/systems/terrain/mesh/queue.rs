// FIFO work queue, used both to grow the mesh and to walk it each frame

use std::collections::VecDeque;

use super::error::{TerrainError, TerrainResult};

#[derive(Debug, Clone)]
pub struct WorkQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }
}

impl<T> WorkQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }

    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Append all items at the back, keeping their relative order.
    pub fn enqueue_many<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.items.extend(items);
    }

    pub fn dequeue(&mut self) -> TerrainResult<T> {
        self.items.pop_front().ok_or(TerrainError::EmptyQueue)
    }

    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Front to back, without consuming anything.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// One full rotation: every item is taken from the front, handed to
    /// `visit`, and put back at the end. Order is unchanged afterwards.
    ///
    /// The item count is read once up front.
    pub fn rotate_once<F: FnMut(&T)>(&mut self, mut visit: F) -> TerrainResult<()> {
        let count = self.size();
        for _ in 0..count {
            let item = self.dequeue()?;
            visit(&item);
            self.enqueue(item);
        }
        Ok(())
    }
}
