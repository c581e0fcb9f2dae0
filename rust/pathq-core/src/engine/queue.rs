use std::cmp::Ordering;
use std::fmt;

/// Ordering capability injected into a [`PriorityQueue`] at construction.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// A binary min-heap over an arbitrary element type.
///
/// Elements are ordered by a comparator fixed for the lifetime of the queue;
/// the root of the backing array is always an element that compares `<=`
/// every other element. Equal elements come out in whatever order the heap
/// structure produces, there is no secondary key.
///
/// Iteration walks the backing array in storage order, which is not sorted
/// order. Use [`PriorityQueue::into_sorted_vec`] when a sorted sequence is
/// needed.
pub struct PriorityQueue<T> {
    data: Vec<T>,
    comparator: Comparator<T>,
}

impl<T: Ord + 'static> PriorityQueue<T> {
    /// Create an empty queue ordered ascending by `T`'s natural order.
    ///
    /// Floats are not `Ord`; order them with
    /// `PriorityQueue::with_comparator(|a: &f64, b: &f64| a.total_cmp(b))`.
    pub fn new() -> Self {
        Self::with_comparator(T::cmp)
    }

    /// Create a queue from `values` ordered ascending by `T`'s natural order.
    pub fn from_vec(values: Vec<T>) -> Self {
        Self::from_vec_with_comparator(values, T::cmp)
    }
}

impl<T: Ord + 'static> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue ordered by `comparator`.
    pub fn with_comparator<F>(comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            data: Vec::new(),
            comparator: Box::new(comparator),
        }
    }

    /// Create a queue from `values` ordered by `comparator`.
    ///
    /// The values are heapified by sifting each index up in turn, starting
    /// at 0, so the resulting layout is the one repeated `enqueue` calls
    /// would produce.
    pub fn from_vec_with_comparator<F>(values: Vec<T>, comparator: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        let mut queue = Self {
            data: values,
            comparator: Box::new(comparator),
        };
        queue.heapify();
        queue
    }

    fn heapify(&mut self) {
        for pos in 0..self.data.len() {
            self.sift_up(pos);
        }
    }

    /// Number of elements in the queue.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Insert `value` and return the backing array after the insertion.
    pub fn enqueue(&mut self, value: T) -> &[T] {
        self.data.push(value);
        let last = self.data.len() - 1;
        self.sift_up(last);
        &self.data
    }

    /// Remove and return the minimum element, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let ret = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }
        Some(ret)
    }

    /// The minimum element without removing it, or `None` when empty.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Drop every element. Capacity is retained.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Iterate the backing array in storage order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Drain the queue by repeated `dequeue`, yielding a sequence sorted
    /// ascending under the comparator.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.data.len());
        while let Some(v) = self.dequeue() {
            out.push(v);
        }
        out
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        (self.comparator)(&self.data[a], &self.data[b]) == Ordering::Less
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.less(pos, parent) {
                self.data.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut min = pos;
            if left < len && self.less(left, min) {
                min = left;
            }
            if right < len && self.less(right, min) {
                min = right;
            }
            if min == pos {
                break;
            }
            self.data.swap(min, pos);
            pos = min;
        }
    }
}

impl<'a, T> IntoIterator for &'a PriorityQueue<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.enqueue(v);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.data.len())
            .field("data", &self.data)
            .finish()
    }
}
