/// 固定容量的环形缓冲区
///
/// 容量在构造时一次性分配，写满后新值覆盖最旧的值，不会再触发扩容。
#[derive(Debug, Clone)]
pub struct RingBuffer {
    buffer: Vec<f64>,
    capacity: usize,
    head: usize,
    count: usize,
}

impl RingBuffer {
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be greater than 0");
        Self {
            buffer: vec![0.0; capacity],
            capacity,
            head: 0,
            count: 0,
        }
    }

    /// 写入新值，缓冲区已满时返回被淘汰的最旧值
    #[inline]
    pub fn push(&mut self, value: f64) -> Option<f64> {
        let evicted = if self.is_full() {
            Some(self.buffer[self.head])
        } else {
            self.count += 1;
            None
        };

        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        evicted
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
    }

    /// 0 为最旧的值
    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        Some(self.buffer[(self.oldest() + index) % self.capacity])
    }

    /// 按从旧到新的顺序遍历
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        let oldest = self.oldest();
        (0..self.count).map(move |i| self.buffer[(oldest + i) % self.capacity])
    }

    #[inline]
    fn oldest(&self) -> usize {
        if self.is_full() { self.head } else { 0 }
    }
}
