//! Heap engine: binary min-heap primitives over a slice and an [`Order`].
//!
//! Storage is 0-indexed: `parent(i) = (i - 1) / 2`, children `2i + 1` and
//! `2i + 2`. The heap property is `order.le(heap[parent(i)], heap[i])` for
//! every `i > 0`.

#![forbid(unsafe_code)]

use crate::order::Order;
use std::cmp::Ordering;

/// Move the element at `index` up until its parent is no greater.
pub fn sift_up<T, O: Order<T> + ?Sized>(heap: &mut [T], mut index: usize, order: &O) {
    if index >= heap.len() {
        return;
    }
    while index > 0 {
        let parent = (index - 1) / 2;
        if order.compare(&heap[index], &heap[parent]) == Ordering::Less {
            heap.swap(index, parent);
            index = parent;
        } else {
            break;
        }
    }
}

/// Move the element at `index` down, swapping with the smaller child, until
/// neither child is smaller.
pub fn sift_down<T, O: Order<T> + ?Sized>(heap: &mut [T], mut index: usize, order: &O) {
    let len = heap.len();
    if index >= len {
        return;
    }
    loop {
        let left = 2 * index + 1;
        let right = left + 1;
        let mut smallest = index;

        if left < len && order.compare(&heap[left], &heap[smallest]) == Ordering::Less {
            smallest = left;
        }
        if right < len && order.compare(&heap[right], &heap[smallest]) == Ordering::Less {
            smallest = right;
        }

        if smallest == index {
            break;
        }

        heap.swap(index, smallest);
        index = smallest;
    }
}

/// Arrange `heap` into a valid min-heap in O(n).
pub fn heapify<T, O: Order<T> + ?Sized>(heap: &mut [T], order: &O) {
    for index in (0..heap.len() / 2).rev() {
        sift_down(heap, index, order);
    }
}

/// Append `value` and restore the heap property.
pub fn push<T, O: Order<T> + ?Sized>(heap: &mut Vec<T>, value: T, order: &O) {
    heap.push(value);
    let last = heap.len() - 1;
    sift_up(heap, last, order);
}

/// Remove the root (a minimal element) and restore the heap property.
///
/// Returns `None` if the heap is empty.
pub fn pop_min<T, O: Order<T> + ?Sized>(heap: &mut Vec<T>, order: &O) -> Option<T> {
    if heap.is_empty() {
        return None;
    }
    let last = heap.len() - 1;
    heap.swap(0, last);
    let min = heap.pop();
    if !heap.is_empty() {
        sift_down(heap, 0, order);
    }
    min
}

/// Check the heap property over the whole slice.
pub fn is_heap<T, O: Order<T> + ?Sized>(heap: &[T], order: &O) -> bool {
    (1..heap.len()).all(|i| order.le(&heap[(i - 1) / 2], &heap[i]))
}
