// The MIT License (MIT)

// Copyright (c) 2026 The assurance Developers

// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:

// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use std::cmp::{Ord, Ordering, Eq, PartialOrd};
use std::collections::BinaryHeap;
use std::time::Instant;

use scheduler::Task;

struct SleepingTask {
    task: Task,
    expected_wakeup_time: Instant,
    // Breaks ties between equal deadlines in insertion order
    seq: u64,
}

impl PartialEq for SleepingTask {
    fn eq(&self, other: &SleepingTask) -> bool {
        self.expected_wakeup_time == other.expected_wakeup_time && self.seq == other.seq
    }
}

impl Eq for SleepingTask {}

impl PartialOrd<SleepingTask> for SleepingTask {
    fn partial_cmp(&self, other: &SleepingTask) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// BinaryHeap is a max-heap, so the earliest deadline has to compare greatest.
impl Ord for SleepingTask {
    fn cmp(&self, other: &SleepingTask) -> Ordering {
        other.expected_wakeup_time
             .cmp(&self.expected_wakeup_time)
             .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Delayed tasks, ordered by deadline
pub struct Timer {
    sleeping_tasks: BinaryHeap<SleepingTask>,
    next_seq: u64,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            sleeping_tasks: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn wait_until(&mut self, task: Task, wakeup: Instant) {
        let seq = self.next_seq;
        self.next_seq += 1;

        self.sleeping_tasks.push(SleepingTask {
            task: task,
            expected_wakeup_time: wakeup,
            seq: seq,
        });
    }

    /// Pop the earliest task whose deadline is not after `now`
    pub fn try_awake(&mut self, now: Instant) -> Option<Task> {
        let due = match self.sleeping_tasks.peek() {
            Some(sleeping) => sleeping.expected_wakeup_time <= now,
            None => false,
        };

        if due {
            self.sleeping_tasks.pop().map(|sleeping| sleeping.task)
        } else {
            None
        }
    }

    /// Deadline of the earliest sleeping task
    #[inline]
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.sleeping_tasks.peek().map(|sleeping| sleeping.expected_wakeup_time)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sleeping_tasks.len()
    }
}
