//! The head/tail policy bounding how many frames of a deep stack are kept.

/// Stacks deeper than this get their middle elided.
pub const MAX_THREAD_FRAMES: usize = 100;

/// How many of the outer-most frames survive when a stack is elided.
pub const TAIL_FRAMES_WHEN_TRUNCATING: usize = 10;

/// The number of frames a report keeps unless told otherwise.
pub const DEFAULT_MAX_FRAMES: usize = 10;

/// Decides which frame indices of a stack survive into a report.
///
/// Frames are kept up to and including [`last_head_frame`], then nothing is
/// kept until the last `tail_frames_when_truncating` frames of the stack.
/// The gap only opens once a stack is longer than `max_thread_frames`.
///
/// [`last_head_frame`]: TruncationPolicy::last_head_frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationPolicy {
    pub max_thread_frames: usize,
    pub tail_frames_when_truncating: usize,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        TruncationPolicy {
            max_thread_frames: MAX_THREAD_FRAMES,
            tail_frames_when_truncating: TAIL_FRAMES_WHEN_TRUNCATING,
        }
    }
}

impl TruncationPolicy {
    /// The index of the last frame that is always kept.
    pub fn last_head_frame(&self) -> usize {
        self.max_thread_frames
            .saturating_sub(self.tail_frames_when_truncating)
            .saturating_sub(1)
    }

    /// The index of the first tail frame of a stack with `frame_count` frames.
    pub fn first_tail_frame(&self, frame_count: usize) -> usize {
        frame_count.saturating_sub(self.tail_frames_when_truncating)
    }

    /// `true` if the frame at `index` falls in the elided middle of the stack.
    pub fn is_elided(&self, index: usize, frame_count: usize) -> bool {
        index > self.last_head_frame() && index < self.first_tail_frame(frame_count)
    }

    /// The indices of a `frame_count` long stack that are kept, in order.
    pub fn retained(&self, frame_count: usize) -> impl Iterator<Item = usize> + '_ {
        (0..frame_count).filter(move |&index| !self.is_elided(index, frame_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_boundaries() {
        let policy = TruncationPolicy::default();
        assert_eq!(policy.last_head_frame(), 89);
        assert_eq!(policy.first_tail_frame(95), 85);
        assert_eq!(policy.first_tail_frame(150), 140);
        // Short stacks don't underflow.
        assert_eq!(policy.first_tail_frame(3), 0);
    }

    #[test]
    fn test_short_stacks_are_untouched() {
        let policy = TruncationPolicy::default();
        assert_eq!(policy.retained(0).count(), 0);
        assert_eq!(policy.retained(10).collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
        assert_eq!(policy.retained(89).count(), 89);
    }

    #[test]
    fn test_overlapping_head_and_tail() {
        // first_tail_frame (85) <= last_head_frame (89): nothing is elided.
        let policy = TruncationPolicy::default();
        assert_eq!(policy.retained(95).count(), 95);
        assert!((0..95).all(|i| !policy.is_elided(i, 95)));
    }

    #[test]
    fn test_gap_opens_past_max_thread_frames() {
        let policy = TruncationPolicy::default();
        assert_eq!(policy.retained(100).count(), 100);

        // One frame too many, so frame 90 goes.
        let kept = policy.retained(101).collect::<Vec<_>>();
        assert_eq!(kept.len(), 100);
        assert!(!kept.contains(&90));
        assert_eq!(kept[89], 89);
        assert_eq!(kept[90], 91);
    }

    #[test]
    fn test_deep_stack_keeps_head_and_tail() {
        let policy = TruncationPolicy::default();
        let kept = policy.retained(150).collect::<Vec<_>>();
        let expected = (0..=89).chain(140..150).collect::<Vec<_>>();
        assert_eq!(kept, expected);
        assert!(policy.is_elided(90, 150));
        assert!(policy.is_elided(139, 150));
        assert!(!policy.is_elided(140, 150));
    }

    #[test]
    fn test_custom_policy() {
        let policy = TruncationPolicy {
            max_thread_frames: 6,
            tail_frames_when_truncating: 2,
        };
        assert_eq!(policy.last_head_frame(), 3);
        let kept = policy.retained(10).collect::<Vec<_>>();
        assert_eq!(kept, vec![0, 1, 2, 3, 8, 9]);
    }
}
