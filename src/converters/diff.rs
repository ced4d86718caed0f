//! Inter-group delta encoding
//!
//! Each group is emitted carrying the tick distance to the *next* group's
//! start, so a playback loop can play the chord and then wait `delta` ticks.
//! The encoder holds one group back until the following group's tick is
//! known. The last group has no successor and gets `FINAL_GROUP_DELTA`.
//! A successor that does not start later than its predecessor is an error.

use std::iter::Peekable;

use crate::errors::DecodeError;
use crate::models::NoteGroup;

/// Delta for the final group, so playback still advances past the end
pub const FINAL_GROUP_DELTA: u32 = 1;

/// A group paired with the wait before the next group starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedGroup<'a> {
    pub group: &'a NoteGroup,
    pub delta: u32,
}

/// Iterator adapter performing the one-group lookahead
pub struct DiffEncoder<'a, I>
where
    I: Iterator<Item = &'a NoteGroup>,
{
    groups: Peekable<I>,
}

impl<'a, I> DiffEncoder<'a, I>
where
    I: Iterator<Item = &'a NoteGroup>,
{
    pub fn new(groups: I) -> Self {
        Self {
            groups: groups.peekable(),
        }
    }
}

impl<'a, I> Iterator for DiffEncoder<'a, I>
where
    I: Iterator<Item = &'a NoteGroup>,
{
    type Item = Result<TimedGroup<'a>, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let group = self.groups.next()?;
        let delta = match self.groups.peek() {
            Some(next) => match next.tick().checked_sub(group.tick()) {
                Some(delta) if delta > 0 => delta,
                _ => {
                    return Some(Err(DecodeError::Invalid(format!(
                        "group at tick {} follows group at tick {}",
                        next.tick(),
                        group.tick()
                    ))))
                }
            },
            None => FINAL_GROUP_DELTA,
        };
        Some(Ok(TimedGroup { group, delta }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.groups.size_hint()
    }
}

/// Diff-encode a slice of groups
pub fn diff_encode(groups: &[NoteGroup]) -> DiffEncoder<'_, std::slice::Iter<'_, NoteGroup>> {
    DiffEncoder::new(groups.iter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Note;

    fn group_at(tick: u32) -> NoteGroup {
        NoteGroup::new(vec![Note::new(tick, 0, 39)]).unwrap()
    }

    fn deltas(groups: &[NoteGroup]) -> Vec<u32> {
        diff_encode(groups).map(|t| t.unwrap().delta).collect()
    }

    #[test]
    fn test_delta_points_to_next_group() {
        let groups = vec![group_at(0), group_at(4), group_at(6), group_at(13)];
        assert_eq!(deltas(&groups), vec![4, 2, 7, 1]);
    }

    #[test]
    fn test_single_group_gets_final_delta() {
        let groups = vec![group_at(9)];
        let timed: Vec<TimedGroup> = diff_encode(&groups).collect::<Result<_, _>>().unwrap();
        assert_eq!(timed.len(), 1);
        assert_eq!(timed[0].delta, FINAL_GROUP_DELTA);
        assert_eq!(timed[0].group.tick(), 9);
    }

    #[test]
    fn test_no_groups_no_output() {
        assert_eq!(diff_encode(&[]).count(), 0);
    }

    #[test]
    fn test_delta_sum_matches_song_span() {
        let ticks = [2u32, 3, 3 + 8, 20, 21, 40, 41, 100];
        let groups: Vec<NoteGroup> = ticks.iter().map(|&t| group_at(t)).collect();
        let sum: u32 = deltas(&groups).iter().sum();
        assert_eq!(sum, 100 - 2 + FINAL_GROUP_DELTA);
    }

    #[test]
    fn test_groups_emitted_in_order() {
        let groups = vec![group_at(1), group_at(5), group_at(7)];
        let emitted: Vec<u32> = diff_encode(&groups).map(|t| t.unwrap().group.tick()).collect();
        assert_eq!(emitted, vec![1, 5, 7]);
    }

    #[test]
    fn test_backwards_groups_are_an_error() {
        let groups = vec![group_at(9), group_at(2)];
        let mut timed = diff_encode(&groups);
        assert!(matches!(timed.next(), Some(Err(DecodeError::Invalid(_)))));
    }

    #[test]
    fn test_repeated_tick_is_an_error() {
        let groups = vec![group_at(3), group_at(3)];
        assert!(diff_encode(&groups).any(|t| t.is_err()));
    }
}
