/// Which round of the schedule is being viewed.
///
/// `0` means no rounds yet; otherwise the pointer stays in `1..=len`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundNavigator {
    pointer: usize,
}

impl RoundNavigator {
    pub fn current(&self) -> usize {
        self.pointer
    }

    pub fn has_previous(&self) -> bool {
        self.pointer > 1
    }

    pub fn has_next(&self, len: usize) -> bool {
        self.pointer < len
    }

    /// Moves back one round; no-op at round 1 or with no rounds
    pub fn previous(&mut self) -> usize {
        if self.has_previous() {
            self.pointer -= 1;
        }
        self.pointer
    }

    /// Moves forward one round; no-op at the last round
    pub fn next(&mut self, len: usize) -> usize {
        if self.has_next(len) {
            self.pointer += 1;
        }
        self.pointer
    }

    /// Jumps to the newly appended last round
    pub fn jump_to_last(&mut self, len: usize) {
        self.pointer = len;
    }

    pub fn reset(&mut self) {
        self.pointer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_at_both_ends() {
        let mut nav = RoundNavigator::default();
        assert_eq!(nav.previous(), 0);
        assert_eq!(nav.next(0), 0);

        nav.jump_to_last(3);
        assert_eq!(nav.next(3), 3);
        assert_eq!(nav.previous(), 2);
        assert_eq!(nav.previous(), 1);
        assert_eq!(nav.previous(), 1);
        assert_eq!(nav.next(3), 2);
    }
}
