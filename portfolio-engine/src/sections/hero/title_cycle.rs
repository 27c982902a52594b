use bevy::math::Vec2;
use constants::layout::{
    TITLE_DROP_DURATION_SECS, TITLE_DROP_MAX_DELAY_SECS, TITLE_HOLD_SECS, TITLE_LAYOUT_DELAY_SECS,
    TITLE_NEXT_WORD_SECS, TITLE_SUCK_DURATION_SECS, TITLE_SUCK_STAGGER_SECS,
};
use rand::Rng;

/// Height letters fall from, and how far left the suction pulls them.
const DROP_HEIGHT: f32 = 120.0;
const SUCK_DISTANCE: f32 = 420.0;
const MAX_SPIN_DEGREES: f32 = 300.0;
const MAX_SCATTER: f32 = 32.5;

/// Random parameters for one letter of the current word.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterDrop {
    pub delay: f32,
    pub spin: f32,
    pub scatter: f32,
}

/// Where a letter is drawn, relative to its resting layout position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterPose {
    pub offset: Vec2,
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl LetterPose {
    pub const HIDDEN: Self = Self {
        offset: Vec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
        opacity: 0.0,
    };

    pub const REST: Self = Self {
        offset: Vec2::ZERO,
        rotation: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };
}

/// Rain-in then suck-out animation cycling through the hero titles.
#[derive(Debug, Clone)]
pub struct TitleCycle {
    word_index: usize,
    started_at: f32,
    letters: Vec<LetterDrop>,
}

impl TitleCycle {
    pub fn new(word: &str, now: f32, rng: &mut impl Rng) -> Self {
        Self {
            word_index: 0,
            started_at: now,
            letters: roll_letters(word, rng),
        }
    }

    pub fn letters(&self) -> &[LetterDrop] {
        &self.letters
    }

    /// Seconds a word stays on screen before the next one starts.
    pub fn word_duration() -> f32 {
        TITLE_LAYOUT_DELAY_SECS + TITLE_HOLD_SECS + TITLE_NEXT_WORD_SECS
    }

    /// Move to the next title once the current one has been sucked away.
    /// `word_at` yields the title for an index; returns the new index.
    pub fn advance<'a>(
        &mut self,
        now: f32,
        word_count: usize,
        word_at: impl Fn(usize) -> &'a str,
        rng: &mut impl Rng,
    ) -> Option<usize> {
        if word_count == 0 || now - self.started_at < Self::word_duration() {
            return None;
        }
        self.word_index = (self.word_index + 1) % word_count;
        self.started_at = now;
        self.letters = roll_letters(word_at(self.word_index), rng);
        Some(self.word_index)
    }

    pub fn pose(&self, letter: usize, now: f32) -> LetterPose {
        let Some(drop) = self.letters.get(letter) else {
            return LetterPose::HIDDEN;
        };
        let t = now - self.started_at;

        let suck_start =
            TITLE_LAYOUT_DELAY_SECS + TITLE_HOLD_SECS + letter as f32 * TITLE_SUCK_STAGGER_SECS;
        if t >= suck_start {
            let s = ((t - suck_start) / TITLE_SUCK_DURATION_SECS).clamp(0.0, 1.0);
            let eased = s * s;
            return LetterPose {
                offset: Vec2::new(-SUCK_DISTANCE * eased, 0.0),
                rotation: 0.0,
                scale: 1.0 - 0.8 * eased,
                opacity: 1.0 - eased,
            };
        }

        let drop_start = TITLE_LAYOUT_DELAY_SECS + drop.delay;
        if t < drop_start {
            return LetterPose::HIDDEN;
        }
        let d = ((t - drop_start) / TITLE_DROP_DURATION_SECS).clamp(0.0, 1.0);
        let remaining = 1.0 - d;
        LetterPose {
            offset: Vec2::new(drop.scatter * remaining, -DROP_HEIGHT * remaining * remaining),
            rotation: drop.spin.to_radians() * remaining,
            scale: 1.0,
            opacity: d.min(0.25) * 4.0,
        }
    }
}

fn roll_letters(word: &str, rng: &mut impl Rng) -> Vec<LetterDrop> {
    word.chars()
        .map(|_| LetterDrop {
            delay: rng.gen_range(0.0..TITLE_DROP_MAX_DELAY_SECS),
            spin: rng.gen_range(-MAX_SPIN_DEGREES..MAX_SPIN_DEGREES),
            scatter: rng.gen_range(-MAX_SCATTER..MAX_SCATTER),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const WORDS: [&str; 2] = ["Frontend Developer", "Creative Coder"];

    fn cycle() -> (TitleCycle, StdRng) {
        let mut rng = StdRng::seed_from_u64(3);
        (TitleCycle::new(WORDS[0], 10.0, &mut rng), rng)
    }

    #[test]
    fn letters_are_hidden_until_their_drop_and_rest_after_it() {
        let (cycle, _) = cycle();
        assert_eq!(cycle.letters().len(), WORDS[0].chars().count());
        assert_eq!(cycle.pose(0, 10.05), LetterPose::HIDDEN);

        let landed = 10.0 + TITLE_LAYOUT_DELAY_SECS + TITLE_DROP_MAX_DELAY_SECS
            + TITLE_DROP_DURATION_SECS;
        for letter in 0..cycle.letters().len() {
            assert_eq!(cycle.pose(letter, landed), LetterPose::REST);
        }
    }

    #[test]
    fn suction_runs_left_in_letter_order() {
        let (cycle, _) = cycle();
        let t = 10.0 + TITLE_LAYOUT_DELAY_SECS + TITLE_HOLD_SECS + 0.3;
        let first = cycle.pose(0, t);
        let fifth = cycle.pose(4, t);
        assert!(first.offset.x < fifth.offset.x);
        assert!(first.offset.x < 0.0);
        assert!(first.opacity < 1.0);
    }

    #[test]
    fn next_word_starts_after_suction_began() {
        let (mut cycle, mut rng) = cycle();
        let word_at = |i: usize| WORDS[i];
        assert_eq!(cycle.advance(15.0, WORDS.len(), word_at, &mut rng), None);

        let next = 10.0 + TitleCycle::word_duration() + 0.01;
        assert_eq!(cycle.advance(next, WORDS.len(), word_at, &mut rng), Some(1));
        assert_eq!(cycle.letters().len(), WORDS[1].chars().count());

        let after = next + TitleCycle::word_duration() + 0.01;
        assert_eq!(cycle.advance(after, WORDS.len(), word_at, &mut rng), Some(0));
    }

    #[test]
    fn empty_title_lists_never_advance() {
        let (mut cycle, mut rng) = cycle();
        assert_eq!(cycle.advance(100.0, 0, |_| "", &mut rng), None);
    }
}
