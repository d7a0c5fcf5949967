use crate::preset::Preset;
use crate::sample;
use crate::types::Slot;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct Branch {
    pub pos: Vec2,
    /// Relative vigor in `(0, 1]`; `1.0` for the seed, split multiplicatively.
    pub size: f32,
    /// Distance travelled before the branch splits. Sampled once; may be
    /// negative (the segment is then drawn backward along `direction`).
    pub length: f32,
    /// Heading in radians.
    pub direction: f32,
}

#[derive(Debug)]
pub struct Tree {
    /// Append-only slot list. A slot is `Some` until its branch is
    /// activated, then `None` forever; slots are never removed or
    /// reordered, so indices handed out earlier stay valid.
    pub branches: Vec<Option<Branch>>,
    pub preset: Preset,
}

impl Branch {
    pub fn end_pos(&self) -> Vec2 {
        self.pos + self.length * Vec2::from_angle(self.direction)
    }
}

impl Tree {
    /// Creates a tree holding only the seed branch.
    ///
    /// The seed starts at `origin` with full size `1.0`, heads along
    /// `direction`, and gets its length from one draw of
    /// `Normal(branch_length_mean, branch_length_range)`.
    pub fn new(origin: Vec2, direction: f32, preset: Preset, rng: &mut impl Rng) -> Self {
        let length = sample::normal(rng, preset.branch_length_mean, preset.branch_length_range);
        let seed = Branch {
            pos: origin,
            size: 1.0,
            length,
            direction,
        };

        Self {
            branches: vec![Some(seed)],
            preset,
        }
    }

    pub fn append(&mut self, branch: Branch) -> Slot {
        let slot: usize = self.branches.len();
        self.branches.push(Some(branch));
        slot
    }

    /// Takes the branch out of `slot`, leaving the slot dead.
    ///
    /// Returns `None` for a slot that is already dead or out of range.
    pub fn take(&mut self, slot: Slot) -> Option<Branch> {
        self.branches.get_mut(slot).and_then(Option::take)
    }

    pub fn live_count(&self) -> usize {
        self.branches.iter().filter(|b| b.is_some()).count()
    }
}
