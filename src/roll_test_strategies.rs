use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use crate::roll::Dice;


pub(crate) fn dice_strategy() -> impl Strategy<Value = Dice> {
    (0..=100u32, 1..=100u32).prop_map(|(amount, faces)| Dice::new(amount, faces))
}

pub(crate) fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A generator that only ever yields zeroes, cheap enough to drive billions of draws.
pub(crate) struct ZeroRng;

impl rand::RngCore for ZeroRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}
