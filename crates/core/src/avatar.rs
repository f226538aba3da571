//! Avatar gradient selection.
//!
//! The front end ships a fixed palette of avatar gradients. New patients are given a random
//! index into it, stored alongside their record so the avatar stays stable.

use crate::{DisplayError, DisplayResult};
use rand::Rng;

/// Pick a uniform gradient index in `0..count`.
///
/// # Errors
///
/// Returns [`DisplayError::InvalidInput`] if `count` is zero.
pub fn generate_gradient_index<R: Rng + ?Sized>(rng: &mut R, count: u8) -> DisplayResult<u8> {
    if count == 0 {
        return Err(DisplayError::InvalidInput(
            "gradient count must be at least 1".into(),
        ));
    }
    Ok(rng.gen_range(0..count))
}

/// [`generate_gradient_index`] using the thread-local RNG.
pub fn random_gradient_index(count: u8) -> DisplayResult<u8> {
    generate_gradient_index(&mut rand::thread_rng(), count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRADIENT_COUNT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn indices_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let index = generate_gradient_index(&mut rng, GRADIENT_COUNT).expect("index");
            assert!(index < GRADIENT_COUNT);
        }
    }

    #[test]
    fn indices_vary() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<u8> = (0..30)
            .map(|_| generate_gradient_index(&mut rng, GRADIENT_COUNT).expect("index"))
            .collect();
        assert!(seen.len() >= 10, "only {} distinct indices", seen.len());
    }

    #[test]
    fn single_gradient_always_picks_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_gradient_index(&mut rng, 1).expect("index"), 0);
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = random_gradient_index(0).expect_err("should reject zero");
        match err {
            DisplayError::InvalidInput(msg) => assert!(msg.contains("at least 1")),
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }
}
