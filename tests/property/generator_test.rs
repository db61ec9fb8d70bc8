//! Property-based tests for password generation and the sampler.

use std::num::NonZeroU32;
use std::time::Instant;

use passkit::pass::{CharacterClass, ClassSet, GenerationOptions, charset, generate};
use passkit::rand::{EntropySource, Sampler, rejection_limit};
use passkit::strength::score;
use proptest::prelude::*;

fn class_set() -> impl Strategy<Value = ClassSet> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(lowercase, uppercase, digits, symbols)| ClassSet {
            lowercase,
            uppercase,
            digits,
            symbols,
        })
        .prop_filter("at least one class", |set| !set.is_empty())
}

/// Replays fixed draws, cycling.
struct Replay {
    draws: Vec<u32>,
    next: usize,
}

impl EntropySource for Replay {
    fn next_u32(&mut self) -> passkit::Result<u32> {
        let value = self.draws[self.next % self.draws.len()];
        self.next += 1;
        Ok(value)
    }

    fn name(&self) -> &'static str {
        "replay"
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn generated_password_honours_options(classes in class_set(), extra in 0usize..=60) {
        let length = classes.len() + extra;
        let options = GenerationOptions::new(classes, length).unwrap();
        let password = generate(&mut Sampler::os(), &options, Instant::now()).unwrap();
        let value = password.as_str();

        prop_assert_eq!(value.chars().count(), length);
        let pool = charset::build(&classes);
        prop_assert!(value.bytes().all(|b| pool.contains(&b)));
        for class in classes.iter() {
            prop_assert!(
                value.chars().any(|c| CharacterClass::of(c) == Some(class)),
                "missing {}", class
            );
        }
    }

    #[test]
    fn uniform_stays_below_max(max in 1u32..=1000, draws in proptest::collection::vec(any::<u32>(), 1..50)) {
        let max = NonZeroU32::new(max).unwrap();
        let limit = rejection_limit(max);
        prop_assume!(draws.iter().any(|&d| d < limit));

        let mut sampler = Sampler::new(Replay { draws: draws.clone(), next: 0 });
        let value = sampler.uniform(max).unwrap();
        prop_assert!(value < max.get());

        let first_accepted = draws.iter().copied().find(|&d| d < limit).unwrap();
        prop_assert_eq!(value, first_accepted % max.get());
    }

    #[test]
    fn base_entropy_grows_with_repeats(prefix in "[a-z0-9]{1,8}", times in 1usize..6) {
        let shorter = score(&prefix.repeat(times));
        let longer = score(&prefix.repeat(times + 1));
        prop_assert!(longer.base_entropy_bits >= shorter.base_entropy_bits);
    }
}

#[test]
fn lowercase_and_digits_only() {
    let options = GenerationOptions::new(
        ClassSet::only(&[CharacterClass::Lowercase, CharacterClass::Digit]),
        8,
    )
    .unwrap();
    let mut sampler = Sampler::os();
    for _ in 0..200 {
        let password = generate(&mut sampler, &options, Instant::now()).unwrap();
        assert_eq!(password.len(), 8);
        assert!(
            password
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        );
    }
}
