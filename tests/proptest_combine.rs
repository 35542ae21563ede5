//! Property-based tests for merging win progressions.
//!
//! 1. **Both congruences**: a merged phase agrees with both inputs.
//! 2. **Minimality**: the merged phase lies in `[0, lcm)`.
//! 3. **Symmetry**: argument order does not change the merged progression.
//! 4. **Neutral element**: merging with `(1, 0)` only renormalizes.
//! 5. **Incompatibility**: phases differing by a non-multiple of the gcd never merge.
//! 6. **Positive periods**: a zero period never becomes a progression.

use hanoi_sync::combine::extended_gcd;
use hanoi_sync::{combine, GeneralWin};
use proptest::prelude::*;

fn arb_win() -> impl Strategy<Value = GeneralWin> {
	(1u64..10_000, 0u64..1_000_000).prop_filter_map("zero period", |(period, phase)| GeneralWin::new(period, phase))
}

fn gcd(a: u64, b: u64) -> u64 {
	extended_gcd(a.into(), b.into()).0 as u64
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(1000))]

	#[test]
	fn merged_phase_satisfies_both(a in arb_win(), b in arb_win()) {
		match combine(a, b).unwrap() {
			Some(merged) => {
				prop_assert_eq!(merged.period(), a.period() / gcd(a.period(), b.period()) * b.period());
				prop_assert!(merged.phase() < merged.period());
				prop_assert_eq!(merged.phase() % a.period(), a.phase() % a.period());
				prop_assert_eq!(merged.phase() % b.period(), b.phase() % b.period());
			}
			None => {
				let g = gcd(a.period(), b.period());
				prop_assert_ne!(a.phase() % g, b.phase() % g);
			}
		}
	}

	#[test]
	fn merge_is_symmetric(a in arb_win(), b in arb_win()) {
		prop_assert_eq!(combine(a, b).unwrap(), combine(b, a).unwrap());
	}

	#[test]
	fn neutral_only_renormalizes(a in arb_win()) {
		let expected = GeneralWin::new(a.period(), a.phase() % a.period()).unwrap();

		prop_assert_eq!(combine(a, GeneralWin::NEUTRAL).unwrap(), Some(expected));
		prop_assert_eq!(combine(GeneralWin::NEUTRAL, a).unwrap(), Some(expected));
	}

	#[test]
	fn incompatible_phases_never_merge(
		period_a in 1u64..1_000,
		period_b in 1u64..1_000,
		phase in 0u64..1_000_000,
		shift in 1u64..1_000,
	) {
		// Doubling both periods makes every odd shift incompatible.
		let a = GeneralWin::new(period_a * 2, phase).unwrap();
		let b = GeneralWin::new(period_b * 2, phase + shift).unwrap();
		prop_assume!(shift % gcd(a.period(), b.period()) != 0);

		prop_assert_eq!(combine(a, b).unwrap(), None);
	}

	#[test]
	fn merged_progression_is_intersection(a in arb_win(), b in arb_win(), k in 0u64..50) {
		if let Some(merged) = combine(a, b).unwrap() {
			let step = merged.phase() + k * merged.period();
			prop_assert_eq!(step % a.period(), a.phase() % a.period());
			prop_assert_eq!(step % b.period(), b.phase() % b.period());
		}
	}

	#[test]
	fn zero_period_has_no_progression(phase in any::<u64>()) {
		prop_assert_eq!(GeneralWin::new(0, phase), None);
	}
}
