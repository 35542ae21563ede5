//! Merging of periodic win progressions (generalized Chinese remainder).
//!
//! Reference: <https://math.stackexchange.com/a/3864593>

use std::fmt::{Display, Formatter};
use std::num::NonZeroU64;

use crate::error::SyncError;

/// The steps `phase + period * k`, `k >= 0`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GeneralWin {
	period: NonZeroU64,
	phase: u64,
}

impl GeneralWin {
	/// Matches every step.
	pub const NEUTRAL: GeneralWin = GeneralWin::from_nonzero(NonZeroU64::MIN, 0);

	/// `None` for a zero period.
	pub fn new(period: u64, phase: u64) -> Option<Self> {
		NonZeroU64::new(period).map(|period| Self::from_nonzero(period, phase))
	}

	pub const fn from_nonzero(period: NonZeroU64, phase: u64) -> Self {
		Self { period, phase }
	}

	pub fn period(&self) -> u64 {
		self.period.get()
	}

	pub fn phase(&self) -> u64 {
		self.phase
	}

	pub fn contains(&self, step: u64) -> bool {
		step >= self.phase && (step - self.phase) % self.period() == 0
	}
}

impl Display for GeneralWin {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} + {}k", self.phase, self.period)
	}
}

/// Returns `(gcd, s, t)` with `s * a + t * b == gcd`.
pub fn extended_gcd(a: i128, b: i128) -> (i128, i128, i128) {
	let (mut old_r, mut r) = (a, b);
	let (mut old_s, mut s) = (1, 0);
	let (mut old_t, mut t) = (0, 1);

	while r != 0 {
		let quotient = old_r.div_euclid(r);
		(old_r, r) = (r, old_r - quotient * r);
		(old_s, s) = (s, old_s - quotient * s);
		(old_t, t) = (t, old_t - quotient * t);
	}

	(old_r, old_s, old_t)
}

/// Merges two progressions into the one holding exactly the steps both agree
/// on. `Ok(None)` means they never coincide.
///
/// The merged phase is the smallest non-negative step congruent to both
/// phases, so it may lie below either input phase.
pub fn combine(a: GeneralWin, b: GeneralWin) -> Result<Option<GeneralWin>, SyncError> {
	let (gcd, s, _t) = extended_gcd(a.period().into(), b.period().into());

	let difference = i128::from(a.phase) - i128::from(b.phase);
	if difference % gcd != 0 {
		return Ok(None);
	}

	let gcd_narrow = gcd as u64;
	let reduced_b = b.period() / gcd_narrow;
	let period = NonZeroU64::new(a.period() / gcd_narrow)
		.and_then(|reduced_a| reduced_a.checked_mul(b.period))
		.ok_or_else(|| overflow(a, b))?;

	// phase = a.phase - s * (difference / gcd) * a.period  (mod period).
	// Only the multiplier of a.period modulo reduced_b matters, which keeps every
	// product below 2^128.
	let modulus = u128::from(reduced_b);
	let multiplier = (s.rem_euclid(reduced_b.into()) as u128)
		* ((difference / gcd).rem_euclid(reduced_b.into()) as u128)
		% modulus;
	let offset = multiplier * u128::from(a.period());

	let period_wide = u128::from(period.get());
	let phase = (u128::from(a.phase) % period_wide + period_wide - offset) % period_wide;

	Ok(Some(GeneralWin::from_nonzero(period, phase as u64)))
}

fn overflow(a: GeneralWin, b: GeneralWin) -> SyncError {
	SyncError::PeriodOverflow {
		a: a.period(),
		b: b.period(),
	}
}
