use super::*;
use equator::assert;

mod schoolbook;

/// Scratch required to multiply an `lhs_len`-word operand by an `rhs_len`-word operand.
#[inline]
pub fn mul_scratch(lhs_len: usize, rhs_len: usize) -> StackReq {
    temp_accumulator_scratch(lhs_len.saturating_add(rhs_len))
}

/// Writes the `lhs.len() + rhs.len()` words of `lhs * rhs` to `full_mul`, without normalizing.
#[inline]
#[track_caller]
pub fn imul(full_mul: &mut [Limb], lhs: &[Limb], rhs: &[Limb], stack: &mut PodStack) {
    assert!(full_mul.len() == lhs.len() + rhs.len());
    schoolbook::mul_bigint(full_mul, lhs, rhs, stack);
}

/// Computes `dst = lhs * rhs`.
///
/// Fails with [`MulError::CapacityOverflow`] when `lhs.len() + rhs.len()` exceeds `dst.capacity()`,
/// decided from the lengths alone. `dst` is left untouched on failure. `stack` must satisfy
/// [`mul_scratch`], otherwise this panics before `dst` is written.
#[track_caller]
pub fn mul(dst: &mut BigUint, lhs: &BigUint, rhs: &BigUint, stack: &mut PodStack) -> Result<(), MulError> {
    let lhs = lhs.words();
    let rhs = rhs.words();

    let full_len = lhs.len() + rhs.len();
    if full_len > dst.capacity() {
        return Err(MulError::CapacityOverflow);
    }

    if lhs.is_empty() || rhs.is_empty() {
        dst.full_words_mut()[0] = consts::LIMB_ZERO;
        dst.set_len(1);
        return Ok(());
    }

    imul(&mut dst.full_words_mut()[..full_len], lhs, rhs, stack);
    dst.set_len(full_len);
    dst.normalize();
    Ok(())
}

/// Status-code entry point: an absent argument yields [`Status::NullArgument`](math::Status::NullArgument).
#[track_caller]
pub fn mul_nullable(dst: Option<&mut BigUint>, lhs: Option<&BigUint>, rhs: Option<&BigUint>, stack: &mut PodStack) -> math::Status {
    let (Some(dst), Some(lhs), Some(rhs)) = (dst, lhs, rhs) else {
        return math::Status::NullArgument;
    };
    mul(dst, lhs, rhs, stack).into()
}
