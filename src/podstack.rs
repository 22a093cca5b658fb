use super::*;
use equator::assert;

#[inline]
pub fn temp_accumulator_scratch(nslots: usize) -> StackReq {
    StackReq::new::<DoubleLimb>(nslots)
}

/// Carves `nslots` zeroed double-width slots out of `stack`.
#[inline]
#[track_caller]
pub fn temp_accumulator_zero(nslots: usize, stack: &mut PodStack) -> (&mut [DoubleLimb], &mut PodStack) {
    let (acc, stack) = stack.make_raw::<DoubleLimb>(nslots);
    acc.fill(0);
    (acc, stack)
}

#[inline]
pub fn temp_uint_scratch(capacity: usize) -> StackReq {
    StackReq::new::<u64>(1 + capacity)
}

/// Carves the value zero with room for `capacity` words out of `stack`.
#[inline]
#[track_caller]
pub fn temp_uint_zero(capacity: usize, stack: &mut PodStack) -> (&mut BigUint, &mut PodStack) {
    assert!(all(core::mem::size_of::<Limb>() == 8, capacity > 0));
    let (buf, stack) = stack.make_raw::<u64>(1 + capacity);
    buf.fill(0);
    buf[0] = 1;
    let buf = buf.as_mut_ptr();
    let buf = core::ptr::slice_from_raw_parts_mut(buf, capacity) as *mut BigUint;
    (unsafe { &mut *buf }, stack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;

    #[test]
    fn test_temp_uint_zero() {
        let mut mem = PodBuffer::new(temp_uint_scratch(5).and(temp_uint_scratch(2)));
        let stack = PodStack::new(&mut mem);

        let (x, stack) = temp_uint_zero(5, stack);
        let (y, _) = temp_uint_zero(2, stack);

        assert!(all(
            x.capacity() == 5,
            y.capacity() == 2,
            x.repr() == Bignum::zero().repr(),
            y.repr() == Bignum::zero().repr(),
        ));
    }

    #[test]
    fn test_temp_accumulator_zero() {
        let mut mem = [u128::MAX; 8];
        let stack = PodStack::new(bytemuck::cast_slice_mut(&mut mem));

        let (acc, _) = temp_accumulator_zero(4, stack);
        assert!(all(acc.len() == 4, acc.iter().all(|&slot| slot == 0)));
    }
}
