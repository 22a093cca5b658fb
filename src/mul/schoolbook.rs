use super::*;
use equator::debug_assert;

#[inline]
pub fn mul_bigint(full_mul: &mut [Limb], lhs: &[Limb], rhs: &[Limb], stack: &mut PodStack) {
    debug_assert!(full_mul.len() == lhs.len() + rhs.len());
    let (acc, _) = temp_accumulator_zero(full_mul.len(), stack);

    for (i, &l) in lhs.iter().enumerate() {
        let row = &mut acc[i..];
        let mut carry = consts::LIMB_ZERO;
        for (slot, &r) in core::iter::zip(&mut *row, rhs) {
            let big = *slot + carry as DoubleLimb + r as DoubleLimb * l as DoubleLimb;
            *slot = big as Limb as DoubleLimb;
            carry = (big >> consts::LIMB_BITS) as Limb;
        }
        row[rhs.len()] += carry as DoubleLimb;
    }

    let mut carry: DoubleLimb = 0;
    for (dst, &slot) in core::iter::zip(&mut *full_mul, &*acc) {
        let big = slot + carry;
        *dst = big as Limb;
        carry = big >> consts::LIMB_BITS;
    }
    debug_assert!(carry == 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use equator::assert;

    fn mul_reference(lhs: &[Limb], rhs: &[Limb]) -> alloc::vec::Vec<Limb> {
        let mut out = alloc::vec![0; lhs.len() + rhs.len()];
        for (i, &l) in lhs.iter().enumerate() {
            let mut carry = 0u128;
            for (j, &r) in rhs.iter().enumerate() {
                let big = out[i + j] as u128 + (l as u128) * (r as u128) + carry;
                out[i + j] = big as u64;
                carry = big >> 64;
            }
            let mut k = i + rhs.len();
            while carry != 0 {
                let big = out[k] as u128 + carry;
                out[k] = big as u64;
                carry = big >> 64;
                k += 1;
            }
        }
        out
    }

    fn run(lhs: &[Limb], rhs: &[Limb]) -> alloc::vec::Vec<Limb> {
        let mut full_mul = alloc::vec![0xdead_beef; lhs.len() + rhs.len()];
        let mut mem = PodBuffer::new(math::mul_scratch(lhs.len(), rhs.len()));
        mul_bigint(&mut full_mul, lhs, rhs, PodStack::new(&mut mem));
        full_mul
    }

    #[test]
    fn test_mul_bigint_single() {
        let a = [0xffff_ffff_ffff_ffff];
        let b = [0xffff_ffff_ffff_ffff];
        let wide = u64::MAX as u128 * u64::MAX as u128;
        assert!(run(&a, &b) == alloc::vec![wide as u64, (wide >> 64) as u64]);
    }

    #[test]
    fn test_mul_bigint_keeps_top_zero() {
        assert!(run(&[2], &[3]) == alloc::vec![6, 0]);
        assert!(run(&[0, 0], &[7]) == alloc::vec![0, 0, 0]);
    }

    #[test]
    fn test_mul_bigint_all_ones() {
        let a = [u64::MAX; 4];
        let b = [u64::MAX; 3];
        assert!(run(&a, &b) == mul_reference(&a, &b));
        assert!(run(&a, &b) == alloc::vec![1, 0, 0, u64::MAX, u64::MAX - 1, u64::MAX, u64::MAX]);
    }

    #[test]
    fn test_mul_bigint_mixed() {
        let a = [
            0b1011101010000111011110010011110100000111110100101000001110111010,
            0b1100010001100101001000000011111111000110110111000011101100100011,
            0b0010011001001000000010000100111100111110101010011101001010110011,
        ];
        let b = [
            0b1010011010101111010001111011000010010000010011100111000110001101,
            0,
            0b0111010110010111001111010001100111100100000111101011100000111011,
            0b1101101011111000100111001000000101000100110011101110001010011100,
        ];
        assert!(run(&a, &b) == mul_reference(&a, &b));
        assert!(run(&b, &a) == mul_reference(&a, &b));
    }

    #[test]
    fn test_mul_bigint_reuses_stack() {
        let a = [3, u64::MAX];
        let b = [u64::MAX, 5];

        let mut mem = PodBuffer::new(math::mul_scratch(2, 2));
        let mut stack = PodStack::new(&mut mem);
        let mut x = [0u64; 4];
        let mut y = [0u64; 4];

        mul_bigint(&mut x, &a, &b, stack.rb_mut());
        mul_bigint(&mut y, &b, &a, stack.rb_mut());
        assert!(all(x == y, x.as_slice() == mul_reference(&a, &b).as_slice()));
    }
}
