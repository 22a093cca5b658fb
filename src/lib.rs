use bytemuck::{Pod, Zeroable};
use core::num::NonZeroUsize;
use dyn_stack::{PodBuffer, PodStack, StackReq};
use equator::assert;
use reborrow::*;

extern crate alloc;

mod mul;

mod podstack;
pub use podstack::{temp_accumulator_scratch, temp_accumulator_zero, temp_uint_scratch, temp_uint_zero};

pub type Limb = u64;

/// Accumulator slot wide enough to hold `Limb * Limb + Limb + Limb` without overflow.
pub type DoubleLimb = u128;

/// Default word buffer of the surrounding big integer type.
pub type Bignum = SmallUint<{ consts::DEFAULT_CAPACITY }>;

pub mod utils {
    use crate::{BigUint, Limb};

    #[derive(Copy, Clone, PartialEq, Eq)]
    #[repr(transparent)]
    pub struct HexRepr(pub Limb);

    unsafe impl bytemuck::TransparentWrapper<Limb> for HexRepr {}

    impl core::fmt::Debug for HexRepr {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            let width = crate::consts::LIMB_BITS as usize / 4 + 2;
            write!(f, "{:#0width$x}", self.0)
        }
    }

    /// Compares and prints only the significant words of a [`BigUint`].
    #[repr(transparent)]
    pub struct UintRepr {
        pub inner: BigUint,
    }

    impl PartialEq for UintRepr {
        fn eq(&self, other: &Self) -> bool {
            self.inner.words() == other.inner.words()
        }
    }

    impl core::fmt::Debug for UintRepr {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            use bytemuck::TransparentWrapper;

            f.debug_struct("UintRepr")
                .field("len", &self.inner.len())
                .field("capacity", &self.inner.capacity())
                .field("words", &HexRepr::wrap_slice(self.inner.words()))
                .finish()
        }
    }
}

pub mod math {
    /// Outcome of a multiplication, with the numeric codes of the C-style interface.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    #[repr(i8)]
    pub enum Status {
        CapacityOverflow = -2,
        NullArgument = -1,
        Success = 0,
    }

    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub enum MulError {
        /// The destination, or one of the operands, was absent.
        NullArgument,
        /// `lhs.len() + rhs.len()` exceeds the capacity of the destination.
        CapacityOverflow,
    }

    impl Status {
        #[inline]
        pub const fn code(self) -> i8 {
            self as i8
        }

        #[inline]
        pub const fn is_success(self) -> bool {
            matches!(self, Self::Success)
        }
    }

    impl From<Result<(), MulError>> for Status {
        #[inline]
        fn from(value: Result<(), MulError>) -> Self {
            match value {
                Ok(()) => Self::Success,
                Err(MulError::NullArgument) => Self::NullArgument,
                Err(MulError::CapacityOverflow) => Self::CapacityOverflow,
            }
        }
    }

    impl core::fmt::Display for MulError {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            match self {
                MulError::NullArgument => f.write_str("missing destination or operand"),
                MulError::CapacityOverflow => f.write_str("product does not fit in the destination capacity"),
            }
        }
    }

    impl std::error::Error for MulError {}

    use super::*;

    /// Multiplies two normalized integers into a distinct destination.
    pub use mul::mul;

    /// Same as [`mul`], taking possibly absent arguments and reporting a [`Status`].
    pub use mul::mul_nullable;

    /// Scratch memory needed by [`mul`] and [`imul`].
    pub use mul::mul_scratch;

    /// Full, unnormalized product of two word slices.
    pub use mul::imul;
}

use math::MulError;

/// Allocating front end for multiplications into a fixed destination capacity.
#[derive(Copy, Clone, Debug)]
pub struct CapacityCtx {
    capacity: NonZeroUsize,
}

impl CapacityCtx {
    #[track_caller]
    #[inline]
    pub fn new(capacity: usize) -> Self {
        let Some(capacity) = NonZeroUsize::new(capacity) else {
            panic!("a capacity of zero words cannot hold the value zero");
        };
        Self { capacity }
    }

    #[inline]
    pub fn capacity(self) -> usize {
        self.capacity.get()
    }

    pub fn mul(self, lhs: &BigUint, rhs: &BigUint) -> Result<BoxUint, MulError> {
        let mut out = BigUint::zero(self.capacity());
        math::mul(
            &mut out,
            lhs,
            rhs,
            PodStack::new(&mut PodBuffer::new(math::mul_scratch(lhs.len(), rhs.len()))),
        )?;
        Ok(out)
    }

    /// Multiplies every pair `(lhs[k], rhs[k])`, reusing one scratch buffer.
    pub fn mul_each(self, lhs: &[&BigUint], rhs: &[&BigUint]) -> Result<alloc::vec::Vec<BoxUint>, MulError> {
        assert!(lhs.len() == rhs.len());

        let max_len = |xs: &[&BigUint]| xs.iter().map(|x| x.len()).max().unwrap_or(0);
        let mut buf = PodBuffer::new(math::mul_scratch(max_len(lhs), max_len(rhs)));
        let mut stack = PodStack::new(&mut buf);

        let mut out = alloc::vec::Vec::with_capacity(lhs.len());
        for (&l, &r) in core::iter::zip(lhs, rhs) {
            let mut dst = BigUint::zero(self.capacity());
            math::mul(&mut dst, l, r, stack.rb_mut())?;
            out.push(dst);
        }
        Ok(out)
    }
}

/// Unsigned integer stored as a used length followed by a fixed buffer of little-endian words.
///
/// Only `words()[..len()]` is significant. The capacity is the length of the word buffer.
#[repr(C)]
pub struct BigUint {
    __len: u64,
    __words: [Limb],
}

#[repr(C)]
#[derive(Copy, Clone)]
pub struct SmallUint<const N: usize> {
    __len: u64,
    __words: [Limb; N],
}

unsafe impl<const N: usize> Zeroable for SmallUint<N> {}
unsafe impl<const N: usize> Pod for SmallUint<N> {}

pub struct BoxUint {
    inner: alloc::boxed::Box<BigUint>,
}

impl core::ops::Deref for BoxUint {
    type Target = BigUint;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl core::ops::DerefMut for BoxUint {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.inner
    }
}

impl Clone for BoxUint {
    fn clone(&self) -> Self {
        let mut tmp = BigUint::zero(self.inner.capacity());
        tmp.inner.__len = self.inner.__len;
        tmp.inner.__words.copy_from_slice(&self.inner.__words);
        tmp
    }
}

pub mod consts {
    use crate::Limb;

    pub const DEFAULT_CAPACITY: usize = 6;

    pub const LIMB_ZERO: Limb = 0;
    pub const LIMB_ONE: Limb = 1;
    pub const LIMB_MAX: Limb = Limb::MAX;
    pub const LIMB_BITS: u64 = Limb::BITS as u64;
}

impl BigUint {
    /// Heap allocates the value zero with room for `capacity` words.
    #[must_use]
    #[track_caller]
    #[inline]
    pub fn zero(capacity: usize) -> BoxUint {
        use alloc::alloc::*;

        assert!(capacity > 0);

        let layout = Layout::array::<Limb>(capacity)
            .and_then(|tail| Layout::new::<u64>().extend(tail))
            .map(|(layout, _)| layout.pad_to_align());
        let Ok(layout) = layout else {
            panic!("capacity overflow");
        };

        let ptr = unsafe { alloc_zeroed(layout) };
        if ptr.is_null() {
            handle_alloc_error(layout);
        }

        let ptr = core::ptr::slice_from_raw_parts_mut(ptr, capacity) as *mut BigUint;
        unsafe { (*ptr).__len = 1 };
        BoxUint {
            inner: unsafe { alloc::boxed::Box::from_raw(ptr) },
        }
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        self.__words.len()
    }

    /// Number of significant words.
    ///
    /// A raw all-zero instance reports `0` and reads as the value zero.
    #[inline]
    #[track_caller]
    pub fn len(&self) -> usize {
        let len = self.__len as usize;
        assert!(len <= self.capacity());
        len
    }

    #[inline]
    #[track_caller]
    pub fn words(&self) -> &[Limb] {
        &self.__words[..self.len()]
    }

    #[inline]
    pub const fn full_words(&self) -> &[Limb] {
        &self.__words
    }

    #[inline]
    pub fn full_words_mut(&mut self) -> &mut [Limb] {
        &mut self.__words
    }

    #[inline]
    #[track_caller]
    pub fn set_len(&mut self, len: usize) {
        assert!(all(len > 0, len <= self.capacity()));
        self.__len = len as u64;
    }

    /// Drops zero top words, keeping at least one word.
    #[inline]
    #[track_caller]
    pub fn normalize(&mut self) {
        let mut len = Ord::max(self.len(), 1);
        while len > 1 && self.__words[len - 1] == consts::LIMB_ZERO {
            len -= 1;
        }
        self.__len = len as u64;
    }

    #[inline]
    #[track_caller]
    pub fn is_zero(&self) -> bool {
        self.words().iter().all(|&w| w == consts::LIMB_ZERO)
    }

    #[inline]
    #[track_caller]
    pub fn is_normalized(&self) -> bool {
        match self.words() {
            [] => false,
            [_] => true,
            [.., top] => *top != consts::LIMB_ZERO,
        }
    }

    #[inline]
    pub fn repr(&self) -> &utils::UintRepr {
        unsafe { &*(self as *const BigUint as *const utils::UintRepr) }
    }
}

impl<const N: usize> SmallUint<N> {
    #[inline]
    #[track_caller]
    pub const fn zero() -> Self {
        if N == 0 {
            panic!();
        }

        Self {
            __len: 1,
            __words: [consts::LIMB_ZERO; N],
        }
    }

    #[inline]
    #[track_caller]
    pub const fn one() -> Self {
        Self::from_u64(consts::LIMB_ONE)
    }

    #[inline]
    #[track_caller]
    pub const fn from_u64(value: u64) -> Self {
        let mut this = Self::zero();
        this.__words[0] = value;
        this
    }

    /// Builds a normalized value from little-endian words.
    #[inline]
    #[track_caller]
    pub const fn from_words<const M: usize>(words: [Limb; M]) -> Self {
        if M > N {
            panic!();
        }

        let mut this = Self::zero();
        let mut i = 0;
        while i < M {
            this.__words[i] = words[i];
            i += 1;
        }

        let mut len = if M == 0 { 1 } else { M };
        while len > 1 && this.__words[len - 1] == consts::LIMB_ZERO {
            len -= 1;
        }
        this.__len = len as u64;
        this
    }

    #[inline]
    #[track_caller]
    pub fn from_slice(words: &[Limb]) -> Self {
        assert!(words.len() <= N);

        let mut this = Self::zero();
        this.__words[..words.len()].copy_from_slice(words);
        this.__len = Ord::max(words.len(), 1) as u64;
        this.normalize();
        this
    }

    #[inline]
    #[must_use]
    pub const fn as_ref(&self) -> &BigUint {
        unsafe { &*(core::ptr::slice_from_raw_parts(self as *const SmallUint<N> as *const Limb, N) as *const BigUint) }
    }

    #[inline]
    #[must_use]
    pub fn as_mut(&mut self) -> &mut BigUint {
        unsafe { &mut *(core::ptr::slice_from_raw_parts_mut(self as *mut SmallUint<N> as *mut Limb, N) as *mut BigUint) }
    }
}

impl<const N: usize> core::ops::Deref for SmallUint<N> {
    type Target = BigUint;

    #[inline]
    #[track_caller]
    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}

impl<const N: usize> core::ops::DerefMut for SmallUint<N> {
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut()
    }
}
