pub mod math;

use num::Num;

/// ZeroSpVec is a sparse vector that treats zero elements as implicit.
/// It holds `inds` and `vals`:
/// `inds` keeps the logical index of each stored element,
/// `vals` keeps the element value.
///
/// Stored elements are guaranteed to be sorted by ascending index,
/// and no stored value is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroSpVec<N>
where
    N: Num,
{
    inds: Vec<usize>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    fn new() -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
        }
    }

    /// All-zero vector of logical length `len`
    #[inline]
    pub fn zeros(len: usize) -> Self {
        let mut vec = Self::new();
        vec.len = len;
        vec
    }

    /// Build from already sorted parts.
    /// zero values are dropped.
    ///
    /// # Arguments
    /// * `len` - logical length
    /// * `inds` - strictly ascending indices, all `< len`
    /// * `vals` - values aligned with `inds`
    pub fn from_sorted_parts(len: usize, inds: Vec<usize>, vals: Vec<N>) -> Self {
        debug_assert_eq!(inds.len(), vals.len(), "inds and vals must be aligned");
        debug_assert!(
            inds.windows(2).all(|w| w[0] < w[1]),
            "inds must be strictly ascending"
        );
        debug_assert!(inds.last().map_or(true, |&i| i < len), "index out of bounds");

        if vals.iter().all(|v| *v != N::zero()) {
            return ZeroSpVec { inds, vals, len };
        }
        let mut vec = ZeroSpVec::with_capacity(inds.len());
        vec.len = len;
        for (ind, val) in inds.into_iter().zip(vals) {
            if val != N::zero() {
                vec.inds.push(ind);
                vec.vals.push(val);
            }
        }
        vec
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.inds.push(self.len);
            self.vals.push(elem);
        }
        self.len += 1;
    }

    /// iterate stored elements as `(index, &value)` in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.inds.iter().copied().zip(self.vals.iter())
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.inds
    }

    #[inline]
    pub fn values(&self) -> &[N] {
        &self.vals
    }

    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (ind, val) in self.raw_iter() {
            dense[ind] = *val;
        }
        dense
    }

    #[inline]
    pub fn from_vec(vec: Vec<N>) -> Self {
        let mut zero_sp_vec = ZeroSpVec::with_capacity(vec.len());
        for entry in vec {
            zero_sp_vec.push(entry);
        }
        zero_sp_vec
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    fn from(vec: Vec<N>) -> Self {
        ZeroSpVec::from_vec(vec)
    }
}
