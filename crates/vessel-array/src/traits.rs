//! Standard trait impls for [`DynamicArray`], mostly delegating to the
//! slice of live elements.

use std::borrow::{Borrow, BorrowMut};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice::SliceIndex;

use crate::array::DynamicArray;

impl<T> Default for DynamicArray<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynamicArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynamicArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Borrow<[T]> for DynamicArray<T> {
    fn borrow(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> BorrowMut<[T]> for DynamicArray<T> {
    fn borrow_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for DynamicArray<T> {
    type Output = I::Output;

    #[inline]
    #[track_caller]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynamicArray<T> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq<DynamicArray<U>> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynamicArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<[U]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<&[U]> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T, U> PartialEq<Vec<U>> for DynamicArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T: PartialOrd> PartialOrd for DynamicArray<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for DynamicArray<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for DynamicArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        self.grow_for(lower);
        for value in iter {
            self.push(value);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        Self::from_fn(items.len(), |i| items[i].clone())
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        let mut array = Self::with_capacity(N);
        array.extend(items);
        array
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(items: Vec<T>) -> Self {
        let mut array = Self::with_capacity(items.len());
        array.extend(items);
        array
    }
}

impl<T> From<DynamicArray<T>> for Vec<T> {
    fn from(array: DynamicArray<T>) -> Self {
        array.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn compares_against_common_sequences() {
        let a: DynamicArray<i32> = DynamicArray::from([1, 2, 3]);
        assert_eq!(a, [1, 2, 3]);
        assert_eq!(a, vec![1, 2, 3]);
        assert_eq!(a, &[1, 2, 3][..]);
        assert_ne!(a, DynamicArray::from([1, 2]));
        assert!(a < DynamicArray::from([1, 2, 4]));
    }

    #[test]
    fn debug_lists_elements() {
        let a = DynamicArray::from(["x", "y"]);
        assert_eq!(format!("{a:?}"), r#"["x", "y"]"#);
    }

    #[test]
    fn collect_and_extend() {
        let mut a: DynamicArray<u32> = (1..=3).collect();
        assert_eq!(a.capacity(), 3);
        a.extend(&[4, 5]);
        a.extend(vec![6]);
        assert_eq!(a, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn repeated_extend_grows_geometrically() {
        let mut a = DynamicArray::new();
        let mut reallocs = 0;
        for i in 0..1000u32 {
            let before = a.capacity();
            a.extend(std::iter::once(i));
            if a.capacity() != before {
                reallocs += 1;
            }
        }
        assert_eq!(a.len(), 1000);
        assert_eq!(a.capacity(), 1024);
        assert_eq!(reallocs, 11);
    }

    #[test]
    fn extend_without_size_hint_still_doubles() {
        let mut a: DynamicArray<u32> = DynamicArray::new();
        a.extend((0..100).filter(|v| v % 2 == 0));
        assert_eq!(a.len(), 50);
        assert_eq!(a.capacity(), 64);
    }

    #[test]
    fn conversions_size_exactly() {
        assert_eq!(DynamicArray::from([1, 2, 3]).capacity(), 3);
        assert_eq!(DynamicArray::from(vec![1, 2, 3, 4, 5]).capacity(), 5);
        let collected: DynamicArray<u8> = (0..7).collect();
        assert_eq!(collected.capacity(), 7);
    }

    #[test]
    fn slice_methods_through_deref() {
        let mut a = DynamicArray::from([3, 1, 2]);
        a.sort_unstable();
        assert_eq!(a.first(), Some(&1));
        assert_eq!(a.last(), Some(&3));
        assert_eq!(&a[1..], &[2, 3]);
        assert!(a.contains(&2));
    }

    #[test]
    #[should_panic]
    fn indexing_past_len_panics() {
        let a = DynamicArray::<u8>::with_capacity(4);
        let _ = a[0];
    }

    #[test]
    fn hash_matches_equal_arrays() {
        let mut set = HashSet::new();
        set.insert(DynamicArray::from([1, 2]));
        assert!(set.contains(&DynamicArray::from([1, 2])));
        assert!(!set.contains(&DynamicArray::from([2, 1])));
    }

    #[test]
    fn converts_to_and_from_vec() {
        let a = DynamicArray::from(vec![String::from("a"), String::from("b")]);
        let v: Vec<String> = a.into();
        assert_eq!(v, ["a", "b"]);
        let b = DynamicArray::from(v.as_slice());
        assert_eq!(b.capacity(), 2);
        assert_eq!(b, v);
    }
}
