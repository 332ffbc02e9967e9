//! The [`vessel!`](crate::vessel) literal macro.

/// Build a [`DynamicArray`](crate::DynamicArray) from a list of elements
/// or from an element and a count, like `vec!`.
///
/// The result's capacity equals its length.
///
/// ```rust
/// use vessel_array::{vessel, DynamicArray};
///
/// let a: DynamicArray<u8> = vessel![];
/// assert!(a.is_empty());
///
/// let b = vessel![1, 2, 3];
/// assert_eq!(b, [1, 2, 3]);
///
/// let c = vessel!["x"; 2];
/// assert_eq!(c, ["x", "x"]);
/// ```
#[macro_export]
macro_rules! vessel {
    () => {
        $crate::DynamicArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::DynamicArray::from_elem($elem, $n)
    };
    ($($x:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($x),+])
    };
}
