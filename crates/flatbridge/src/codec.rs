// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Jagged-array flattening codec.
//!
//! A jagged structure (a sequence of variable-length groups) is sent across
//! the interop boundary as two flat buffers:
//!
//! ```text
//!   jagged:   [[a, b], [], [c]]
//!
//!   elements: [a, b, c]          every element, group order then element order
//!   sizes:    [2, 0, 1]          one entry per group
//! ```
//!
//! `sum(sizes) == elements.len()` and `sizes.len() == groups.len()` hold for
//! every [`FlatArray`]; splitting `elements` into consecutive runs of
//! `sizes[i]` gives back the original groups.
//!
//! An element transform can be applied while flattening so an internal
//! representation is converted to its wire form in the same pass. The
//! transform runs exactly once per element, outer index ascending then inner
//! index ascending.

use std::iter::Zip;
use std::slice;

use crate::error::{Error, Result};


/// Flattened jagged structure: one element buffer plus one size per group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatArray<T> {
    elements: Vec<T>,
    group_sizes: Vec<usize>,
}

impl<T> Default for FlatArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FlatArray<T> {
    /// Empty array with no groups.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
            group_sizes: Vec::new(),
        }
    }

    /// Rebuild a flat array from its two buffers.
    ///
    /// # Errors
    /// `Error::SizeMismatch` when the sizes do not add up to `elements.len()`.
    pub fn from_parts(elements: Vec<T>, group_sizes: Vec<usize>) -> Result<Self> {
        let mut expected = 0usize;
        for &size in &group_sizes {
            expected = expected
                .checked_add(size)
                .ok_or(Error::LengthOverflow(size))?;
        }

        if expected != elements.len() {
            return Err(Error::SizeMismatch {
                expected,
                actual: elements.len(),
            });
        }

        Ok(Self {
            elements,
            group_sizes,
        })
    }

    /// Rebuild a flat array from wire buffers (32-bit signed group sizes).
    ///
    /// # Errors
    /// `Error::InvalidArgument` on a negative size, otherwise as
    /// [`FlatArray::from_parts`].
    pub fn from_wire_parts(elements: Vec<T>, group_sizes: &[i32]) -> Result<Self> {
        let sizes = group_sizes
            .iter()
            .map(|&size| {
                usize::try_from(size).map_err(|_| Error::InvalidArgument("negative group size"))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_parts(elements, sizes)
    }

    /// Every element, in group order.
    #[must_use]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Length of each group.
    #[must_use]
    pub fn group_sizes(&self) -> &[usize] {
        &self.group_sizes
    }

    /// Total number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// True when no group holds an element (there may still be empty groups).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of groups, empty ones included.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_sizes.len()
    }

    /// Iterate the groups as slices of the element buffer.
    #[must_use]
    pub fn groups(&self) -> Groups<'_, T> {
        Groups {
            rest: &self.elements,
            sizes: self.group_sizes.iter(),
        }
    }

    /// Split back into one `Vec` per group.
    #[must_use]
    pub fn into_groups(self) -> Vec<Vec<T>> {
        let mut elements = self.elements.into_iter();
        self.group_sizes
            .iter()
            .map(|&size| elements.by_ref().take(size).collect())
            .collect()
    }

    /// Take both buffers.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Vec<usize>) {
        (self.elements, self.group_sizes)
    }

    /// Convert to the boundary form with 32-bit group sizes.
    ///
    /// # Errors
    /// `Error::LengthOverflow` when the element count or a group size exceeds
    /// `i32::MAX`.
    pub fn into_wire(self) -> Result<WireArray<T>> {
        if i32::try_from(self.elements.len()).is_err() {
            return Err(Error::LengthOverflow(self.elements.len()));
        }
        if i32::try_from(self.group_sizes.len()).is_err() {
            return Err(Error::LengthOverflow(self.group_sizes.len()));
        }

        let group_sizes = self
            .group_sizes
            .iter()
            .map(|&size| i32::try_from(size).map_err(|_| Error::LengthOverflow(size)))
            .collect::<Result<Vec<_>>>()?;

        Ok(WireArray {
            elements: self.elements,
            group_sizes,
        })
    }
}

/// Iterator over the groups of a [`FlatArray`].
#[derive(Debug, Clone)]
pub struct Groups<'a, T> {
    rest: &'a [T],
    sizes: slice::Iter<'a, usize>,
}

impl<'a, T> Iterator for Groups<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        let &size = self.sizes.next()?;
        let (group, rest) = self.rest.split_at(size);
        self.rest = rest;
        Some(group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sizes.size_hint()
    }
}

impl<T> ExactSizeIterator for Groups<'_, T> {}

/// Flat array in the form handed across the boundary: the managed side reads
/// 32-bit signed counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireArray<T> {
    elements: Vec<T>,
    group_sizes: Vec<i32>,
}

impl<T> WireArray<T> {
    /// Every element, in group order.
    #[must_use]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Length of each group.
    #[must_use]
    pub fn group_sizes(&self) -> &[i32] {
        &self.group_sizes
    }

    /// Take both buffers.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Vec<i32>) {
        (self.elements, self.group_sizes)
    }
}

/// Flatten with the identity transform.
///
/// # Example
///
/// ```rust
/// let flat = flatbridge::codec::flatten(&[vec![1, 2], vec![], vec![3]]);
/// assert_eq!(flat.elements(), &[1, 2, 3]);
/// assert_eq!(flat.group_sizes(), &[2, 0, 1]);
/// ```
#[must_use]
pub fn flatten<G, T>(groups: &[G]) -> FlatArray<T>
where
    G: AsRef<[T]>,
    T: Clone,
{
    flatten_with(groups, T::clone)
}

/// Flatten, converting every element with `transform`.
///
/// # Example
///
/// ```rust
/// let flat = flatbridge::codec::flatten_with(&[vec![1], vec![2, 3]], |x: &i32| x * 10);
/// assert_eq!(flat.elements(), &[10, 20, 30]);
/// assert_eq!(flat.group_sizes(), &[1, 2]);
/// ```
pub fn flatten_with<G, Tin, Tout, F>(groups: &[G], mut transform: F) -> FlatArray<Tout>
where
    G: AsRef<[Tin]>,
    F: FnMut(&Tin) -> Tout,
{
    let total: usize = groups.iter().map(|group| group.as_ref().len()).sum();
    let mut elements = Vec::with_capacity(total);
    let mut group_sizes = Vec::with_capacity(groups.len());

    for group in groups {
        let group = group.as_ref();
        elements.extend(group.iter().map(&mut transform));
        group_sizes.push(group.len());
    }

    log::trace!(
        "[codec] flattened {} groups into {} elements",
        group_sizes.len(),
        elements.len()
    );

    FlatArray {
        elements,
        group_sizes,
    }
}

/// [`flatten_with`] over an input that may be absent.
///
/// # Errors
/// `Error::InvalidArgument` when `groups` is `None`.
pub fn try_flatten_with<G, Tin, Tout, F>(
    groups: Option<&[G]>,
    transform: F,
) -> Result<FlatArray<Tout>>
where
    G: AsRef<[Tin]>,
    F: FnMut(&Tin) -> Tout,
{
    let groups = groups.ok_or(Error::InvalidArgument("jagged input is absent"))?;
    Ok(flatten_with(groups, transform))
}

/// Flatten two unrelated jagged structures in one call.
///
/// The outputs share nothing: group counts may differ, and each transform
/// only ever sees its own input.
pub fn flatten_pair<GA, A, TA, FA, GB, B, TB, FB>(
    first: &[GA],
    first_transform: FA,
    second: &[GB],
    second_transform: FB,
) -> (FlatArray<TA>, FlatArray<TB>)
where
    GA: AsRef<[A]>,
    FA: FnMut(&A) -> TA,
    GB: AsRef<[B]>,
    FB: FnMut(&B) -> TB,
{
    (
        flatten_with(first, first_transform),
        flatten_with(second, second_transform),
    )
}

/// Pair the groups of two flattened structures that share one outer
/// grouping. Element counts may differ; group counts may not.
///
/// # Errors
/// `Error::GroupCountMismatch` when the group counts differ.
pub fn zip_groups<'a, A, B>(
    first: &'a FlatArray<A>,
    second: &'a FlatArray<B>,
) -> Result<Zip<Groups<'a, A>, Groups<'a, B>>> {
    if first.group_count() != second.group_count() {
        return Err(Error::GroupCountMismatch {
            first: first.group_count(),
            second: second.group_count(),
        });
    }

    Ok(first.groups().zip(second.groups()))
}
