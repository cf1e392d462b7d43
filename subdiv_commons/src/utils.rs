// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use smallvec::SmallVec;

pub type SVec<T> = SmallVec<[T; 4]>;
pub type SVecN<T, const N: usize> = SmallVec<[T; N]>;

pub trait IteratorUtils: Iterator {
    fn collect_svec(self) -> SVec<Self::Item>
    where
        Self: Sized,
    {
        self.collect()
    }
}

impl<T: ?Sized> IteratorUtils for T where T: Iterator {}

pub trait SliceUtils<T> {
    /// Same as .iter().copied(), but doesn't trigger rustfmt line breaks
    fn iter_cpy(&self) -> std::iter::Copied<std::slice::Iter<'_, T>>;
}

impl<T: Copy> SliceUtils<T> for [T] {
    fn iter_cpy(&self) -> std::iter::Copied<std::slice::Iter<'_, T>> {
        self.iter().copied()
    }
}

/// Set-like insertion for small vectors. Keeps the first-seen order of the
/// elements, which a hash set would not.
pub trait SmallSetExt<T> {
    /// Pushes `value` unless it is already present. Returns whether it was
    /// inserted.
    fn insert_unique(&mut self, value: T) -> bool;
}

impl<T: PartialEq, const N: usize> SmallSetExt<T> for SVecN<T, N>
where
    [T; N]: smallvec::Array<Item = T>,
{
    fn insert_unique(&mut self, value: T) -> bool {
        if self.contains(&value) {
            false
        } else {
            self.push(value);
            true
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    #[test]
    pub fn test_insert_unique() {
        let mut set: SVec<u32> = SVec::new();
        assert!(set.insert_unique(3));
        assert!(set.insert_unique(1));
        assert!(!set.insert_unique(3));
        assert!(set.insert_unique(2));
        assert_eq!(set.iter_cpy().collect_vec(), &[3, 1, 2]);
    }

    #[test]
    pub fn test_collect_svec() {
        let v = [1, 2, 3, 4, 5].iter_cpy().filter(|x| x % 2 == 1).collect_svec();
        assert_eq!(v.as_slice(), &[1, 3, 5]);
    }
}
