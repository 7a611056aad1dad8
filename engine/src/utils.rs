// Copyright (C) 2020 Kevin Del Castillo Ramírez
//
// This file is part of collab-filter.
//
// collab-filter is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// collab-filter is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with collab-filter.  If not, see <http://www.gnu.org/licenses/>.

use std::collections::{hash_map::Iter as MapIter, HashMap};
use std::hash::Hash;

// The shortest map drives the iteration and the longest one is probed, if
// one of them is empty the iteration ends right away. Values are always
// yielded as (a, b) regardless of which map was the shortest one.
pub fn common_keys_iter<'a, K, V>(
    a: &'a HashMap<K, V>,
    b: &'a HashMap<K, V>,
) -> CommonKeyIterator<'a, K, V>
where
    K: Hash + Eq,
{
    let swapped = a.len() > b.len();
    let (shortest, longest) = if swapped { (b, a) } else { (a, b) };

    CommonKeyIterator {
        shortest: shortest.iter(),
        longest,
        swapped,
    }
}

#[derive(Debug)]
pub struct CommonKeyIterator<'a, K, V>
where
    K: Hash + Eq,
{
    shortest: MapIter<'a, K, V>,
    longest: &'a HashMap<K, V>,
    swapped: bool,
}

impl<'a, K, V> Iterator for CommonKeyIterator<'a, K, V>
where
    K: Hash + Eq,
{
    type Item = (&'a K, (&'a V, &'a V));

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (key, short_val) = self.shortest.next()?;

            if let Some(long_val) = self.longest.get(key) {
                let pair = if self.swapped {
                    (long_val, short_val)
                } else {
                    (short_val, long_val)
                };

                break Some((key, pair));
            }
        }
    }
}
