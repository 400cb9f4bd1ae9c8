// Copyright 2026 cachet Project Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{fmt::Debug, hash::Hash};

use bytes::Bytes;

/// Report the memory weight of an object in bytes.
///
/// The weight is used for cache capacity accounting. A zero weight is valid.
pub trait Weight {
    /// Memory weight in bytes.
    fn weight(&self) -> usize;
}

/// Key trait for the in-memory cache.
pub trait Key: Weight + Send + Sync + 'static + Hash + Eq + PartialEq + Clone + Debug {}
impl<T> Key for T where T: Weight + Send + Sync + 'static + Hash + Eq + PartialEq + Clone + Debug {}

/// Value trait for the in-memory cache.
pub trait Value: Weight + Send + Sync + 'static + Clone + Debug {}
impl<T> Value for T where T: Weight + Send + Sync + 'static + Clone + Debug {}

impl Weight for str {
    fn weight(&self) -> usize {
        self.len()
    }
}

impl Weight for String {
    fn weight(&self) -> usize {
        self.len()
    }
}

impl Weight for [u8] {
    fn weight(&self) -> usize {
        self.len()
    }
}

impl Weight for Vec<u8> {
    fn weight(&self) -> usize {
        self.len()
    }
}

impl Weight for Bytes {
    fn weight(&self) -> usize {
        self.len()
    }
}

impl<T> Weight for &T
where
    T: Weight + ?Sized,
{
    fn weight(&self) -> usize {
        (**self).weight()
    }
}

macro_rules! for_all_primitives {
    ($macro:ident) => {
        $macro! {
            u8, u16, u32, u64, usize,
            i8, i16, i32, i64, isize,
        }
    };
}

macro_rules! impl_weight {
    ($( $type:ty, )*) => {
        $(
            impl Weight for $type {
                fn weight(&self) -> usize {
                    std::mem::size_of::<$type>()
                }
            }
        )*
    };
}

for_all_primitives! { impl_weight }
