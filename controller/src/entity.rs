// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

pub trait Entity {
    type Id: Hash + Eq + Clone + Debug + Display;

    fn get_id(&self) -> Self::Id;
}
