// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use controller::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct User {
    pub id: i32,
}

impl Entity for User {
    type Id = i32;

    fn get_id(&self) -> Self::Id {
        self.id
    }
}
