// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod entity;
pub mod error;

#[macro_export]
macro_rules! eid {
    ($e:ty) => {
        <$e as $crate::entity::Entity>::Id
    };
}

#[macro_export]
macro_rules! maped_ratings {
    ($u:ty => $v:ty) => {
        $crate::MapedRatings<$crate::eid!($u), $crate::eid!($v)>
    };
}

#[macro_export]
macro_rules! ratings {
    ($e:ty) => {
        $crate::Ratings<$crate::eid!($e)>
    };
}

#[macro_export]
macro_rules! means {
    ($e:ty) => {
        $crate::Means<$crate::eid!($e)>
    };
}

use anyhow::Error;
use error::ErrorKind;
use std::collections::HashMap;

pub use entity::Entity;

pub type Result<T> = std::result::Result<T, Error>;
pub type Means<K, Value = f64> = HashMap<K, Value>;
pub type Ratings<I, Value = f64> = HashMap<I, Value>;
pub type MapedRatings<K, I, Value = f64> = HashMap<K, Ratings<I, Value>>;

pub trait Controller {
    type User: Entity;
    type Item: Entity;

    /// Get all users, in the order they were first seen
    fn users(&self) -> Result<Vec<Self::User>>;

    /// Get all items, in the order they were first seen
    fn items(&self) -> Result<Vec<Self::Item>>;

    /// Get the items rated by the specified user, in the order they were first rated
    fn items_rated_by(&self, user_id: &eid!(Self::User)) -> Result<Vec<Self::Item>>;

    /// Get the ratings for the specified user, i.e. maps Item::Id => score
    fn user_ratings(&self, user_id: &eid!(Self::User)) -> Result<&ratings!(Self::Item)>;

    /// Get the "inverted" ratings for the specified item, i.e. maps User::Id => score
    fn users_who_rated(&self, item_id: &eid!(Self::Item)) -> Result<&ratings!(Self::User)>;

    /// Get all normal MapedRatings, i.e. maps User::Id => Item::Id
    #[allow(clippy::type_complexity)]
    fn all_users_ratings(&self) -> &maped_ratings!(Self::User => Self::Item);

    /// Number of distinct (user, item) ratings held by this controller
    fn ratings_count(&self) -> usize;

    /// Get the score given by a user to an item
    fn rating_of(&self, user_id: &eid!(Self::User), item_id: &eid!(Self::Item)) -> Result<f64> {
        let ratings = self.user_ratings(user_id)?;

        match ratings.get(item_id) {
            Some(score) => Ok(*score),
            None => Err(ErrorKind::RatingNotFound(user_id.to_string(), item_id.to_string()).into()),
        }
    }
}
