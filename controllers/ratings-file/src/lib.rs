// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

pub mod models;

use crate::models::{items::Item, ratings::Rating, users::User};
use anyhow::{Context, Error};
use config::DataConfig;
use controller::{error::ErrorKind, Controller, MapedRatings, Ratings};
use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// Byte used to split the fields of a ratings file
pub fn delimiter(config: &DataConfig) -> Result<u8, ErrorKind> {
    if config.delimiter.is_ascii() {
        Ok(config.delimiter as u8)
    } else {
        Err(ErrorKind::InvalidDelimiter(config.delimiter))
    }
}

/// Read every rating of a delimited source, failing on the first malformed row
pub fn read_ratings<R: Read>(reader: R, config: &DataConfig) -> Result<Vec<Rating>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(config.has_headers)
        .delimiter(delimiter(config)?)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut ratings = Vec::new();
    for record in csv.records() {
        ratings.push(Rating::from_record(&record?)?);
    }

    Ok(ratings)
}

/// In-memory view of a ratings file, indexed both by user and by item.
///
/// Besides the two maps it keeps the order in which users, items and each
/// user's items were first seen, so iterating over it is deterministic.
#[derive(Debug, Clone, Default)]
pub struct RatingsFileController {
    users_ratings: MapedRatings<i32, i32>,
    items_users: MapedRatings<i32, i32>,

    users_order: Vec<i32>,
    items_order: Vec<i32>,
    rated_order: HashMap<i32, Vec<i32>>,
}

impl RatingsFileController {
    pub fn new(path: impl AsRef<Path>) -> Result<Self, Error> {
        Self::from_config(path, &DataConfig::default())
    }

    pub fn from_config(path: impl AsRef<Path>, config: &DataConfig) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Couldn't open ratings file {}", path.display()))?;

        let controller = Self::from_reader(BufReader::new(file), config)
            .with_context(|| format!("Couldn't load ratings from {}", path.display()))?;

        log::info!(
            "Loaded {} ratings from {} users on {} items ({})",
            controller.ratings_count(),
            controller.users_order.len(),
            controller.items_order.len(),
            path.display()
        );

        Ok(controller)
    }

    pub fn from_reader<R: Read>(reader: R, config: &DataConfig) -> Result<Self, Error> {
        let ratings = read_ratings(reader, config)?;
        Ok(Self::from_ratings(ratings))
    }

    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let mut controller = Self::default();
        for rating in ratings {
            controller.insert(rating);
        }

        controller
    }

    fn insert(&mut self, rating: Rating) {
        let Rating {
            item_id,
            user_id,
            score,
        } = rating;

        let users_order = &mut self.users_order;
        let user_ratings = self.users_ratings.entry(user_id).or_insert_with(|| {
            users_order.push(user_id);
            HashMap::new()
        });

        match user_ratings.insert(item_id, score) {
            Some(old) => log::warn!(
                "Duplicated rating for user({}) on item({}), {} overwritten by {}",
                user_id,
                item_id,
                old,
                score
            ),
            None => self.rated_order.entry(user_id).or_default().push(item_id),
        }

        let items_order = &mut self.items_order;
        self.items_users
            .entry(item_id)
            .or_insert_with(|| {
                items_order.push(item_id);
                HashMap::new()
            })
            .insert(user_id, score);
    }

    pub fn is_empty(&self) -> bool {
        self.users_ratings.is_empty()
    }

    /// Get the "inverted" MapedRatings, i.e. maps Item::Id => User::Id
    pub fn all_items_users(&self) -> &MapedRatings<i32, i32> {
        &self.items_users
    }
}

impl Controller for RatingsFileController {
    type User = User;
    type Item = Item;

    fn users(&self) -> Result<Vec<User>, Error> {
        Ok(self.users_order.iter().map(|&id| User { id }).collect())
    }

    fn items(&self) -> Result<Vec<Item>, Error> {
        Ok(self.items_order.iter().map(|&id| Item { id }).collect())
    }

    fn items_rated_by(&self, user_id: &i32) -> Result<Vec<Item>, Error> {
        let items = self
            .rated_order
            .get(user_id)
            .ok_or_else(|| ErrorKind::UserNotFound(user_id.to_string()))?;

        Ok(items.iter().map(|&id| Item { id }).collect())
    }

    fn user_ratings(&self, user_id: &i32) -> Result<&Ratings<i32>, Error> {
        let ratings = self
            .users_ratings
            .get(user_id)
            .ok_or_else(|| ErrorKind::UserNotFound(user_id.to_string()))?;

        Ok(ratings)
    }

    fn users_who_rated(&self, item_id: &i32) -> Result<&Ratings<i32>, Error> {
        let users = self
            .items_users
            .get(item_id)
            .ok_or_else(|| ErrorKind::ItemNotFound(item_id.to_string()))?;

        Ok(users)
    }

    fn all_users_ratings(&self) -> &MapedRatings<i32, i32> {
        &self.users_ratings
    }

    fn ratings_count(&self) -> usize {
        self.users_ratings.values().map(HashMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_macros::hash_map;
    use controller::Entity;

    fn load(text: &str) -> Result<RatingsFileController, Error> {
        RatingsFileController::from_reader(text.as_bytes(), &DataConfig::default())
    }

    fn malformed_line(err: &Error) -> Option<u64> {
        match err.downcast_ref::<ErrorKind>() {
            Some(ErrorKind::MalformedRecord(line, _)) => Some(*line),
            _ => None,
        }
    }

    #[test]
    fn builds_both_indexes() -> Result<(), Error> {
        let controller = load("1,1,5.0\n2,1,3.0\n1,2,4.0\n2,2,4.0\n")?;

        assert_eq!(controller.ratings_count(), 4);
        assert_eq!(
            controller.user_ratings(&1)?,
            &hash_map! { 1 => 5.0, 2 => 3.0 }
        );
        assert_eq!(
            controller.users_who_rated(&1)?,
            &hash_map! { 1 => 5.0, 2 => 4.0 }
        );

        Ok(())
    }

    #[test]
    fn indexes_are_consistent() -> Result<(), Error> {
        let controller = load("10,1,2.5\n11,1,3.5\n10,2,1.0\n12,3,4.0\n11,3,5.0\n")?;

        for (user_id, ratings) in controller.all_users_ratings() {
            for (item_id, score) in ratings {
                assert_eq!(controller.all_items_users()[item_id][user_id], *score);
            }
        }

        for (item_id, users) in controller.all_items_users() {
            for (user_id, score) in users {
                assert_eq!(controller.all_users_ratings()[user_id][item_id], *score);
            }
        }

        Ok(())
    }

    #[test]
    fn duplicates_overwrite() -> Result<(), Error> {
        let controller = load("7,1,2.0\n8,1,4.0\n7,1,5.0\n")?;

        assert_eq!(controller.ratings_count(), 2);
        assert_eq!(controller.rating_of(&1, &7)?, 5.0);
        assert_eq!(controller.users_who_rated(&7)?[&1], 5.0);

        let items: Vec<_> = controller
            .items_rated_by(&1)?
            .iter()
            .map(Entity::get_id)
            .collect();
        assert_eq!(items, vec![7, 8]);

        Ok(())
    }

    #[test]
    fn keeps_first_seen_order() -> Result<(), Error> {
        let controller = load("3,9,1.0\n1,4,2.0\n2,9,3.0\n3,4,4.0\n")?;

        let users: Vec<_> = controller.users()?.iter().map(Entity::get_id).collect();
        let items: Vec<_> = controller.items()?.iter().map(Entity::get_id).collect();
        let rated_by_4: Vec<_> = controller
            .items_rated_by(&4)?
            .iter()
            .map(Entity::get_id)
            .collect();

        assert_eq!(users, vec![9, 4]);
        assert_eq!(items, vec![3, 1, 2]);
        assert_eq!(rated_by_4, vec![1, 3]);

        Ok(())
    }

    #[test]
    fn trims_fields_and_skips_empty_lines() -> Result<(), Error> {
        let controller = load(" 1 , 2 , 3.5 \n\n4,2,1\n")?;

        assert_eq!(controller.user_ratings(&2)?, &hash_map! { 1 => 3.5, 4 => 1.0 });

        Ok(())
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let err = load("1,1,5.0\n2,1\n").unwrap_err();
        assert_eq!(malformed_line(&err), Some(2));
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let err = load("1,1,5.0\n1,2,4.0\nx,3,1.0\n").unwrap_err();
        assert_eq!(malformed_line(&err), Some(3));

        let err = load("1,1,five\n").unwrap_err();
        assert_eq!(malformed_line(&err), Some(1));
    }

    #[test]
    fn headers_and_custom_delimiter() -> Result<(), Error> {
        let config = DataConfig {
            delimiter: '\t',
            has_headers: true,
        };
        let text = "item\tuser\trating\n5\t6\t2.0\n";
        let controller = RatingsFileController::from_reader(text.as_bytes(), &config)?;

        assert_eq!(controller.ratings_count(), 1);
        assert_eq!(controller.rating_of(&6, &5)?, 2.0);

        Ok(())
    }

    #[test]
    fn rejects_non_ascii_delimiter() {
        let config = DataConfig {
            delimiter: '§',
            has_headers: false,
        };

        let err = RatingsFileController::from_reader("1§1§1".as_bytes(), &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ErrorKind>(),
            Some(ErrorKind::InvalidDelimiter('§'))
        ));
    }

    #[test]
    fn unknown_entities() -> Result<(), Error> {
        let controller = load("1,1,5.0\n")?;

        let err = controller.user_ratings(&2).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ErrorKind>(),
            Some(ErrorKind::UserNotFound(id)) if id == "2"
        ));

        let err = controller.users_who_rated(&3).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ErrorKind>(),
            Some(ErrorKind::ItemNotFound(id)) if id == "3"
        ));

        Ok(())
    }

    #[test]
    fn missing_file_fails() {
        assert!(RatingsFileController::new("does/not/exist.csv").is_err());
    }
}
