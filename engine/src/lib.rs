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

pub mod error;
pub mod evaluation;
pub mod means;
pub mod similarity;
pub mod utils;

use crate::{evaluation::EvaluationReporter, similarity::SimilarityCache};
use anyhow::Error;
use controller::{eid, error::ErrorKind, means, Controller, Entity};
use std::{fmt::Display, hash::Hash};

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction<UserId, ItemId> {
    pub item_id: ItemId,
    pub user_id: UserId,
    pub score: f64,
    pub predicted: f64,
}

impl<UserId, ItemId> Prediction<UserId, ItemId> {
    pub fn error(&self) -> f64 {
        self.predicted - self.score
    }
}

fn mean_of<K>(means: &controller::Means<K>, user_id: &K) -> Result<f64, Error>
where
    K: Hash + Eq + Display,
{
    match means.get(user_id) {
        Some(mean) => Ok(*mean),
        None => Err(ErrorKind::UserNotFound(user_id.to_string()).into()),
    }
}

/// User based collaborative filtering over the ratings of a controller.
///
/// Means are computed once when the engine is built, similarities are
/// computed lazily and cached for the whole lifetime of the engine.
pub struct Engine<'a, C>
where
    C: Controller,
{
    controller: &'a C,

    means: means!(C::User),
    similarities: SimilarityCache<eid!(C::User)>,
}

impl<'a, C> Engine<'a, C>
where
    C: Controller,
{
    pub fn with_controller(controller: &'a C) -> Result<Self, Error> {
        let means = means::user_means(controller.all_users_ratings())?;
        log::debug!("Computed means for {} users", means.len());

        Ok(Self {
            controller,
            means,
            similarities: SimilarityCache::new(),
        })
    }

    pub fn user_mean(&self, user_id: &eid!(C::User)) -> Result<f64, Error> {
        mean_of(&self.means, user_id)
    }

    pub fn similarities(&self) -> &SimilarityCache<eid!(C::User)> {
        &self.similarities
    }

    pub fn user_similarity(
        &mut self,
        user_a: &eid!(C::User),
        user_b: &eid!(C::User),
    ) -> Result<f64, Error> {
        let controller = self.controller;
        let means = &self.means;

        self.similarities.get_or_compute(user_a, user_b, || {
            let ratings_a = controller.user_ratings(user_a)?;
            let ratings_b = controller.user_ratings(user_b)?;
            let mean_a = mean_of(means, user_a)?;
            let mean_b = mean_of(means, user_b)?;

            Ok(similarity::pearson_correlation(
                ratings_a, ratings_b, mean_a, mean_b,
            ))
        })
    }

    pub fn user_predict(
        &mut self,
        user_id: &eid!(C::User),
        item_id: &eid!(C::Item),
    ) -> Result<f64, Error> {
        let controller = self.controller;

        // Fail on unknown users even if nobody else rated the item
        controller.user_ratings(user_id)?;
        let user_mean = self.user_mean(user_id)?;
        let users_who_rated = controller.users_who_rated(item_id)?;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for (other_id, other_score) in users_who_rated {
            if other_id == user_id {
                continue;
            }

            let similarity = self.user_similarity(user_id, other_id)?;
            let other_mean = self.user_mean(other_id)?;

            numerator += similarity * (other_score - other_mean);
            denominator += similarity.abs();
        }

        if denominator == 0.0 {
            Ok(user_mean)
        } else {
            Ok(user_mean + numerator / denominator)
        }
    }

    /// Predict every rating of `test`, users first and then each of their
    /// items, both in the order the test controller yields them.
    ///
    /// Every prediction is handed to `on_prediction` as soon as it's made,
    /// the first error aborts the whole evaluation.
    #[allow(clippy::type_complexity)]
    pub fn evaluate<T, F>(
        &mut self,
        test: &T,
        mut on_prediction: F,
    ) -> Result<EvaluationReporter, Error>
    where
        T: Controller<User = C::User, Item = C::Item>,
        F: FnMut(&Prediction<eid!(C::User), eid!(C::Item)>) -> Result<(), Error>,
    {
        let mut reporter = EvaluationReporter::new();

        for user in test.users()? {
            let user_id = user.get_id();

            for item in test.items_rated_by(&user_id)? {
                let item_id = item.get_id();

                let score = test.rating_of(&user_id, &item_id)?;
                let predicted = self.user_predict(&user_id, &item_id)?;
                reporter.add(score, predicted);

                on_prediction(&Prediction {
                    item_id,
                    user_id: user_id.clone(),
                    score,
                    predicted,
                })?;
            }
        }

        log::info!(
            "Evaluated {} predictions, {} user similarities computed",
            reporter.len(),
            self.similarities.len()
        );

        Ok(reporter)
    }
}
