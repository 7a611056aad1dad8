use crate::error::ErrorKind;
use controller::{MapedRatings, Means, Ratings};
use num_traits::float::Float;
use std::{collections::HashMap, fmt::Display, hash::Hash, ops::AddAssign};

/// Arithmetic mean of a set of ratings, `None` if there's nothing to average.
pub fn mean<K, V>(ratings: &Ratings<K, V>) -> Option<V>
where
    V: Float + AddAssign,
{
    let mut sum = None;
    for score in ratings.values() {
        *sum.get_or_insert_with(V::zero) += *score;
    }

    Some(sum? / V::from(ratings.len())?)
}

/// Baseline of every user, i.e. maps User::Id => mean score
pub fn user_means<U, I, V>(maped_ratings: &MapedRatings<U, I, V>) -> Result<Means<U, V>, ErrorKind>
where
    U: Hash + Eq + Clone + Display,
    V: Float + AddAssign,
{
    let mut means = HashMap::with_capacity(maped_ratings.len());
    for (user_id, ratings) in maped_ratings {
        let baseline = mean(ratings).ok_or_else(|| ErrorKind::EmptyRatings(user_id.to_string()))?;
        means.insert(user_id.clone(), baseline);
    }

    Ok(means)
}
