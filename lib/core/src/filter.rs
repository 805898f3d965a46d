// Attribute filters over actors and movies, keyed by wire field names
use std::str::FromStr;

use crate::entity::{Actor, ActorId, EntityKind, Movie, MovieId};
use crate::{Error, Graph, Result};

pub trait Filter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Something whose fields can be compared against textual filter values
pub trait Filterable {
    type Field: Copy + FromStr<Err = Error>;

    fn field_matches(&self, field: Self::Field, value: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorField {
    Name,
    Age,
    TotalGross,
    Movies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieField {
    Name,
    Year,
    BoxOffice,
    Actors,
}

impl FromStr for ActorField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(ActorField::Name),
            "age" => Ok(ActorField::Age),
            "total_gross" => Ok(ActorField::TotalGross),
            "movies" => Ok(ActorField::Movies),
            other => Err(Error::UnknownField {
                kind: EntityKind::Actor,
                field: other.to_string(),
            }),
        }
    }
}

impl FromStr for MovieField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(MovieField::Name),
            "year" => Ok(MovieField::Year),
            "box_office" => Ok(MovieField::BoxOffice),
            "actors" => Ok(MovieField::Actors),
            other => Err(Error::UnknownField {
                kind: EntityKind::Movie,
                field: other.to_string(),
            }),
        }
    }
}

fn number_matches(actual: f64, value: &str) -> bool {
    value.trim().parse::<f64>().map(|v| v == actual).unwrap_or(false)
}

fn list_contains(list: &[String], value: &str) -> bool {
    list.iter().any(|item| item == value)
}

impl Filterable for Actor {
    type Field = ActorField;

    fn field_matches(&self, field: ActorField, value: &str) -> bool {
        match field {
            ActorField::Name => self.name == value,
            ActorField::Age => number_matches(self.age as f64, value),
            ActorField::TotalGross => self
                .gross_value
                .map(|gross| number_matches(gross, value))
                .unwrap_or(false),
            ActorField::Movies => list_contains(&self.movies_starred_in, value),
        }
    }
}

impl Filterable for Movie {
    type Field = MovieField;

    fn field_matches(&self, field: MovieField, value: &str) -> bool {
        match field {
            MovieField::Name => self.name == value,
            MovieField::Year => number_matches(self.year_released as f64, value),
            MovieField::BoxOffice => number_matches(self.gross_value, value),
            MovieField::Actors => list_contains(&self.actors, value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition<F> {
    Equals { field: F, value: String },
    And(Vec<FilterCondition<F>>),
    Or(Vec<FilterCondition<F>>),
    Not(Box<FilterCondition<F>>),
}

impl<F: Copy + FromStr<Err = Error>> FilterCondition<F> {
    /// Parse one `field = value` pair
    pub fn equals(field: &str, value: impl Into<String>) -> Result<Self> {
        Ok(FilterCondition::Equals {
            field: field.parse()?,
            value: value.into(),
        })
    }

    /// Every pair must match. An empty list matches everything.
    pub fn all<K, V, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| Self::equals(k.as_ref(), v))
            .collect::<Result<Vec<_>>>()
            .map(FilterCondition::And)
    }

    /// At least one pair must match
    pub fn any<K, V, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| Self::equals(k.as_ref(), v))
            .collect::<Result<Vec<_>>>()
            .map(FilterCondition::Or)
    }
}

pub struct AttributeFilter<T: Filterable> {
    condition: FilterCondition<T::Field>,
}

impl<T: Filterable> AttributeFilter<T> {
    pub fn new(condition: FilterCondition<T::Field>) -> Self {
        Self { condition }
    }

    fn matches_condition(condition: &FilterCondition<T::Field>, item: &T) -> bool {
        match condition {
            FilterCondition::Equals { field, value } => item.field_matches(*field, value),
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, item))
            }
            FilterCondition::Or(conditions) => {
                conditions.iter().any(|c| Self::matches_condition(c, item))
            }
            FilterCondition::Not(condition) => !Self::matches_condition(condition, item),
        }
    }
}

impl<T: Filterable> Filter<T> for AttributeFilter<T> {
    fn matches(&self, item: &T) -> bool {
        Self::matches_condition(&self.condition, item)
    }
}

pub type ActorFilter = AttributeFilter<Actor>;
pub type MovieFilter = AttributeFilter<Movie>;

impl Graph {
    /// Actors accepted by the filter, in insertion order
    pub fn filter_actors(&self, filter: &dyn Filter<Actor>) -> Vec<ActorId> {
        self.actors()
            .filter(|(_, actor)| filter.matches(actor))
            .map(|(id, _)| id)
            .collect()
    }

    /// Movies accepted by the filter, in insertion order
    pub fn filter_movies(&self, filter: &dyn Filter<Movie>) -> Vec<MovieId> {
        self.movies()
            .filter(|(_, movie)| filter.matches(movie))
            .map(|(id, _)| id)
            .collect()
    }
}
