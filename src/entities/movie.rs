use std::sync::OnceLock;

use regex::Regex;
use sea_orm::{ActiveValue, entity::prelude::*};

use crate::error::ValidationError;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;
pub const RATING_MIN: f64 = 0.0;
pub const RATING_MAX: f64 = 10.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub duration: String,
    pub rating: f64,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds.
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Every insert and update passes through here, so the field rules hold for
    /// all persisted rows regardless of which write path produced them.
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(name) = value_of(&self.name) {
            validate_name(name).map_err(custom)?;
        }
        if let Some(duration) = value_of(&self.duration) {
            validate_duration(duration).map_err(custom)?;
        }
        if let Some(rating) = value_of(&self.rating) {
            validate_rating(*rating).map_err(custom)?;
        }

        let now = now_ms();
        if insert {
            self.created_at = ActiveValue::Set(now);
        }
        self.updated_at = ActiveValue::Set(now);
        Ok(self)
    }
}

fn value_of<V>(value: &ActiveValue<V>) -> Option<&V>
where
    V: Into<Value>,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}

const REJECTED: &str = "movie rejected: ";

fn custom(err: ValidationError) -> DbErr {
    DbErr::Custom(format!("{REJECTED}{err}"))
}

/// The validation message carried by a `before_save` rejection, if `err` is one.
pub fn rejection(err: &DbErr) -> Option<&str> {
    match err {
        DbErr::Custom(msg) => msg.strip_prefix(REJECTED),
        _ => None,
    }
}

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^((([1-9][0-9]{0,2}|720)m)|(([0-9]|1[0-2])(\.[1-9])?h))$")
            .expect("Invalid duration regex")
    })
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(ValidationError::NameLength);
    }
    Ok(())
}

/// Accepts `<minutes>m` (1-999) or `<hours>h` (0-12, at most one non-zero
/// fractional digit).
pub fn validate_duration(duration: &str) -> Result<(), ValidationError> {
    if !duration_regex().is_match(duration) {
        return Err(ValidationError::InvalidDuration);
    }
    Ok(())
}

pub fn validate_rating(rating: f64) -> Result<(), ValidationError> {
    // NaN fails the range check as well.
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange);
    }
    Ok(())
}

fn now_ms() -> i64 {
    jiff::Timestamp::now().as_millisecond()
}
