use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Set,
};

use crate::{
    entities::movie,
    error::{AppError, AppResult},
    models::{MovieInput, Page},
    query::MovieQuery,
};

/// Reads and writes of the `movies` table over a shared connection pool.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: MovieInput) -> AppResult<movie::Model> {
        input.validate()?;

        let model = movie::ActiveModel {
            name: Set(input.name),
            duration: Set(input.duration),
            rating: Set(input.rating),
            ..Default::default()
        };

        Ok(model.insert(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id).one(&self.db).await?.ok_or(AppError::NotFound)
    }

    /// Runs `query` twice: once for the unpaged count, once for the page itself.
    pub async fn page(&self, query: &MovieQuery) -> AppResult<Page> {
        let select = query.select();
        let total = select.clone().count(&self.db).await?;
        let movies = select
            .offset(query.offset())
            .limit(query.per_page())
            .all(&self.db)
            .await?;

        Ok(Page { movies, total })
    }

    /// Replaces name, duration and rating of an existing movie.
    pub async fn update(&self, id: i32, input: MovieInput) -> AppResult<movie::Model> {
        input.validate()?;

        let existing = self.get(id).await?;
        let mut model: movie::ActiveModel = existing.into();
        model.name = Set(input.name);
        model.duration = Set(input.duration);
        model.rating = Set(input.rating);

        match model.update(&self.db).await {
            Ok(updated) => Ok(updated),
            // Deleted between the lookup and the write.
            Err(DbErr::RecordNotUpdated) => Err(AppError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let res = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }
}
