//! Filter, sort and paging description for movie reads, turned into a
//! sea-orm [`Select`] by [`MovieQuery::select`].

use sea_orm::{
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select,
    sea_query::{BinOper, Expr, Func, Order},
};

use crate::entities::movie;

/// OFFSET and LIMIT are bound as signed 64-bit integers.
const MAX_BOUND: u64 = i64::MAX as u64;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }

    fn order(self) -> Order {
        match self {
            Direction::Asc => Order::Asc,
            Direction::Desc => Order::Desc,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortField {
    Name,
    Rating,
    UpdatedAt,
}

impl SortField {
    fn column(self) -> movie::Column {
        match self {
            SortField::Name => movie::Column::Name,
            SortField::Rating => movie::Column::Rating,
            SortField::UpdatedAt => movie::Column::UpdatedAt,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum NameFilter {
    /// `lower(name) LIKE lower('%needle%')`, folded by the database on both sides.
    IgnoreCase(String),
    /// `name LIKE '%needle%'`, case handling left to the collation.
    Collation(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieQuery {
    name: Option<NameFilter>,
    rating: Option<f64>,
    sort: SortField,
    direction: Direction,
    page: u64,
    per_page: u64,
}

impl MovieQuery {
    /// Most recently updated first. `page` and `per_page` are raised to 1.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            name: None,
            rating: None,
            sort: SortField::UpdatedAt,
            direction: Direction::Desc,
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_BOUND),
        }
    }

    pub fn name(mut self, filter: NameFilter) -> Self {
        self.name = Some(filter);
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn order_by(mut self, sort: SortField, direction: Direction) -> Self {
        self.sort = sort;
        self.direction = direction;
        self
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn sort(&self) -> (SortField, Direction) {
        (self.sort, self.direction)
    }

    /// Pages past the end of any table yield an offset that selects nothing.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page).min(MAX_BOUND)
    }

    /// Filtered and ordered, without offset or limit.
    pub fn select(&self) -> Select<movie::Entity> {
        let mut select = movie::Entity::find();

        match &self.name {
            Some(NameFilter::IgnoreCase(needle)) => {
                select = select.filter(
                    Expr::expr(Func::lower(Expr::col((movie::Entity, movie::Column::Name))))
                        .binary(BinOper::Like, Func::lower(Expr::val(format!("%{needle}%")))),
                );
            }
            Some(NameFilter::Collation(needle)) => {
                select = select.filter(movie::Column::Name.contains(needle));
            }
            None => {}
        }

        if let Some(rating) = self.rating {
            select = select.filter(movie::Column::Rating.eq(rating));
        }

        // Rows sharing a sort key still come back in a stable order.
        select
            .order_by(self.sort.column(), self.direction.order())
            .order_by_desc(movie::Column::Id)
    }
}
