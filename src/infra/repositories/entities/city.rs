//! City database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::FromQueryResult;

use crate::domain::City;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub state: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Alias of the window-function column carrying the total row count.
pub const TOTAL_RECORDS_ALIAS: &str = "total_records";

/// One row of a windowed list query: the city plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct CountedRow {
    pub total_records: i64,
    pub id: i64,
    pub name: String,
    pub state: String,
}

impl From<CountedRow> for City {
    fn from(row: CountedRow) -> Self {
        City {
            id: row.id,
            name: row.name,
            state: row.state,
        }
    }
}
