use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum MovieType {
    #[sea_orm(string_value = "TV Shows")]
    #[serde(rename = "TV Shows")]
    TvShows,
    #[sea_orm(string_value = "Movies")]
    #[serde(rename = "Movies")]
    Movies,
}

impl MovieType {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "TV Shows" => Some(MovieType::TvShows),
            "Movies" => Some(MovieType::Movies),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "Movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: u32,
    pub title: String,
    #[sea_orm(column_name = "type")]
    pub kind: MovieType,
    pub director: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub budget: Decimal,
    pub location: String,
    pub duration: String,
    pub year: String,
    /// Unix milliseconds.
    #[sea_orm(column_name = "createdAt")]
    pub created_at: i64,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
