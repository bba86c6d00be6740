//! SeaORM entity for the users table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub name: String,
    #[sea_orm(unique)]
    pub national_id: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wallet::Entity")]
    Wallet,
}

impl Related<super::wallet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wallet.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            name: model.name,
            national_id: model.national_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<crate::domain::User> for ActiveModel {
    fn from(user: crate::domain::User) -> Self {
        use sea_orm::Set;

        Self {
            id: Set(user.id),
            username: Set(user.username),
            name: Set(user.name),
            national_id: Set(user.national_id),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
    }
}
