//! SeaORM entity for the wallets table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub currency: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub balance: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::domain::Wallet {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            currency: model.currency,
            balance: model.balance,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<crate::domain::Wallet> for ActiveModel {
    fn from(wallet: crate::domain::Wallet) -> Self {
        use sea_orm::Set;

        Self {
            id: Set(wallet.id),
            user_id: Set(wallet.user_id),
            currency: Set(wallet.currency),
            balance: Set(wallet.balance),
            created_at: Set(wallet.created_at),
            updated_at: Set(wallet.updated_at),
        }
    }
}
