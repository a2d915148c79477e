use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DbErr, Set};

/// Direct grant of a permission to a user.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_permissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub permission_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::permission::Entity",
        from = "Column::PermissionId",
        to = "super::permission::Column::Id",
        on_delete = "Cascade"
    )]
    Permission,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Permission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Grants the named permission to a user. Granting twice is a no-op.
    ///
    /// Fails with `RecordNotFound` if no permission carries that name.
    pub async fn grant<C: ConnectionTrait>(db: &C, user_id: i64, name: &str) -> Result<(), DbErr> {
        let permission = super::permission::Model::find_by_name(db, name)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("permission '{name}'")))?;

        Entity::insert(ActiveModel {
            user_id: Set(user_id),
            permission_id: Set(permission.id),
        })
        .on_conflict(
            OnConflict::columns([Column::UserId, Column::PermissionId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;

        Ok(())
    }

    pub async fn revoke<C: ConnectionTrait>(db: &C, user_id: i64, name: &str) -> Result<u64, DbErr> {
        let Some(permission) = super::permission::Model::find_by_name(db, name).await? else {
            return Ok(0);
        };

        let res = Entity::delete_many()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::PermissionId.eq(permission.id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn user_has<C: ConnectionTrait>(db: &C, user_id: i64, name: &str) -> Result<bool, DbErr> {
        let count = Entity::find()
            .inner_join(super::permission::Entity)
            .filter(Column::UserId.eq(user_id))
            .filter(super::permission::Column::Name.eq(name))
            .count(db)
            .await?;
        Ok(count > 0)
    }
}
