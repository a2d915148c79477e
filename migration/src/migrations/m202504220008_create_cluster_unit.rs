use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202504220008_create_cluster_unit"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("cluster_unit"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("cluster_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("unit_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("created_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(Alias::new("updated_at")).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .primary_key(
                        Index::create()
                            .col(Alias::new("cluster_id"))
                            .col(Alias::new("unit_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("cluster_unit"), Alias::new("cluster_id"))
                            .to(Alias::new("clusters"), Alias::new("id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("cluster_unit"), Alias::new("unit_id"))
                            .to(Alias::new("units"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("cluster_unit")).to_owned())
            .await
    }
}
