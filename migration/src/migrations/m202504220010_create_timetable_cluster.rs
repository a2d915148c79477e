use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202504220010_create_timetable_cluster"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("timetable_cluster"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("timetable_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("cluster_id")).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Alias::new("timetable_id"))
                            .col(Alias::new("cluster_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("timetable_cluster"), Alias::new("timetable_id"))
                            .to(Alias::new("timetables"), Alias::new("id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Alias::new("timetable_cluster"), Alias::new("cluster_id"))
                            .to(Alias::new("clusters"), Alias::new("id")),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("timetable_cluster")).to_owned())
            .await
    }
}
