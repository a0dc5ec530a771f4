use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Layouts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Layouts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Layouts::UserId).uuid().not_null())
                    .col(ColumnDef::new(Layouts::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Layouts::Widgets).json_binary().not_null())
                    .col(
                        ColumnDef::new(Layouts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Layouts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_layouts_user_id")
                            .from(Layouts::Table, Layouts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_layouts_user_id
                ON layouts (user_id);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Layouts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Layouts {
    Table,
    Id,
    UserId,
    Name,
    Widgets,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
