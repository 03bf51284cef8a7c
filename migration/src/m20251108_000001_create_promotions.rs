use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Promotions {
    Table,
    Id,
    Name,
    CreatedAt,
    ExpiresAt,
    DiscountPercent,
    EmailSubject,
    Template,
}

#[derive(DeriveIden)]
enum PromotionCategories {
    Table,
    PromotionId,
    CategoryId,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Promotions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Promotions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Promotions::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Promotions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Promotions::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Promotions::DiscountPercent).integer().not_null())
                    .col(ColumnDef::new(Promotions::EmailSubject).string_len(200).not_null())
                    .col(ColumnDef::new(Promotions::Template).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PromotionCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PromotionCategories::PromotionId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PromotionCategories::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PromotionCategories::PromotionId)
                            .col(PromotionCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_promotion_categories_promotion")
                            .from(PromotionCategories::Table, PromotionCategories::PromotionId)
                            .to(Promotions::Table, Promotions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_promotion_categories_category")
                            .from(PromotionCategories::Table, PromotionCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PromotionCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Promotions::Table).to_owned())
            .await?;
        Ok(())
    }
}
