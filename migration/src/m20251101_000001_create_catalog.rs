use sea_orm_migration::prelude::*;

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    GenderTarget,
    Visible,
    ColorCode,
    IconClass,
}

#[derive(DeriveIden)]
enum Brands {
    Table,
    Id,
    Name,
    Country,
    FoundedYear,
}

#[derive(DeriveIden)]
enum Materials {
    Table,
    Id,
    Name,
    Waterproof,
    CareInstructions,
}

#[derive(DeriveIden)]
enum Sizes {
    Table,
    Id,
    Value,
    SizeSystem,
    ForChildren,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Price,
    Description,
    InStock,
    CreatedAt,
    Weight,
    PrimaryColor,
    CategoryId,
    BrandId,
    MaterialId,
}

#[derive(DeriveIden)]
enum SizeStocks {
    Table,
    Id,
    ProductId,
    SizeId,
    Quantity,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Categories::GenderTarget).string_len(2).not_null())
                    .col(
                        ColumnDef::new(Categories::Visible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Categories::ColorCode)
                            .string_len(7)
                            .not_null()
                            .default("#004d99"),
                    )
                    .col(
                        ColumnDef::new(Categories::IconClass)
                            .string_len(50)
                            .not_null()
                            .default("fa-solid fa-shoe-prints"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Brands::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Brands::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Brands::Country).string_len(100).not_null())
                    .col(ColumnDef::new(Brands::FoundedYear).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Materials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Materials::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Materials::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Materials::Waterproof)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Materials::CareInstructions).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sizes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sizes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sizes::Value).string_len(10).not_null())
                    .col(ColumnDef::new(Sizes::SizeSystem).string_len(2).not_null())
                    .col(
                        ColumnDef::new(Sizes::ForChildren)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string_len(150).not_null())
                    .col(ColumnDef::new(Products::Price).decimal_len(8, 2).not_null())
                    .col(ColumnDef::new(Products::Description).text().not_null())
                    .col(
                        ColumnDef::new(Products::InStock)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Products::Weight).double().null())
                    .col(ColumnDef::new(Products::PrimaryColor).string_len(50).not_null())
                    .col(ColumnDef::new(Products::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Products::BrandId).integer().not_null())
                    .col(ColumnDef::new(Products::MaterialId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_category")
                            .from(Products::Table, Products::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_brand")
                            .from(Products::Table, Products::BrandId)
                            .to(Brands::Table, Brands::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_material")
                            .from(Products::Table, Products::MaterialId)
                            .to(Materials::Table, Materials::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SizeStocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SizeStocks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SizeStocks::ProductId).integer().not_null())
                    .col(ColumnDef::new(SizeStocks::SizeId).integer().not_null())
                    .col(
                        ColumnDef::new(SizeStocks::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_size_stocks_product")
                            .from(SizeStocks::Table, SizeStocks::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_size_stocks_size")
                            .from(SizeStocks::Table, SizeStocks::SizeId)
                            .to(Sizes::Table, Sizes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_size_stocks_product_size")
                    .table(SizeStocks::Table)
                    .col(SizeStocks::ProductId)
                    .col(SizeStocks::SizeId)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_products_category_id")
                    .table(Products::Table)
                    .col(Products::CategoryId)
                    .to_owned(),
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SizeStocks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sizes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Materials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        Ok(())
    }
}
