use sea_orm::{EntityTrait, Schema};
use sea_orm_migration::prelude::*;

use crate::entity::{
    AuditLogs, CartItems, Carts, Categories, Likes, OrderItems, Orders, Products, Users,
    cart_items, likes, orders,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        // Parents before children so foreign keys resolve.
        create_table(manager, &schema, Users).await?;
        create_table(manager, &schema, Categories).await?;
        create_table(manager, &schema, Products).await?;
        create_table(manager, &schema, Carts).await?;
        create_table(manager, &schema, CartItems).await?;
        create_table(manager, &schema, Likes).await?;
        create_table(manager, &schema, Orders).await?;
        create_table(manager, &schema, OrderItems).await?;
        create_table(manager, &schema, AuditLogs).await?;

        // Targets of the cart/likes upserts.
        manager
            .create_index(
                Index::create()
                    .name("uq_cart_items_cart_product")
                    .table(CartItems)
                    .col(cart_items::Column::CartId)
                    .col(cart_items::Column::ProductId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uq_likes_session_product")
                    .table(Likes)
                    .col(likes::Column::SessionId)
                    .col(likes::Column::ProductId)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_user_created")
                    .table(Orders)
                    .col(orders::Column::UserId)
                    .col(orders::Column::CreatedAt)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_table(manager, AuditLogs).await?;
        drop_table(manager, OrderItems).await?;
        drop_table(manager, Orders).await?;
        drop_table(manager, Likes).await?;
        drop_table(manager, CartItems).await?;
        drop_table(manager, Carts).await?;
        drop_table(manager, Products).await?;
        drop_table(manager, Categories).await?;
        drop_table(manager, Users).await
    }
}

async fn create_table<E>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(schema.create_table_from_entity(entity).if_not_exists().to_owned())
        .await
}

async fn drop_table<E>(manager: &SchemaManager<'_>, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .drop_table(Table::drop().table(entity).if_exists().to_owned())
        .await
}
