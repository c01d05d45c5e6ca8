//! Create pull_request_reviewers join table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PullRequestReviewers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PullRequestReviewers::PullRequestId)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PullRequestReviewers::UserId)
                            .string_len(50)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PullRequestReviewers::PullRequestId)
                            .col(PullRequestReviewers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pr_reviewers_pull_request")
                            .from(
                                PullRequestReviewers::Table,
                                PullRequestReviewers::PullRequestId,
                            )
                            .to(PullRequests::Table, PullRequests::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pr_reviewers_user")
                            .from(PullRequestReviewers::Table, PullRequestReviewers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookup: pull requests a user reviews
        manager
            .create_index(
                Index::create()
                    .name("idx_pr_reviewers_user")
                    .table(PullRequestReviewers::Table)
                    .col(PullRequestReviewers::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PullRequestReviewers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum PullRequestReviewers {
    Table,
    PullRequestId,
    UserId,
}

#[derive(DeriveIden)]
enum PullRequests {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
