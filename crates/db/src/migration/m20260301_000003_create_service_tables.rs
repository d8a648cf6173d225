//! Create document_requests, appointments, fee_payments and inquiries tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DocumentRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DocumentRequests::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DocumentRequests::ReferenceNo)
                            .string_len(14)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DocumentRequests::StudentId).uuid().not_null())
                    .col(
                        ColumnDef::new(DocumentRequests::DocumentTypeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentRequests::Purpose)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(DocumentRequests::Remarks)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(DocumentRequests::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DocumentRequests::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_requests_student")
                            .from(DocumentRequests::Table, DocumentRequests::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_document_requests_document_type")
                            .from(DocumentRequests::Table, DocumentRequests::DocumentTypeId)
                            .to(DocumentTypes::Table, DocumentTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: reference_no - same-second collisions fail here
        manager
            .create_index(
                Index::create()
                    .name("idx_document_requests_reference_no")
                    .table(DocumentRequests::Table)
                    .col(DocumentRequests::ReferenceNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_document_requests_student")
                    .table(DocumentRequests::Table)
                    .col(DocumentRequests::StudentId)
                    .col(DocumentRequests::RequestedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Appointments::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::Office).string_len(120).not_null())
                    .col(ColumnDef::new(Appointments::Topic).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Appointments::Schedule)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(Appointments::Notes)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_student")
                            .from(Appointments::Table, Appointments::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_student")
                    .table(Appointments::Table)
                    .col(Appointments::StudentId)
                    .col(Appointments::Schedule)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeePayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FeePayments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FeePayments::StudentId).uuid().not_null())
                    .col(ColumnDef::new(FeePayments::FeeName).string_len(140).not_null())
                    .col(
                        ColumnDef::new(FeePayments::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeePayments::Reference).string_len(60))
                    .col(
                        ColumnDef::new(FeePayments::Status)
                            .string_len(20)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(
                        ColumnDef::new(FeePayments::AdminNote)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(FeePayments::PaidAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fee_payments_student")
                            .from(FeePayments::Table, FeePayments::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fee_payments_student")
                    .table(FeePayments::Table)
                    .col(FeePayments::StudentId)
                    .col(FeePayments::PaidAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Inquiries::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Inquiries::StudentId).uuid().not_null())
                    .col(ColumnDef::new(Inquiries::Subject).string_len(160).not_null())
                    .col(ColumnDef::new(Inquiries::Message).text().not_null())
                    .col(
                        ColumnDef::new(Inquiries::Status)
                            .string_len(20)
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(
                        ColumnDef::new(Inquiries::Reply)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Inquiries::RepliedBy).uuid())
                    .col(
                        ColumnDef::new(Inquiries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Inquiries::RepliedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inquiries_student")
                            .from(Inquiries::Table, Inquiries::StudentId)
                            .to(StudentProfiles::Table, StudentProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inquiries_replied_by")
                            .from(Inquiries::Table, Inquiries::RepliedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_student")
                    .table(Inquiries::Table)
                    .col(Inquiries::StudentId)
                    .col(Inquiries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FeePayments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DocumentRequests::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(Iden)]
enum DocumentRequests {
    Table,
    Id,
    ReferenceNo,
    StudentId,
    DocumentTypeId,
    Purpose,
    Status,
    Remarks,
    RequestedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Appointments {
    Table,
    Id,
    StudentId,
    Office,
    Topic,
    Schedule,
    Status,
    Notes,
    CreatedAt,
}

#[derive(Iden)]
enum FeePayments {
    Table,
    Id,
    StudentId,
    FeeName,
    Amount,
    Reference,
    Status,
    AdminNote,
    PaidAt,
    CreatedAt,
}

#[derive(Iden)]
enum Inquiries {
    Table,
    Id,
    StudentId,
    Subject,
    Message,
    Status,
    Reply,
    RepliedBy,
    CreatedAt,
    RepliedAt,
}

#[derive(Iden)]
enum StudentProfiles {
    Table,
    Id,
}

#[derive(Iden)]
enum DocumentTypes {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
