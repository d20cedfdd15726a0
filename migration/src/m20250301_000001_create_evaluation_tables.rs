use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建项目表
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Projects::Description).text().null())
                    .col(ColumnDef::new(Projects::Level).integer().not_null())
                    .col(
                        ColumnDef::new(Projects::StudyProgramId)
                            .big_integer()
                            .not_null(),
                    )
                    // 每名学生只有一个项目
                    .col(
                        ColumnDef::new(Projects::StudentId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Projects::Status).string_len(32).not_null())
                    .col(ColumnDef::new(Projects::RepositoryUrl).string_len(500).null())
                    .col(
                        ColumnDef::new(Projects::DocumentationUrl)
                            .string_len(500)
                            .null(),
                    )
                    .col(ColumnDef::new(Projects::SubmittedAt).big_integer().null())
                    .col(ColumnDef::new(Projects::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Projects::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建评分表
        manager
            .create_table(
                Table::create()
                    .table(Evaluations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Evaluations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::ProjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::EvaluatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::Category)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::TotalScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Evaluations::AchievedPoints)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Evaluations::MaxPoints)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Evaluations::CodeQuality).double().null())
                    .col(ColumnDef::new(Evaluations::Documentation).double().null())
                    .col(ColumnDef::new(Evaluations::Functionality).double().null())
                    .col(
                        ColumnDef::new(Evaluations::ClarityCommunication)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::VisualPresentation)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::TechnicalExplanation)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CombinedProjectPoints)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CombinedPresentationPoints)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::CombinedPercentage)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(Evaluations::LetterGrade).string_len(2).null())
                    .col(ColumnDef::new(Evaluations::Comments).text().null())
                    .col(
                        ColumnDef::new(Evaluations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Evaluations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Evaluations::Table, Evaluations::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分项表
        manager
            .create_table(
                Table::create()
                    .table(EvaluationMarks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EvaluationMarks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EvaluationMarks::EvaluationId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationMarks::Position)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationMarks::CriterionName)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationMarks::MaxScore)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EvaluationMarks::Score)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(EvaluationMarks::Comments).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(EvaluationMarks::Table, EvaluationMarks::EvaluationId)
                            .to(Evaluations::Table, Evaluations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建截止时间表
        manager
            .create_table(
                Table::create()
                    .table(Deadlines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Deadlines::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Deadlines::Level)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Deadlines::Deadline).big_integer().not_null())
                    .col(ColumnDef::new(Deadlines::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Deadlines::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 每个项目每类评分只能有一条
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_evaluations_project_category")
                    .table(Evaluations::Table)
                    .col(Evaluations::ProjectId)
                    .col(Evaluations::Category)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_projects_status")
                    .table(Projects::Table)
                    .col(Projects::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_evaluation_marks_evaluation_id")
                    .table(EvaluationMarks::Table)
                    .col(EvaluationMarks::EvaluationId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EvaluationMarks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Evaluations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Deadlines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Projects {
    #[sea_orm(iden = "projects")]
    Table,
    Id,
    Title,
    Description,
    Level,
    StudyProgramId,
    StudentId,
    Status,
    RepositoryUrl,
    DocumentationUrl,
    SubmittedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Evaluations {
    #[sea_orm(iden = "evaluations")]
    Table,
    Id,
    ProjectId,
    EvaluatorId,
    Category,
    TotalScore,
    AchievedPoints,
    MaxPoints,
    CodeQuality,
    Documentation,
    Functionality,
    ClarityCommunication,
    VisualPresentation,
    TechnicalExplanation,
    CombinedProjectPoints,
    CombinedPresentationPoints,
    CombinedPercentage,
    LetterGrade,
    Comments,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EvaluationMarks {
    #[sea_orm(iden = "evaluation_marks")]
    Table,
    Id,
    EvaluationId,
    Position,
    CriterionName,
    MaxScore,
    Score,
    Comments,
}

#[derive(DeriveIden)]
enum Deadlines {
    #[sea_orm(iden = "deadlines")]
    Table,
    Id,
    Level,
    Deadline,
    CreatedAt,
    UpdatedAt,
}
