//! 评分存储操作
//!
//! 录入、修订与综合成绩结算各自在一个事务内完成：评分、评分项、项目状态要么全部写入，
//! 要么全部回滚。事务内的读取同样走该事务。

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use tracing::info;

use super::SeaOrmStorage;
use super::projects::{apply_event, load_project, lock_project};
use crate::engine::{LifecycleEvent, ScoreSheet, ScoringEngine};
use crate::entity::evaluation_marks::{
    ActiveModel as MarkActiveModel, Column as MarkColumn, Entity as EvaluationMarks,
};
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations, Model};
use crate::errors::{CapstoneError, Result};
use crate::models::{
    evaluations::{
        entities::{CombinedGrade, Evaluation, EvaluationCategory},
        requests::{RecordEvaluationRequest, ReviseEvaluationRequest},
        responses::ProjectEvaluationsResponse,
    },
    projects::entities::{Project, ProjectStatus},
};
use crate::utils::validate::{ValidatedMarks, normalize_text, validate_marks};

async fn find_by_category<C: ConnectionTrait>(
    conn: &C,
    project_id: i64,
    category: EvaluationCategory,
) -> Result<Option<Model>> {
    Evaluations::find()
        .filter(Column::ProjectId.eq(project_id))
        .filter(Column::Category.eq(category.to_string()))
        .one(conn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("查询评分失败: {e}")))
}

pub(super) async fn both_categories_exist<C: ConnectionTrait>(
    conn: &C,
    project_id: i64,
) -> Result<bool> {
    for category in EvaluationCategory::all() {
        if find_by_category(conn, project_id, *category).await?.is_none() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// 读取评分及其评分项
async fn hydrate<C: ConnectionTrait>(conn: &C, model: Model) -> Result<Evaluation> {
    let marks = EvaluationMarks::find()
        .filter(MarkColumn::EvaluationId.eq(model.id))
        .order_by_asc(MarkColumn::Position)
        .all(conn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("查询评分项失败: {e}")))?;

    model.into_evaluation(marks)
}

async fn load_evaluation<C: ConnectionTrait>(conn: &C, evaluation_id: i64) -> Result<Evaluation> {
    let model = Evaluations::find_by_id(evaluation_id)
        .one(conn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("查询评分失败: {e}")))?
        .ok_or_else(|| CapstoneError::not_found(format!("评分 {evaluation_id} 不存在")))?;

    hydrate(conn, model).await
}

/// 按提交顺序写入评分项
async fn insert_marks<C: ConnectionTrait>(
    conn: &C,
    evaluation_id: i64,
    marks: ValidatedMarks,
) -> Result<()> {
    for (position, mark) in marks.into_inner().into_iter().enumerate() {
        MarkActiveModel {
            evaluation_id: Set(evaluation_id),
            position: Set(position as i32),
            criterion_name: Set(mark.criterion_name),
            max_score: Set(mark.max_score),
            score: Set(mark.score),
            comments: Set(mark.comments),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("写入评分项失败: {e}")))?;
    }
    Ok(())
}

/// 把计算结果写入 ActiveModel 的分数字段
fn apply_sheet(model: &mut ActiveModel, sheet: ScoreSheet) {
    model.total_score = Set(sheet.percentage);
    model.achieved_points = Set(sheet.achieved_points);
    model.max_points = Set(sheet.max_points);
    model.code_quality = Set(sheet.subtotals.code_quality);
    model.documentation = Set(sheet.subtotals.documentation);
    model.functionality = Set(sheet.subtotals.functionality);
    model.clarity_communication = Set(sheet.subtotals.clarity_communication);
    model.visual_presentation = Set(sheet.subtotals.visual_presentation);
    model.technical_explanation = Set(sheet.subtotals.technical_explanation);
}

/// 结算综合成绩并写入两条评分，项目流转到 `EVALUATED`
///
/// 可重复调用：每次都按当前评分项重新计算并覆盖。
pub(super) async fn finalize_in<C: ConnectionTrait>(
    conn: &C,
    project: &mut Project,
    now: DateTime<Utc>,
) -> Result<CombinedGrade> {
    let project_eval = find_by_category(conn, project.id, EvaluationCategory::Project).await?;
    let presentation_eval =
        find_by_category(conn, project.id, EvaluationCategory::Presentation).await?;
    let (Some(project_eval), Some(presentation_eval)) = (project_eval, presentation_eval) else {
        return Err(CapstoneError::precondition_failed(format!(
            "项目 {} 需同时具备 PROJECT 与 PRESENTATION 评分才能结算综合成绩",
            project.id
        )));
    };

    let grade = ScoringEngine::combine(
        project_eval.achieved_points,
        presentation_eval.achieved_points,
    );

    for evaluation_id in [project_eval.id, presentation_eval.id] {
        ActiveModel {
            id: Set(evaluation_id),
            combined_project_points: Set(Some(grade.project_points)),
            combined_presentation_points: Set(Some(grade.presentation_points)),
            combined_percentage: Set(Some(grade.percentage)),
            letter_grade: Set(Some(grade.letter_grade.to_string())),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        }
        .update(conn)
        .await
        .map_err(|e| CapstoneError::database_operation(format!("写入综合成绩失败: {e}")))?;
    }

    // SUBMITTED 状态下先进入评审，再完成评分
    apply_event(conn, project, LifecycleEvent::EvaluationRecorded, now).await?;
    apply_event(conn, project, LifecycleEvent::AllCategoriesScored, now).await?;

    info!(
        project_id = project.id,
        percentage = grade.percentage,
        letter_grade = %grade.letter_grade,
        "综合成绩已结算"
    );

    Ok(grade)
}

fn map_insert_error(err: DbErr, project_id: i64, category: EvaluationCategory) -> CapstoneError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => CapstoneError::duplicate_evaluation(
            format!("项目 {project_id} 已有 {category} 评分"),
        ),
        _ => CapstoneError::database_operation(format!("创建评分失败: {err}")),
    }
}

impl SeaOrmStorage {
    /// 录入某一类评分
    pub async fn record_evaluation_impl(
        &self,
        project_id: i64,
        evaluator_id: i64,
        req: RecordEvaluationRequest,
    ) -> Result<Evaluation> {
        let marks = validate_marks(req.marks)?;
        let comments = normalize_text(req.comments);
        let category = req.category;
        let now = Utc::now();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("开启事务失败: {e}")))?;

        // 锁住项目行后再查对方类别，保证两类评分并发录入时后者一定能看到前者
        let mut project = lock_project(&txn, project_id).await?;

        // 已存在同类评分应走修订，先于状态检查
        if find_by_category(&txn, project_id, category).await?.is_some() {
            return Err(CapstoneError::duplicate_evaluation(format!(
                "项目 {project_id} 已有 {category} 评分"
            )));
        }

        if !matches!(
            project.status,
            ProjectStatus::Submitted | ProjectStatus::UnderReview
        ) {
            return Err(CapstoneError::precondition_failed(format!(
                "项目 {project_id} 当前状态为 '{}'，只有已提交或评审中的项目可以评分",
                project.status
            )));
        }

        let sheet = ScoringEngine::score(category, &marks);
        let percentage = sheet.percentage;

        let mut model = ActiveModel {
            project_id: Set(project_id),
            evaluator_id: Set(evaluator_id),
            category: Set(category.to_string()),
            combined_project_points: Set(None),
            combined_presentation_points: Set(None),
            combined_percentage: Set(None),
            letter_grade: Set(None),
            comments: Set(comments),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };
        apply_sheet(&mut model, sheet);

        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| map_insert_error(e, project_id, category))?;

        insert_marks(&txn, inserted.id, marks).await?;

        apply_event(&txn, &mut project, LifecycleEvent::EvaluationRecorded, now).await?;

        if find_by_category(&txn, project_id, category.counterpart())
            .await?
            .is_some()
        {
            finalize_in(&txn, &mut project, now).await?;
        }

        let evaluation = load_evaluation(&txn, inserted.id).await?;

        txn.commit()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("提交事务失败: {e}")))?;

        info!(
            project_id,
            evaluation_id = evaluation.id,
            %category,
            percentage,
            "评分已录入"
        );

        Ok(evaluation)
    }

    /// 修订评分：整体替换评分项并重新计算
    pub async fn revise_evaluation_impl(
        &self,
        evaluation_id: i64,
        req: ReviseEvaluationRequest,
    ) -> Result<Evaluation> {
        let marks = validate_marks(req.marks)?;
        let comments = normalize_text(req.comments);
        let now = Utc::now();

        // 评分所属项目不会变化，可在事务外确定，事务的第一条语句留给项目锁
        let project_id = Evaluations::find_by_id(evaluation_id)
            .one(&self.db)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询评分失败: {e}")))?
            .ok_or_else(|| CapstoneError::not_found(format!("评分 {evaluation_id} 不存在")))?
            .project_id;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("开启事务失败: {e}")))?;

        let mut project = lock_project(&txn, project_id).await?;
        let existing = Evaluations::find_by_id(evaluation_id)
            .one(&txn)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询评分失败: {e}")))?
            .ok_or_else(|| CapstoneError::not_found(format!("评分 {evaluation_id} 不存在")))?;
        let category = existing.category()?;

        let sheet = ScoringEngine::score(category, &marks);

        EvaluationMarks::delete_many()
            .filter(MarkColumn::EvaluationId.eq(evaluation_id))
            .exec(&txn)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("删除评分项失败: {e}")))?;
        insert_marks(&txn, evaluation_id, marks).await?;

        let mut model = ActiveModel {
            id: Set(evaluation_id),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };
        apply_sheet(&mut model, sheet);
        if let Some(comments) = comments {
            model.comments = Set(Some(comments));
        }
        model
            .update(&txn)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("更新评分失败: {e}")))?;

        if self.scoring.resync_combined_on_revision
            && find_by_category(&txn, project_id, category.counterpart())
                .await?
                .is_some()
        {
            finalize_in(&txn, &mut project, now).await?;
        }

        let evaluation = load_evaluation(&txn, evaluation_id).await?;

        txn.commit()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("提交事务失败: {e}")))?;

        info!(
            project_id,
            evaluation_id,
            %category,
            percentage = evaluation.total_score,
            "评分已修订"
        );

        Ok(evaluation)
    }

    /// 结算综合成绩
    pub async fn finalize_combined_grade_impl(&self, project_id: i64) -> Result<CombinedGrade> {
        let now = Utc::now();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("开启事务失败: {e}")))?;

        let mut project = lock_project(&txn, project_id).await?;
        let grade = finalize_in(&txn, &mut project, now).await?;

        txn.commit()
            .await
            .map_err(|e| CapstoneError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(grade)
    }

    /// 获取项目的两类评分及综合成绩
    pub async fn list_project_evaluations_impl(
        &self,
        project_id: i64,
    ) -> Result<ProjectEvaluationsResponse> {
        load_project(&self.db, project_id).await?;

        let mut response = ProjectEvaluationsResponse {
            project_evaluation: None,
            presentation_evaluation: None,
            combined: None,
        };

        let models = Evaluations::find()
            .filter(Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询评分失败: {e}")))?;

        for model in models {
            let evaluation = hydrate(&self.db, model).await?;
            if response.combined.is_none() {
                response.combined = evaluation.combined();
            }
            match evaluation.category {
                EvaluationCategory::Project => response.project_evaluation = Some(evaluation),
                EvaluationCategory::Presentation => {
                    response.presentation_evaluation = Some(evaluation)
                }
            }
        }

        Ok(response)
    }

    /// 通过 ID 获取评分
    pub async fn get_evaluation_by_id_impl(&self, evaluation_id: i64) -> Result<Option<Evaluation>> {
        let result = Evaluations::find_by_id(evaluation_id)
            .one(&self.db)
            .await
            .map_err(|e| CapstoneError::database_operation(format!("查询评分失败: {e}")))?;

        match result {
            Some(model) => hydrate(&self.db, model).await.map(Some),
            None => Ok(None),
        }
    }
}
