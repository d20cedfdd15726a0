use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{CapstoneError, Result};
use crate::models::evaluations::requests::MarkInput;

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9.-]+(:\d+)?(/\S*)?$").expect("Invalid link regex")
});

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_LINK_LEN: usize = 500;
pub const MAX_CRITERION_LEN: usize = 100;

/// 去除首尾空白，空字符串视为未填写
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CapstoneError::validation("Project title must not be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(CapstoneError::validation(format!(
            "Project title must be at most {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

/// 校验提交链接（代码仓库、文档），未填写时返回 `None`
pub fn validate_link(field: &str, link: Option<String>) -> Result<Option<String>> {
    let Some(link) = normalize_text(link) else {
        return Ok(None);
    };
    if link.len() > MAX_LINK_LEN {
        return Err(CapstoneError::validation(format!(
            "{field} must be at most {MAX_LINK_LEN} characters"
        )));
    }
    if !LINK_RE.is_match(&link) {
        return Err(CapstoneError::validation(format!(
            "{field} must be an http(s) URL"
        )));
    }
    Ok(Some(link))
}

/// 已通过校验的评分项：非空，且每项满足 0 ≤ score ≤ max_score
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMarks(Vec<MarkInput>);

impl ValidatedMarks {
    pub fn as_slice(&self) -> &[MarkInput] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<MarkInput> {
        self.0
    }
}

fn validate_mark(index: usize, mark: MarkInput) -> Result<MarkInput> {
    let name = mark.criterion_name.trim().to_string();
    if name.is_empty() {
        return Err(CapstoneError::validation(format!(
            "Mark #{}: criterion name must not be empty",
            index + 1
        )));
    }
    if name.chars().count() > MAX_CRITERION_LEN {
        return Err(CapstoneError::validation(format!(
            "Mark '{name}': criterion name must be at most {MAX_CRITERION_LEN} characters"
        )));
    }
    if !mark.max_score.is_finite() || !mark.score.is_finite() {
        return Err(CapstoneError::validation(format!(
            "Mark '{name}': scores must be finite numbers"
        )));
    }
    if mark.max_score < 0.0 {
        return Err(CapstoneError::validation(format!(
            "Mark '{name}': maximum score must not be negative"
        )));
    }
    if mark.score < 0.0 {
        return Err(CapstoneError::validation(format!(
            "Mark '{name}': score must not be negative"
        )));
    }
    if mark.score > mark.max_score {
        return Err(CapstoneError::validation(format!(
            "Mark '{name}': score {} exceeds maximum {}",
            mark.score, mark.max_score
        )));
    }

    Ok(MarkInput {
        criterion_name: name,
        max_score: mark.max_score,
        score: mark.score,
        comments: normalize_text(mark.comments),
    })
}

/// 校验并规整评分项，任一项不合法即整体失败
pub fn validate_marks(marks: Vec<MarkInput>) -> Result<ValidatedMarks> {
    if marks.is_empty() {
        return Err(CapstoneError::validation(
            "An evaluation needs at least one mark",
        ));
    }
    marks
        .into_iter()
        .enumerate()
        .map(|(index, mark)| validate_mark(index, mark))
        .collect::<Result<Vec<_>>>()
        .map(ValidatedMarks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_marks_are_trimmed() {
        let mut mark = MarkInput::new("  Code Quality ", 20.0, 18.0);
        mark.comments = Some("   ".to_string());
        let marks = validate_marks(vec![mark]).unwrap();
        assert_eq!(marks.as_slice()[0].criterion_name, "Code Quality");
        assert_eq!(marks.as_slice()[0].comments, None);
    }

    #[test]
    fn test_empty_mark_list_rejected() {
        let err = validate_marks(vec![]).unwrap_err();
        assert_eq!(err.code(), "E004");
    }

    #[test]
    fn test_negative_score_rejected() {
        let err = validate_marks(vec![MarkInput::new("Documentation", 20.0, -1.0)]).unwrap_err();
        assert!(err.message().contains("must not be negative"));
    }

    #[test]
    fn test_score_above_maximum_rejected() {
        let err = validate_marks(vec![
            MarkInput::new("Documentation", 20.0, 15.0),
            MarkInput::new("Functionality", 30.0, 31.0),
        ])
        .unwrap_err();
        assert!(err.message().contains("Functionality"));
        assert!(err.message().contains("exceeds maximum"));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(validate_marks(vec![MarkInput::new("Visual", f64::NAN, 1.0)]).is_err());
        assert!(validate_marks(vec![MarkInput::new("Visual", f64::INFINITY, 1.0)]).is_err());
    }

    #[test]
    fn test_zero_maximum_is_allowed() {
        let marks = validate_marks(vec![MarkInput::new("Attendance", 0.0, 0.0)]).unwrap();
        assert_eq!(marks.as_slice().len(), 1);
    }

    #[test]
    fn test_blank_criterion_rejected() {
        assert!(validate_marks(vec![MarkInput::new("   ", 10.0, 5.0)]).is_err());
    }

    #[test]
    fn test_links() {
        assert_eq!(validate_link("repository_url", None).unwrap(), None);
        assert_eq!(
            validate_link("repository_url", Some(" ".to_string())).unwrap(),
            None
        );
        assert_eq!(
            validate_link(
                "repository_url",
                Some("https://github.com/student/capstone".to_string())
            )
            .unwrap()
            .as_deref(),
            Some("https://github.com/student/capstone")
        );
        assert!(validate_link("repository_url", Some("ftp://host/repo".to_string())).is_err());
        assert!(validate_link("repository_url", Some("not a url".to_string())).is_err());
    }

    #[test]
    fn test_title() {
        assert_eq!(validate_title("  Smart Library  ").unwrap(), "Smart Library");
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).is_err());
    }
}
