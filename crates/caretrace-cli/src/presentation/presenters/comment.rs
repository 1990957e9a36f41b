use crate::presentation::view_models::{
    CommandResultViewModel, CommentAddedViewModel, CommentEntry, CommentListViewModel, Guidance,
    StatusBadge,
};
use caretrace_types::{DoctorComment, NewDoctorComment};

pub fn present_comment_list(
    comments: &[DoctorComment],
) -> CommandResultViewModel<CommentListViewModel> {
    let entries: Vec<CommentEntry> = comments
        .iter()
        .map(|comment| CommentEntry {
            user_id: comment.user_id,
            level: comment.level.clone(),
            comment: comment.comment.clone(),
        })
        .collect();

    let total = entries.len();
    let result = CommandResultViewModel::new(CommentListViewModel {
        comments: entries,
        total,
    });

    if total == 0 {
        result
            .with_badge(StatusBadge::info("No doctor comments yet"))
            .with_suggestion(
                Guidance::new("See which patients can be annotated")
                    .with_command("caretrace patients"),
            )
    } else {
        result.with_badge(StatusBadge::success(format!("{} comment(s)", total)))
    }
}

pub fn present_comment_list_unavailable(
    error: &str,
) -> CommandResultViewModel<CommentListViewModel> {
    CommandResultViewModel::new(CommentListViewModel {
        comments: Vec::new(),
        total: 0,
    })
    .with_badge(StatusBadge::warning(format!("Comments unavailable: {}", error)))
}

pub fn present_comment_added(
    body: &NewDoctorComment,
) -> CommandResultViewModel<CommentAddedViewModel> {
    CommandResultViewModel::new(CommentAddedViewModel {
        user_id: body.user_id,
        level: body.level.clone(),
        comment: body.comment.clone(),
    })
    .with_badge(StatusBadge::success(format!(
        "Comment saved for patient {}",
        body.user_id
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::StatusLevel;

    #[test]
    fn test_comment_list_badges() {
        let empty = present_comment_list(&[]);
        assert_eq!(empty.badge.unwrap().level, StatusLevel::Info);
        assert_eq!(empty.suggestions.len(), 1);

        let listed = present_comment_list(&[DoctorComment {
            user_id: 3,
            level: Some("Severe".to_string()),
            comment: Some("Refer".to_string()),
        }]);
        assert_eq!(listed.badge.unwrap().label, "1 comment(s)");
        assert_eq!(listed.content.comments[0].user_id, 3);
    }

    #[test]
    fn test_comment_added_json() {
        let result = present_comment_added(&NewDoctorComment {
            user_id: 3,
            comment: "Weekly check-in".to_string(),
            level: "Moderate".to_string(),
        });

        insta::assert_json_snapshot!(result, @r###"
        {
          "badge": {
            "level": "success",
            "label": "Comment saved for patient 3"
          },
          "content": {
            "user_id": 3,
            "level": "Moderate",
            "comment": "Weekly check-in"
          }
        }
        "###);
    }
}
