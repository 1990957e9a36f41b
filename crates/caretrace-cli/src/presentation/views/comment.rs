use std::fmt;

use crate::presentation::view_models::{
    CommentAddedViewModel, CommentListViewModel, CreateView, ViewMode,
};

impl CreateView for CommentListViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(CommentListView { data: self })
    }
}

struct CommentListView<'a> {
    data: &'a CommentListViewModel,
}

impl<'a> fmt::Display for CommentListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.comments.is_empty() {
            return writeln!(f, "No data");
        }

        writeln!(f, "{:<6} {:<9} COMMENT", "USER", "LEVEL")?;
        for entry in &self.data.comments {
            writeln!(
                f,
                "{:<6} {:<9} {}",
                entry.user_id,
                entry.level.as_deref().unwrap_or("-"),
                entry.comment.as_deref().unwrap_or("-")
            )?;
        }
        Ok(())
    }
}

impl CreateView for CommentAddedViewModel {
    fn create_view<'a>(&'a self, _mode: ViewMode) -> Box<dyn fmt::Display + 'a> {
        Box::new(CommentAddedView { data: self })
    }
}

struct CommentAddedView<'a> {
    data: &'a CommentAddedViewModel,
}

impl<'a> fmt::Display for CommentAddedView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User:    {}", self.data.user_id)?;
        writeln!(f, "Level:   {}", self.data.level)?;
        writeln!(f, "Comment: {}", self.data.comment)
    }
}
