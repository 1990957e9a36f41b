use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CommentListViewModel {
    pub comments: Vec<CommentEntry>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentEntry {
    pub user_id: i64,
    pub level: Option<String>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentAddedViewModel {
    pub user_id: i64,
    pub level: String,
    pub comment: String,
}
