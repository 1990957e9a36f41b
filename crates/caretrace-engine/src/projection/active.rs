use caretrace_types::{StagePath, StepNode, StepStatus};

/// Demote every top-level `process` stage after the first one to `wait`.
///
/// Children keep their own derived status.
pub(super) fn enforce_single_active(stages: &mut [StepNode]) {
    let mut seen_active = false;
    for stage in stages.iter_mut() {
        if stage.status != StepStatus::Process {
            continue;
        }
        if seen_active {
            stage.status = StepStatus::Wait;
        }
        seen_active = true;
    }
}

/// First `process` node in pre-order, else the last top-level stage.
pub(super) fn active_path(stages: &[StepNode]) -> Option<StagePath> {
    first_in_process(stages, &mut Vec::new())
        .or_else(|| stages.len().checked_sub(1).map(StagePath::top))
}

fn first_in_process(nodes: &[StepNode], prefix: &mut Vec<usize>) -> Option<StagePath> {
    for (index, node) in nodes.iter().enumerate() {
        prefix.push(index);
        if node.status == StepStatus::Process {
            return Some(StagePath(prefix.clone()));
        }
        if let Some(path) = first_in_process(&node.children, prefix) {
            return Some(path);
        }
        prefix.pop();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(status: StepStatus) -> StepNode {
        StepNode::new("stage", "stage", status)
    }

    #[test]
    fn test_later_process_stages_demoted() {
        let mut stages = vec![
            node(StepStatus::Finish),
            node(StepStatus::Process),
            node(StepStatus::Process).with_children(vec![node(StepStatus::Process)]),
        ];

        enforce_single_active(&mut stages);

        assert_eq!(stages[1].status, StepStatus::Process);
        assert_eq!(stages[2].status, StepStatus::Wait);
        assert_eq!(stages[2].children[0].status, StepStatus::Process);
    }

    #[test]
    fn test_active_path_is_preorder() {
        let stages = vec![
            node(StepStatus::Finish).with_children(vec![
                node(StepStatus::Finish),
                node(StepStatus::Wait).with_children(vec![node(StepStatus::Process)]),
            ]),
            node(StepStatus::Process),
        ];

        assert_eq!(active_path(&stages), Some(StagePath(vec![0, 1, 0])));
    }

    #[test]
    fn test_active_path_falls_back_to_last_stage() {
        let stages = vec![node(StepStatus::Finish), node(StepStatus::Wait)];
        assert_eq!(active_path(&stages), Some(StagePath::top(1)));
        assert_eq!(active_path(&[]), None);
    }
}
