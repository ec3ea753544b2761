/// Capabilities gated behind the privileged (reviewer/admin) flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Approve or reject pending submissions
    ReviewSubmissions,

    /// Write creations and edits straight into the catalog, skipping review
    PublishDirectly,

    /// See every submitter's pending items in the review queue
    ViewReviewQueue,
}

impl Capability {
    pub fn describe(&self) -> &'static str {
        match self {
            Capability::ReviewSubmissions => "review submissions",
            Capability::PublishDirectly => "publish directly",
            Capability::ViewReviewQueue => "view the review queue",
        }
    }
}
