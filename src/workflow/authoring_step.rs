use std::fmt;

/// 编辑流程步骤，按顺序推进
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AuthoringStep {
    Title,
    Paragraph,
    Actions,
    Metadata,
    Review,
    Submitted,
}

impl AuthoringStep {
    pub const ALL: [AuthoringStep; 6] = [
        AuthoringStep::Title,
        AuthoringStep::Paragraph,
        AuthoringStep::Actions,
        AuthoringStep::Metadata,
        AuthoringStep::Review,
        AuthoringStep::Submitted,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            AuthoringStep::Title => Some(AuthoringStep::Paragraph),
            AuthoringStep::Paragraph => Some(AuthoringStep::Actions),
            AuthoringStep::Actions => Some(AuthoringStep::Metadata),
            AuthoringStep::Metadata => Some(AuthoringStep::Review),
            AuthoringStep::Review => Some(AuthoringStep::Submitted),
            AuthoringStep::Submitted => None,
        }
    }

    pub fn previous(self) -> Option<Self> {
        match self {
            AuthoringStep::Title | AuthoringStep::Submitted => None,
            AuthoringStep::Paragraph => Some(AuthoringStep::Title),
            AuthoringStep::Actions => Some(AuthoringStep::Paragraph),
            AuthoringStep::Metadata => Some(AuthoringStep::Actions),
            AuthoringStep::Review => Some(AuthoringStep::Metadata),
        }
    }

    /// 从 1 开始的步骤序号，用于界面上的“第 N 步”
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            AuthoringStep::Title => "Title",
            AuthoringStep::Paragraph => "Paragraph",
            AuthoringStep::Actions => "Actions",
            AuthoringStep::Metadata => "Metadata",
            AuthoringStep::Review => "Review",
            AuthoringStep::Submitted => "Submitted",
        }
    }
}

impl fmt::Display for AuthoringStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
