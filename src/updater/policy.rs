//! Per-field notification policy.

/// Fields the updater knows how to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Assignee,
    Severity,
    ManualSeverity,
    Resolution,
    Status,
    Attribute,
    ActionPlan,
    Author,
    EffortToFix,
    TechnicalDebt,
    Line,
    Message,
}

pub const ASSIGNEE: &str = "assignee";
pub const SEVERITY: &str = "severity";
pub const RESOLUTION: &str = "resolution";
pub const STATUS: &str = "status";
pub const ACTION_PLAN: &str = "actionPlan";
pub const AUTHOR: &str = "author";
pub const TECHNICAL_DEBT: &str = "technicalDebt";
pub const EFFORT_TO_FIX: &str = "effortToFix";
pub const LINE: &str = "line";
pub const MESSAGE: &str = "message";

impl Field {
    /// Key diffs for this field are recorded under.
    ///
    /// Ad-hoc attributes are keyed by their own name, so they have none.
    pub const fn diff_key(self) -> Option<&'static str> {
        match self {
            Self::Assignee => Some(ASSIGNEE),
            Self::Severity | Self::ManualSeverity => Some(SEVERITY),
            Self::Resolution => Some(RESOLUTION),
            Self::Status => Some(STATUS),
            Self::ActionPlan => Some(ACTION_PLAN),
            Self::Author => Some(AUTHOR),
            Self::TechnicalDebt => Some(TECHNICAL_DEBT),
            Self::EffortToFix => Some(EFFORT_TO_FIX),
            Self::Line => Some(LINE),
            Self::Message => Some(MESSAGE),
            Self::Attribute => None,
        }
    }
}

/// Whether a change to each field must notify users.
pub const NOTIFICATION_POLICY: [(Field, bool); 12] = [
    (Field::Assignee, true),
    (Field::Severity, false),
    (Field::ManualSeverity, true),
    (Field::Resolution, true),
    (Field::Status, true),
    (Field::Attribute, false),
    (Field::ActionPlan, true),
    (Field::Author, false),
    (Field::EffortToFix, false),
    (Field::TechnicalDebt, false),
    (Field::Line, false),
    (Field::Message, false),
];

/// Look up `field` in [`NOTIFICATION_POLICY`].
pub fn must_notify(field: Field) -> bool {
    NOTIFICATION_POLICY
        .iter()
        .find(|(f, _)| *f == field)
        .is_some_and(|(_, notify)| *notify)
}
