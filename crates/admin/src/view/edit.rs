//! Single-selection surfaces: the inline edit row and the reply dialog.

use storedesk_core::MessageId;

/// Which entity (if any) is being edited, together with its draft.
///
/// At most one entity per list is in edit mode; there is no way to be
/// editing without a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState<I, D> {
    NotEditing,
    Editing { id: I, draft: D },
}

impl<I, D> Default for EditState<I, D> {
    fn default() -> Self {
        Self::NotEditing
    }
}

impl<I: Copy + Eq, D> EditState<I, D> {
    /// Id of the entity in edit mode.
    #[must_use]
    pub const fn editing_id(&self) -> Option<I> {
        match self {
            Self::NotEditing => None,
            Self::Editing { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub fn is_editing(&self, id: I) -> bool {
        self.editing_id() == Some(id)
    }

    /// Draft for `id`, if that entity is the one being edited.
    #[must_use]
    pub fn draft_for(&self, id: I) -> Option<&D> {
        match self {
            Self::Editing { id: current, draft } if *current == id => Some(draft),
            _ => None,
        }
    }
}

/// State of the reply surface on the messages page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplyState {
    #[default]
    Closed,
    Open { message_id: MessageId, draft: String },
}

impl ReplyState {
    /// Open for `message_id` with an empty draft.
    #[must_use]
    pub const fn open(message_id: MessageId) -> Self {
        Self::Open {
            message_id,
            draft: String::new(),
        }
    }

    #[must_use]
    pub const fn message_id(&self) -> Option<MessageId> {
        match self {
            Self::Closed => None,
            Self::Open { message_id, .. } => Some(*message_id),
        }
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        match self {
            Self::Closed => "",
            Self::Open { draft, .. } => draft,
        }
    }
}
