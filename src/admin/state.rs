//! States rendered by an admin CRUD screen

use std::collections::BTreeSet;

use crate::types::Id;

/// The list area of a screen
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ListState<T> {
    #[default]
    Loading,
    Empty,
    Loaded(Vec<T>),
    Failed(String),
}

impl<T> ListState<T> {
    pub fn items(&self) -> &[T] {
        match self {
            ListState::Loaded(items) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Add,
    Edit(Id),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalStatus {
    Editing,
    Submitting,
    Error(String),
}

/// The add/edit dialog
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState<F> {
    #[default]
    Closed,
    Open {
        mode: ModalMode,
        form: F,
        status: ModalStatus,
    },
}

impl<F> ModalState<F> {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open { .. })
    }

    pub fn form(&self) -> Option<&F> {
        match self {
            ModalState::Open { form, .. } => Some(form),
            ModalState::Closed => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModalState::Open {
                status: ModalStatus::Error(message),
                ..
            } => Some(message),
            _ => None,
        }
    }
}

/// Actions a screen can offer; only permitted ones are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Edit,
    Delete,
    BulkDelete,
}

/// Everything one CRUD screen renders from
#[derive(Debug, Clone)]
pub struct ScreenState<T, F, Q> {
    pub list: ListState<T>,
    pub modal: ModalState<F>,
    /// Row waiting for delete confirmation
    pub pending_delete: Option<Id>,
    /// Rows ticked for bulk actions
    pub selected: BTreeSet<Id>,
    pub query: Q,
}

impl<T, F, Q: Default> Default for ScreenState<T, F, Q> {
    fn default() -> Self {
        Self {
            list: ListState::Loading,
            modal: ModalState::Closed,
            pending_delete: None,
            selected: BTreeSet::new(),
            query: Q::default(),
        }
    }
}
