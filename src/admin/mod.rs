//! Admin CRUD screens as headless controllers.
//!
//! A screen loads its list, gates actions on permissions, edits through a
//! modal form, confirms deletes and deletes in bulk. Each mutation is
//! followed by a reload rather than a local patch of the list.

mod permissions;
mod resources;
mod state;

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use log::{debug, error, info};
use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::types::{BulkDeleteResult, Id};

pub use permissions::*;
pub use state::*;

/// A backend collection an admin screen manages
#[async_trait]
pub trait ManagedResource: Send + Sync {
    type Item: Clone + Send + Sync + 'static;
    type Form: Clone + Default + Send + Sync + 'static;
    type Query: Clone + Default + Send + Sync + 'static;

    /// Singular noun used in messages, e.g. "driver"
    fn label(&self) -> &'static str;

    fn permissions(&self) -> ResourcePermissions;

    fn id(item: &Self::Item) -> Id;

    /// Pre-fill the edit form
    fn form_for(item: &Self::Item) -> Self::Form;

    /// Required-field checks run before submitting
    fn validate(form: &Self::Form, mode: ModalMode) -> Result<()>;

    async fn list(&self, query: &Self::Query) -> Result<Vec<Self::Item>>;
    async fn create(&self, form: &Self::Form) -> Result<Self::Item>;
    async fn update(&self, id: Id, form: &Self::Form) -> Result<Self::Item>;
    async fn delete(&self, id: Id) -> Result<()>;
    async fn bulk_delete(&self, ids: &[Id]) -> Result<BulkDeleteResult>;
}

/// State published by a `ResourceScreen<R>`
pub type StateOf<R> = ScreenState<
    <R as ManagedResource>::Item,
    <R as ManagedResource>::Form,
    <R as ManagedResource>::Query,
>;

/// Controller for one admin CRUD screen
pub struct ResourceScreen<R: ManagedResource> {
    resource: R,
    state: watch::Sender<StateOf<R>>,
    generation: AtomicU64,
}

impl<R: ManagedResource> ResourceScreen<R> {
    pub fn new(resource: R) -> Self {
        let (state, _) = watch::channel(ScreenState::default());
        Self {
            resource,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn snapshot(&self) -> StateOf<R> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StateOf<R>> {
        self.state.subscribe()
    }

    /// Actions to render for a user. Anything missing is hidden, not disabled.
    pub fn visible_actions(&self, permissions: &Permissions) -> Vec<Action> {
        let keys = self.resource.permissions();
        if !permissions.has(keys.view) {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if permissions.has(keys.create) {
            actions.push(Action::Create);
        }
        if permissions.has(keys.edit) {
            actions.push(Action::Edit);
        }
        if permissions.has(keys.delete) {
            actions.push(Action::Delete);
            actions.push(Action::BulkDelete);
        }
        actions
    }

    /// Fetch the list. A response overtaken by a newer load is discarded.
    pub async fn load(&self) -> Result<()> {
        let label = self.resource.label();
        let mut generation = 0;
        let mut query = R::Query::default();
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.list = ListState::Loading;
            query = state.query.clone();
        });

        let result = self.resource.list(&query).await;
        let failure = result
            .as_ref()
            .err()
            .map(|e| e.user_message(&format!("Failed to load {}s", label)));

        // Checked under the state lock so a newer load cannot slip in between
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match (&result, failure) {
                (Ok(items), _) => {
                    let ids: Vec<Id> = items.iter().map(R::id).collect();
                    state.selected.retain(|id| ids.contains(id));
                    state.list = if items.is_empty() {
                        ListState::Empty
                    } else {
                        ListState::Loaded(items.clone())
                    };
                }
                (Err(_), message) => {
                    state.list = ListState::Failed(message.unwrap_or_default());
                }
            }
            true
        });

        if !applied {
            debug!("Dropping stale {} list (generation {})", label, generation);
            return Ok(());
        }

        result.map(|_| ()).map_err(|e| {
            error!("Loading {}s failed: {}", label, e);
            e
        })
    }

    // List failures are already reflected in `ListState::Failed`.
    async fn reload(&self) {
        let _ = self.load().await;
    }

    /// Change the list filters and reload
    pub async fn set_query<F>(&self, change: F) -> Result<()>
    where
        F: FnOnce(&mut R::Query),
    {
        self.state.send_modify(|state| change(&mut state.query));
        self.load().await
    }

    pub fn find(&self, id: Id) -> Option<R::Item> {
        self.state
            .borrow()
            .list
            .items()
            .iter()
            .find(|item| R::id(item) == id)
            .cloned()
    }

    /// Open a blank form
    pub fn open_add(&self) {
        self.state.send_modify(|state| {
            state.modal = ModalState::Open {
                mode: ModalMode::Add,
                form: R::Form::default(),
                status: ModalStatus::Editing,
            };
        });
    }

    /// Open the form pre-filled from a listed row
    pub fn open_edit(&self, id: Id) -> Result<()> {
        let item = self
            .find(id)
            .ok_or_else(|| Error::validation(format!("The {} is no longer listed", self.resource.label())))?;
        let form = R::form_for(&item);
        self.state.send_modify(|state| {
            state.modal = ModalState::Open {
                mode: ModalMode::Edit(id),
                form,
                status: ModalStatus::Editing,
            };
        });
        Ok(())
    }

    /// Edit the open form; clears a previous error
    pub fn update_form<F>(&self, change: F)
    where
        F: FnOnce(&mut R::Form),
    {
        self.state.send_if_modified(|state| match &mut state.modal {
            ModalState::Open { form, status, .. } if *status != ModalStatus::Submitting => {
                change(form);
                *status = ModalStatus::Editing;
                true
            }
            _ => false,
        });
    }

    pub fn close_modal(&self) {
        self.state.send_modify(|state| state.modal = ModalState::Closed);
    }

    /// Validate and save the open form.
    ///
    /// On success the modal closes and the list reloads. On failure the
    /// modal stays open with the message so nothing has to be re-entered.
    pub async fn submit(&self) -> Result<R::Item> {
        let mut pending = None;
        self.state.send_if_modified(|state| match &mut state.modal {
            ModalState::Open { mode, form, status } if *status != ModalStatus::Submitting => {
                let checked = R::validate(form, *mode);
                *status = match &checked {
                    Ok(()) => ModalStatus::Submitting,
                    Err(e) => ModalStatus::Error(e.user_message(REQUIRED_FIELDS)),
                };
                pending = Some((*mode, form.clone(), checked));
                true
            }
            _ => false,
        });

        let (mode, form, checked) = pending.ok_or_else(|| Error::validation("Nothing to submit"))?;
        checked?;

        let result = match mode {
            ModalMode::Add => self.resource.create(&form).await,
            ModalMode::Edit(id) => self.resource.update(id, &form).await,
        };

        match result {
            Ok(item) => {
                info!("Saved {} {}", self.resource.label(), R::id(&item));
                self.close_modal();
                self.reload().await;
                Ok(item)
            }
            Err(e) => {
                error!("Saving {} failed: {}", self.resource.label(), e);
                let message = e.user_message(&format!("Failed to save {}", self.resource.label()));
                self.state.send_modify(|state| {
                    if let ModalState::Open { status, .. } = &mut state.modal {
                        *status = ModalStatus::Error(message);
                    }
                });
                Err(e)
            }
        }
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&self, id: Id) {
        self.state.send_modify(|state| state.pending_delete = Some(id));
    }

    pub fn cancel_delete(&self) {
        self.state.send_modify(|state| state.pending_delete = None);
    }

    /// Delete the row awaiting confirmation
    pub async fn confirm_delete(&self) -> Result<()> {
        let id = self
            .state
            .borrow()
            .pending_delete
            .ok_or_else(|| Error::validation("Nothing to delete"))?;

        self.resource.delete(id).await.map_err(|e| {
            error!("Deleting {} {} failed: {}", self.resource.label(), id, e);
            e
        })?;

        self.state.send_modify(|state| {
            state.pending_delete = None;
            state.selected.remove(&id);
        });
        info!("Deleted {} {}", self.resource.label(), id);
        self.reload().await;
        Ok(())
    }

    /// Tick or untick a row; returns whether it is now ticked
    pub fn toggle_selected(&self, id: Id) -> bool {
        let mut ticked = false;
        self.state.send_modify(|state| {
            ticked = state.selected.insert(id);
            if !ticked {
                state.selected.remove(&id);
            }
        });
        ticked
    }

    pub fn select_all(&self) {
        self.state.send_modify(|state| {
            state.selected = state.list.items().iter().map(R::id).collect();
        });
    }

    pub fn clear_selection(&self) {
        self.state.send_modify(|state| state.selected.clear());
    }

    pub fn selected_ids(&self) -> Vec<Id> {
        self.state.borrow().selected.iter().copied().collect()
    }

    /// Delete every ticked row with one `{ids}` call. Rows the server
    /// refused stay ticked.
    pub async fn bulk_delete(&self) -> Result<BulkDeleteResult> {
        let ids = self.selected_ids();
        if ids.is_empty() {
            return Err(Error::validation(format!("No {}s selected", self.resource.label())));
        }

        let result = self.resource.bulk_delete(&ids).await.map_err(|e| {
            error!("Bulk delete of {} {}s failed: {}", ids.len(), self.resource.label(), e);
            e
        })?;

        self.state.send_modify(|state| {
            state
                .selected
                .retain(|id| result.failed.iter().any(|failure| failure.id == *id));
        });
        if !result.is_complete() {
            error!(
                "{} of {} {}s could not be deleted",
                result.failed.len(),
                ids.len(),
                self.resource.label()
            );
        }
        self.reload().await;
        Ok(result)
    }
}

pub const REQUIRED_FIELDS: &str = "Please fill in all required fields";

pub(crate) fn require<S: AsRef<str>>(fields: &[S]) -> Result<()> {
    if fields.iter().any(|f| f.as_ref().trim().is_empty()) {
        Err(Error::validation(REQUIRED_FIELDS))
    } else {
        Ok(())
    }
}
