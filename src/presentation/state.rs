//! View state container and its transitions.
//!
//! Every change to what the page shows goes through a method here. Methods
//! that start store work return a [`Pending`] and leave the state `Loading`
//! until the matching [`Outcome`] is passed to [`ViewState::complete`].

use chrono::{DateTime, Duration, Utc};

use crate::constants::{
    MSG_BUSY, MSG_EMAIL_BELONGS_TO_OTHER, MSG_EMAIL_REGISTERED, MSG_LOAD_FAILED, MSG_REGISTERED,
    MSG_REGISTER_FAILED, MSG_REMOVED, MSG_REMOVE_FAILED, MSG_UPDATED, MSG_UPDATE_FAILED,
};
use crate::error::ServiceError;
use crate::models::{User, UserId};
use crate::presentation::form::{FormInput, FormMode, FormProps, FormState};
use crate::presentation::notify::{Level, Notifications};
use crate::presentation::view::{visible_users, SortConfig, SortKey};
use crate::presentation::{Outcome, Pending};
use crate::validation::{validate_user_form, ValidationErrors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Activity {
    #[default]
    Idle,
    Loading,
}

/// Why a transition did not start any work
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Another operation is pending
    Busy,
    /// No form is open
    FormClosed,
    /// No delete is awaiting confirmation
    NothingToConfirm,
    /// No record with this id in the list
    UnknownUser(UserId),
    Invalid(ValidationErrors),
}

#[derive(Debug)]
pub struct ViewState {
    users: Vec<User>,
    activity: Activity,
    form: Option<FormState>,
    confirming_delete: Option<UserId>,
    search: String,
    sort: SortConfig,
    notifications: Notifications,
}

impl ViewState {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            users: Vec::new(),
            activity: Activity::Idle,
            form: None,
            confirming_delete: None,
            search: String::new(),
            sort: SortConfig::default(),
            notifications: Notifications::new(notification_ttl),
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn is_loading(&self) -> bool {
        self.activity == Activity::Loading
    }

    pub fn form(&self) -> Option<&FormState> {
        self.form.as_ref()
    }

    pub fn confirming_delete(&self) -> Option<UserId> {
        self.confirming_delete
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// The list as displayed: filtered by the search term, then sorted
    pub fn visible_users(&self) -> Vec<&User> {
        visible_users(&self.users, &self.search, self.sort)
    }

    fn begin(&mut self, pending: Pending) -> Result<Pending, Rejection> {
        self.notifications.prune(Utc::now());
        if self.is_loading() {
            tracing::debug!("Rejected {:?}: operation in progress", pending);
            self.notifications.push(Level::Error, MSG_BUSY);
            return Err(Rejection::Busy);
        }
        self.activity = Activity::Loading;
        Ok(pending)
    }

    fn ensure_idle(&mut self) -> Result<(), Rejection> {
        if self.is_loading() {
            self.notifications.push(Level::Error, MSG_BUSY);
            return Err(Rejection::Busy);
        }
        Ok(())
    }

    pub fn begin_load(&mut self) -> Result<Pending, Rejection> {
        self.begin(Pending::Load)
    }

    pub fn open_create_form(&mut self) -> Result<(), Rejection> {
        self.ensure_idle()?;
        self.form = Some(FormState::open(FormProps::create()));
        Ok(())
    }

    pub fn open_edit_form(&mut self, id: UserId) -> Result<(), Rejection> {
        self.ensure_idle()?;
        let user = self
            .users
            .iter()
            .find(|u| u.id == id)
            .ok_or(Rejection::UnknownUser(id))?;
        self.form = Some(FormState::open(FormProps::edit(user)));
        Ok(())
    }

    /// Drop the open form with its values and errors
    pub fn close_form(&mut self) -> Result<(), Rejection> {
        self.ensure_idle()?;
        self.form = None;
        Ok(())
    }

    /// Validate the submitted values and start the create or edit
    ///
    /// Field errors stay on the form and nothing reaches the service.
    pub fn begin_submit(&mut self, submitted: FormInput) -> Result<Pending, Rejection> {
        self.ensure_idle()?;
        let form = self.form.as_mut().ok_or(Rejection::FormClosed)?;

        let input = form.effective_input(submitted);
        form.values = input.clone();
        if let Err(errors) = validate_user_form(&input.name, &input.email) {
            form.errors = errors.clone();
            return Err(Rejection::Invalid(errors));
        }
        form.errors = ValidationErrors::default();

        let pending = match form.props.mode {
            FormMode::Create => Pending::Register {
                name: input.name,
                email: input.email,
            },
            FormMode::Edit(id) => Pending::Edit {
                id,
                name: input.name,
                email: input.email,
            },
        };
        self.begin(pending)
    }

    pub fn request_delete(&mut self, id: UserId) -> Result<(), Rejection> {
        self.ensure_idle()?;
        if !self.users.iter().any(|u| u.id == id) {
            return Err(Rejection::UnknownUser(id));
        }
        self.confirming_delete = Some(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) -> Result<(), Rejection> {
        self.ensure_idle()?;
        self.confirming_delete = None;
        Ok(())
    }

    /// Close the confirmation dialog and start the removal
    pub fn begin_delete(&mut self) -> Result<Pending, Rejection> {
        let id = self.confirming_delete.ok_or(Rejection::NothingToConfirm)?;
        let pending = self.begin(Pending::Remove { id })?;
        self.confirming_delete = None;
        Ok(pending)
    }

    pub fn set_search(&mut self, term: impl Into<String>) -> Result<(), Rejection> {
        self.ensure_idle()?;
        self.search = term.into();
        Ok(())
    }

    /// Flip the direction and sort by name, as the toolbar button does
    pub fn toggle_sort(&mut self) {
        self.sort = SortConfig {
            key: SortKey::Name,
            direction: self.sort.direction.reversed(),
        };
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
    }

    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn prune_notifications(&mut self, now: DateTime<Utc>) {
        self.notifications.prune(now);
    }

    /// Apply the result of a pending operation and return to `Idle`
    ///
    /// The record list only changes on success.
    pub fn complete(&mut self, outcome: Outcome) {
        self.activity = Activity::Idle;
        self.notifications.prune(Utc::now());

        match outcome {
            Outcome::Loaded(Ok(users)) => {
                tracing::info!("Loaded {} users", users.len());
                self.users = users;
            }
            Outcome::Loaded(Err(e)) => {
                tracing::error!("Failed to load users: {}", e);
                self.notifications.push(Level::Error, MSG_LOAD_FAILED);
            }
            Outcome::Registered(Ok(user)) => {
                self.users.push(user);
                if let Some(form) = self.form.as_mut() {
                    if form.props.mode == FormMode::Create {
                        form.reset();
                    }
                }
                self.notifications.push(Level::Success, MSG_REGISTERED);
            }
            Outcome::Registered(Err(e)) => {
                tracing::error!("Failed to register user: {}", e);
                let message = match e {
                    ServiceError::EmailTaken => MSG_EMAIL_REGISTERED,
                    _ => MSG_REGISTER_FAILED,
                };
                self.notifications.push(Level::Error, message);
            }
            Outcome::Edited(Ok(user)) => {
                if let Some(form) = self.form.as_mut() {
                    if form.props.mode == FormMode::Edit(user.id) {
                        *form = FormState::open(FormProps::edit(&user));
                    }
                }
                if let Some(slot) = self.users.iter_mut().find(|u| u.id == user.id) {
                    *slot = user;
                }
                self.notifications.push(Level::Success, MSG_UPDATED);
            }
            Outcome::Edited(Err(e)) => {
                tracing::error!("Failed to update user: {}", e);
                let message = match e {
                    ServiceError::EmailTaken => MSG_EMAIL_BELONGS_TO_OTHER,
                    _ => MSG_UPDATE_FAILED,
                };
                self.notifications.push(Level::Error, message);
            }
            Outcome::Removed { id, result: Ok(()) } => {
                self.users.retain(|u| u.id != id);
                if self
                    .form
                    .as_ref()
                    .is_some_and(|form| form.props.mode == FormMode::Edit(id))
                {
                    self.form = None;
                }
                self.notifications.push(Level::Success, MSG_REMOVED);
            }
            Outcome::Removed { id, result: Err(e) } => {
                tracing::error!("Failed to remove user {}: {}", id, e);
                self.notifications.push(Level::Error, MSG_REMOVE_FAILED);
            }
        }
    }
}
