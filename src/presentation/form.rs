use serde::{Deserialize, Serialize};

use crate::constants::{LABEL_REGISTER, LABEL_SAVE, LABEL_UPDATE};
use crate::models::{User, UserId};
use crate::validation::ValidationErrors;

/// Values posted by the user form
///
/// A disabled input is not submitted by the browser, so `email` may be
/// missing in edit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Create,
    Edit(UserId),
}

/// How a form is opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormProps {
    pub mode: FormMode,
    pub submit_label: String,
    /// Seed values, empty by default
    pub initial: FormInput,
    pub email_editable: bool,
}

impl Default for FormProps {
    fn default() -> Self {
        Self {
            mode: FormMode::Create,
            submit_label: LABEL_SAVE.to_string(),
            initial: FormInput::default(),
            email_editable: true,
        }
    }
}

impl FormProps {
    pub fn create() -> Self {
        Self {
            submit_label: LABEL_REGISTER.to_string(),
            ..Self::default()
        }
    }

    /// Edit form seeded from a record; its email cannot be changed here
    pub fn edit(user: &User) -> Self {
        Self {
            mode: FormMode::Edit(user.id),
            submit_label: LABEL_UPDATE.to_string(),
            initial: FormInput {
                name: user.name.clone(),
                email: user.email.clone(),
            },
            email_editable: false,
        }
    }
}

/// An open form: its props, the current values and the last field errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub props: FormProps,
    pub values: FormInput,
    pub errors: ValidationErrors,
}

impl FormState {
    pub fn open(props: FormProps) -> Self {
        Self {
            values: props.initial.clone(),
            props,
            errors: ValidationErrors::default(),
        }
    }

    /// Back to the seed values with no errors
    pub fn reset(&mut self) {
        self.values = self.props.initial.clone();
        self.errors = ValidationErrors::default();
    }

    /// The values to submit, with the seeded email when it is locked
    pub fn effective_input(&self, submitted: FormInput) -> FormInput {
        if self.props.email_editable {
            submitted
        } else {
            FormInput {
                name: submitted.name,
                email: self.props.initial.email.clone(),
            }
        }
    }
}
