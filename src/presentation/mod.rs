pub mod form;
pub mod notify;
pub mod state;
pub mod view;

pub use form::{FormInput, FormMode, FormProps, FormState};
pub use notify::{Level, Notification, Notifications};
pub use state::{Activity, Rejection, ViewState};
pub use view::{SortConfig, SortDirection, SortKey};

use crate::error::ServiceError;
use crate::models::{User, UserId};
use crate::service::UserService;

/// Store work started by a [`ViewState`] transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Load,
    Register { name: String, email: String },
    Edit { id: UserId, name: String, email: String },
    Remove { id: UserId },
}

/// Result of a [`Pending`] operation, fed back to [`ViewState::complete`]
#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<Vec<User>, ServiceError>),
    Registered(Result<User, ServiceError>),
    Edited(Result<User, ServiceError>),
    Removed {
        id: UserId,
        result: Result<(), ServiceError>,
    },
}

/// Run a pending operation against the service
pub async fn execute(service: &UserService, pending: Pending) -> Outcome {
    match pending {
        Pending::Load => Outcome::Loaded(service.list_users().await),
        Pending::Register { name, email } => {
            Outcome::Registered(service.register_user(&name, &email).await)
        }
        Pending::Edit { id, name, email } => {
            Outcome::Edited(service.edit_user(id, &name, &email).await)
        }
        Pending::Remove { id } => Outcome::Removed {
            id,
            result: service.remove_user(id).await,
        },
    }
}
