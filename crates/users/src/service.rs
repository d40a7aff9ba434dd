//! User registration operation.

use std::sync::Arc;

use tracing::info;

use gatehouse_core::{ServiceError, ServiceResult};

use crate::clock::Clock;
use crate::register::RegisterUserRequest;
use crate::store::{StoreError, UserStore};
use crate::user::{Gender, User, UserId};

/// Registers new users behind the duplicate-name check.
///
/// Collaborators are injected at construction; the service itself holds no
/// per-request state and can be shared across workers.
pub struct RegisterUserService {
    store: Arc<dyn UserStore>,
    clock: Arc<dyn Clock>,
}

impl RegisterUserService {
    pub fn new(store: Arc<dyn UserStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Validate, check the uniqueness precondition, and persist a new user.
    ///
    /// The pre-check keeps the common duplicate path cheap; the store's own
    /// constraint decides races, and a constraint violation during save is
    /// reported as the same duplicate conflict.
    pub fn register(&self, request: RegisterUserRequest) -> ServiceResult<User> {
        request.validate()?;

        // Validation guarantees presence of full name and a well-formed gender code.
        let full_name = request
            .full_name
            .ok_or_else(|| ServiceError::unexpected("validated request lost its full name"))?;
        let gender = request
            .gender
            .as_deref()
            .and_then(Gender::from_code)
            .ok_or_else(|| ServiceError::unexpected("validated request lost its gender code"))?;

        if self.is_existing_user(&full_name)? {
            return Err(ServiceError::AlreadyRegistered);
        }

        let user = User {
            id: UserId::new(),
            full_name,
            phone_number: request.phone_number,
            gender,
            create_date: self.clock.now(),
        };

        let saved = self.store.save(user).map_err(store_failure)?;
        info!(user_id = %saved.id, "registered user");
        Ok(saved)
    }

    /// Whether a user with this full name is already registered.
    pub fn is_existing_user(&self, full_name: &str) -> ServiceResult<bool> {
        let existing = self
            .store
            .find_by_full_name(full_name)
            .map_err(store_failure)?;
        Ok(existing.is_some())
    }
}

fn store_failure(failure: StoreError) -> ServiceError {
    match failure {
        // The constraint fired during save: another writer won the race, so
        // the caller sees the same duplicate conflict as the pre-check path.
        StoreError::DuplicateName => ServiceError::AlreadyRegistered,
        StoreError::Unavailable(detail) => ServiceError::data_integrity(detail),
    }
}
