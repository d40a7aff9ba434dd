//! Collaborator wiring for the user service.

use std::sync::Arc;

use gatehouse_users::{Clock, InMemoryUserStore, RegisterUserService, SystemClock, UserStore};

/// Shared service container handed to handlers via `Extension`.
pub struct AppServices {
    pub register_user: RegisterUserService,
}

/// Wire the default collaborators: in-memory store, system clock.
pub fn build_services() -> AppServices {
    let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    AppServices {
        register_user: RegisterUserService::new(store, clock),
    }
}
