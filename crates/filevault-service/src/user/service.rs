//! User registration, authentication, and guarded role/block changes.

use std::sync::Arc;

use tracing::{debug, info};

use filevault_auth::escalation::{self, ChangeRequest, PriorBenefactors};
use filevault_core::error::AppError;
use filevault_core::types::{PageRequest, PageResponse};
use filevault_database::store::{AccountStore, HistoryLedger, RoleStore, Stores, UserStore};
use filevault_entity::history::ChangeRoleHistory;
use filevault_entity::user::{Role, User, UserRole, UserView};

use crate::context::RequestContext;

/// Handles user accounts and the role/block change use case.
#[derive(Clone)]
pub struct UserService {
    /// User lookup and registration.
    users: Arc<dyn UserStore>,
    /// Seeded role rows.
    roles: Arc<dyn RoleStore>,
    /// Change-history reads.
    history: Arc<dyn HistoryLedger>,
    /// Transactions over users and the change-history ledger.
    accounts: Arc<dyn AccountStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        history: Arc<dyn HistoryLedger>,
        accounts: Arc<dyn AccountStore>,
    ) -> Self {
        Self {
            users,
            roles,
            history,
            accounts,
        }
    }

    /// Creates a user service over a full store set.
    pub fn from_stores(stores: &Stores) -> Self {
        Self::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.roles),
            Arc::clone(&stores.history),
            Arc::clone(&stores.accounts),
        )
    }

    /// Registers a new, unblocked user with the `USER` role.
    pub async fn register(&self, name: &str) -> Result<User, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("User name cannot be empty"));
        }

        let user = self.users.create_user(&User::new(name, UserRole::User)).await?;
        info!(user_id = %user.id, name = %user.name, "User registered");
        Ok(user)
    }

    /// Resolves the acting user by name.
    ///
    /// Fails with `NotFound` for an unknown name and `Authentication` for a
    /// blocked account.
    pub async fn authenticate(&self, name: &str) -> Result<RequestContext, AppError> {
        let user = self
            .users
            .find_user_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{name}' not found")))?;

        if user.is_blocked {
            return Err(AppError::authentication(format!("User '{name}' is blocked")));
        }

        Ok(RequestContext::for_user(&user))
    }

    /// Lists users ordered by name.
    pub async fn list(&self, page: &PageRequest) -> Result<PageResponse<User>, AppError> {
        self.users.list_users(page).await
    }

    /// Lists the stored role rows.
    pub async fn list_roles(&self) -> Result<Vec<Role>, AppError> {
        self.roles.list_roles().await
    }

    /// Role changes made to `name`, oldest first.
    pub async fn history(&self, name: &str) -> Result<Vec<ChangeRoleHistory>, AppError> {
        let user = self
            .users
            .find_user_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{name}' not found")))?;
        self.history.find_history_by_target(user.id).await
    }

    /// Changes `target_name`'s role and/or blocked flag on behalf of `ctx`.
    ///
    /// Each field is applied only when the actor's role grants the matching
    /// permission and the target has never changed the actor's role. A field
    /// that fails either check is skipped without error, so the request may
    /// partially succeed. The returned view reflects the stored state after
    /// the request.
    ///
    /// Fails with `InvalidRole` when an allowed role change names an unknown
    /// role, and `NotFound` when either user is missing. A failure rolls
    /// back the whole request.
    pub async fn apply_role_and_block_change(
        &self,
        ctx: &RequestContext,
        target_name: &str,
        new_role: Option<&str>,
        blocked: Option<bool>,
    ) -> Result<UserView, AppError> {
        let request = ChangeRequest {
            new_role: new_role.map(String::from),
            blocked,
        };

        let mut tx = self.accounts.begin().await?;
        let locked = tx.lock_users(&[ctx.username.as_str(), target_name]).await?;

        let actor = locked
            .iter()
            .find(|u| u.name == ctx.username)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("User '{}' not found", ctx.username)))?;
        if actor.is_blocked {
            return Err(AppError::authentication(format!(
                "User '{}' is blocked",
                actor.name
            )));
        }
        let mut target = locked
            .into_iter()
            .find(|u| u.name == target_name)
            .ok_or_else(|| AppError::not_found(format!("User '{target_name}' not found")))?;

        let history = tx.find_history_by_target(actor.id).await?;
        let benefactors = PriorBenefactors::from_history(actor.id, &history);
        let decision = escalation::evaluate(&actor, &target, &benefactors, &request);

        if decision.is_noop() {
            debug!(
                actor = %actor.name,
                target = %target.name,
                role = ?decision.role,
                blocked = ?decision.blocked,
                "No change applied"
            );
            return Ok(UserView::from(&target));
        }

        if let Some(name) = decision.role_to_apply() {
            let role: UserRole = name.parse()?;
            let role = tx
                .find_role_by_name(role)
                .await?
                .ok_or_else(|| AppError::invalid_role(format!("Role '{role}' is not stored")))?;
            tx.append_history(&ChangeRoleHistory::record(actor.id, target.id, role.name))
                .await?;
            target.role = role.name;
        }
        if let Some(is_blocked) = decision.blocked_to_apply() {
            target.is_blocked = is_blocked;
        }

        tx.save_user(&target).await?;
        tx.commit().await?;

        info!(
            actor = %actor.name,
            target = %target.name,
            role = %target.role,
            is_blocked = target.is_blocked,
            "User updated"
        );

        Ok(UserView::from(&target))
    }
}
