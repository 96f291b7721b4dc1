use crate::core::error::PortalError;
use crate::models::user::{Role, User};
use crate::portal::{PortalStore, CURRENT_USER_KEY, USERS_KEY};
use crate::stores::blob::read_json;
use tracing::debug;

impl PortalStore {
    /// Plain-text credential check. On a match the user is snapshotted as
    /// the session pointer; a miss returns `None` and leaves any existing
    /// session alone.
    pub fn login(&self, username: &str, password: &str) -> Result<Option<User>, PortalError> {
        let users: Vec<User> = self.read_collection(USERS_KEY)?;

        let Some(user) = users
            .into_iter()
            .find(|u| u.username == username && u.password == password)
        else {
            debug!(username = username, "Login rejected: invalid credentials");
            return Ok(None);
        };

        self.write_value(CURRENT_USER_KEY, &user)?;
        debug!(user_id = %user.id, role = %user.role, "Login succeeded");
        Ok(Some(user))
    }

    pub fn logout(&self) -> Result<(), PortalError> {
        self.blobs().remove(CURRENT_USER_KEY)?;
        Ok(())
    }

    /// The snapshot taken at login; it does not follow later directory changes
    pub fn current_user(&self) -> Result<Option<User>, PortalError> {
        Ok(read_json(self.blobs(), CURRENT_USER_KEY)?)
    }

    pub fn require_role(&self, role: Role) -> Result<User, PortalError> {
        let user = self.current_user()?.ok_or(PortalError::NotAuthenticated)?;
        if user.role != role {
            return Err(PortalError::Forbidden {
                required: role,
                actual: user.role,
            });
        }
        Ok(user)
    }

    /// Id stamped on records the session user creates, empty without a session
    pub(crate) fn session_user_id(&self) -> Result<String, PortalError> {
        Ok(self.current_user()?.map(|u| u.id).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::error::PortalError;
    use crate::models::user::{NewUser, Role};
    use crate::portal::testing::seeded_portal;
    use crate::portal::CURRENT_USER_KEY;

    #[test]
    fn test_login_sets_session() {
        let portal = seeded_portal();

        let user = portal.login("teacher1", "teacher123").unwrap().unwrap();
        assert_eq!(user.id, "2");
        assert_eq!(user.role, Role::Teacher);

        let current = portal.current_user().unwrap().unwrap();
        assert_eq!(current, user);
    }

    #[test]
    fn test_every_seeded_credential_logs_in() {
        let portal = seeded_portal();
        for user in portal.list_users().unwrap() {
            let logged_in = portal.login(&user.username, &user.password).unwrap();
            assert_eq!(logged_in.as_ref(), Some(&user));
            assert_eq!(portal.current_user().unwrap().as_ref(), Some(&user));
        }
    }

    #[test]
    fn test_failed_login_keeps_prior_session() {
        let portal = seeded_portal();
        portal.login("student1", "student123").unwrap();

        assert!(portal.login("student1", "wrong").unwrap().is_none());
        assert!(portal.login("nobody", "student123").unwrap().is_none());
        // password of a different account
        assert!(portal.login("admin", "student123").unwrap().is_none());

        let current = portal.current_user().unwrap().unwrap();
        assert_eq!(current.id, "4");
    }

    #[test]
    fn test_credentials_are_case_sensitive() {
        let portal = seeded_portal();
        assert!(portal.login("Admin", "admin123").unwrap().is_none());
        assert!(portal.current_user().unwrap().is_none());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let portal = seeded_portal();
        portal.login("admin", "admin123").unwrap();

        portal.logout().unwrap();
        assert!(portal.current_user().unwrap().is_none());
        portal.logout().unwrap();
        assert!(portal.current_user().unwrap().is_none());
    }

    #[test]
    fn test_session_is_a_snapshot() {
        let portal = seeded_portal();
        portal.login("student2", "student123").unwrap();

        portal.delete_user("5").unwrap();
        let current = portal.current_user().unwrap().unwrap();
        assert_eq!(current.name, "Bob Wilson");
        assert!(portal.get_user_by_id("5").unwrap().is_none());
    }

    #[test]
    fn test_malformed_session_reads_as_logged_out() {
        let portal = seeded_portal();
        portal.blobs().set(CURRENT_USER_KEY, "{").unwrap();
        assert!(portal.current_user().unwrap().is_none());
    }

    #[test]
    fn test_require_role() {
        let portal = seeded_portal();
        assert!(matches!(
            portal.require_role(Role::Admin),
            Err(PortalError::NotAuthenticated)
        ));

        portal.login("teacher2", "teacher123").unwrap();
        assert_eq!(portal.require_role(Role::Teacher).unwrap().id, "3");
        assert!(matches!(
            portal.require_role(Role::Admin),
            Err(PortalError::Forbidden {
                required: Role::Admin,
                actual: Role::Teacher
            })
        ));
    }

    #[test]
    fn test_login_user_created_later() {
        let portal = seeded_portal();
        let created = portal
            .create_user(NewUser::new("student9", "pw9", Role::Student, "Nia").with_class("10-C"))
            .unwrap();

        let user = portal.login("student9", "pw9").unwrap().unwrap();
        assert_eq!(user.id, created.id);
    }
}
