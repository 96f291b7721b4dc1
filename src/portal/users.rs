use crate::core::error::PortalError;
use crate::models::user::{NewUser, Role, User};
use crate::portal::{PortalStore, USERS_KEY};
use crate::utils::time::current_timestamp_millis;
use crate::validation::input::{guard_user_removal, validate_new_user};
use tracing::info;

impl PortalStore {
    /// All users in insertion order
    pub fn list_users(&self) -> Result<Vec<User>, PortalError> {
        self.read_collection(USERS_KEY)
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<User>, PortalError> {
        Ok(self.list_users()?.into_iter().find(|u| u.id == id))
    }

    pub fn list_users_by_role(&self, role: Role) -> Result<Vec<User>, PortalError> {
        Ok(self
            .list_users()?
            .into_iter()
            .filter(|u| u.role == role)
            .collect())
    }

    /// Append a user under a millisecond-timestamp id. Two creations in the
    /// same millisecond share an id.
    pub fn create_user(&self, fields: NewUser) -> Result<User, PortalError> {
        let user = fields.into_user(current_timestamp_millis().to_string());

        self.mutate(USERS_KEY, |users: &mut Vec<User>| users.push(user.clone()))?;

        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    /// Remove every user with `id` and return how many were removed.
    /// No protection applies here; see `remove_user`.
    pub fn delete_user(&self, id: &str) -> Result<usize, PortalError> {
        let removed = self.mutate(USERS_KEY, |users: &mut Vec<User>| {
            let before = users.len();
            users.retain(|u| u.id != id);
            before - users.len()
        })?;

        info!(user_id = id, removed = removed, "User deleted");
        Ok(removed)
    }

    /// Validated registration: required fields, unique username, and
    /// role-specific class/subject.
    pub fn register_user(&self, fields: NewUser) -> Result<User, PortalError> {
        let existing = self.list_users()?;
        let fields = validate_new_user(fields, &existing)?;
        self.create_user(fields)
    }

    /// Delete with the root administrator protected and unknown ids reported
    pub fn remove_user(&self, id: &str) -> Result<(), PortalError> {
        guard_user_removal(id, self.root_admin_id())?;

        if self.delete_user(id)? == 0 {
            return Err(PortalError::NotFound(format!("user {}", id)));
        }
        Ok(())
    }

    /// Distinct student classes in first-seen order
    pub fn list_classes(&self) -> Result<Vec<String>, PortalError> {
        let mut classes: Vec<String> = Vec::new();
        for student in self.list_users_by_role(Role::Student)? {
            if let Some(class) = student.class.filter(|c| !c.is_empty()) {
                if !classes.contains(&class) {
                    classes.push(class);
                }
            }
        }
        Ok(classes)
    }

    pub fn list_students_in_class(&self, class: &str) -> Result<Vec<User>, PortalError> {
        Ok(self
            .list_users_by_role(Role::Student)?
            .into_iter()
            .filter(|s| s.class.as_deref() == Some(class))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::error::{PortalError, ValidationError};
    use crate::models::user::{NewUser, Role};
    use crate::portal::testing::seeded_portal;
    use crate::portal::PortalStore;

    #[test]
    fn test_list_users_in_insertion_order() {
        let portal = seeded_portal();
        let ids: Vec<String> = portal.list_users().unwrap().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let portal = PortalStore::in_memory();
        assert!(portal.list_users().unwrap().is_empty());
        assert!(portal.get_user_by_id("1").unwrap().is_none());
    }

    #[test]
    fn test_get_user_by_id() {
        let portal = seeded_portal();
        let user = portal.get_user_by_id("3").unwrap().unwrap();
        assert_eq!(user.name, "Sarah Johnson");
        assert_eq!(user.subject.as_deref(), Some("Science"));
        assert!(portal.get_user_by_id("99").unwrap().is_none());
    }

    #[test]
    fn test_list_users_by_role() {
        let portal = seeded_portal();
        let teachers = portal.list_users_by_role(Role::Teacher).unwrap();
        let students = portal.list_users_by_role(Role::Student).unwrap();
        let admins = portal.list_users_by_role(Role::Admin).unwrap();

        assert_eq!(teachers.len(), 2);
        assert_eq!(students.len(), 5);
        assert_eq!(admins.len(), 1);
        assert_eq!(students[0].id, "4");
        assert_eq!(students[4].id, "8");
    }

    #[test]
    fn test_create_user_appends_with_id() {
        let portal = seeded_portal();
        let user = portal
            .create_user(NewUser::new("teacher3", "pw", Role::Teacher, "Omar").with_subject("Art"))
            .unwrap();

        assert!(!user.id.is_empty());
        assert!(user.id.parse::<i64>().is_ok());

        let users = portal.list_users().unwrap();
        assert_eq!(users.len(), 9);
        assert_eq!(users.last(), Some(&user));
    }

    #[test]
    fn test_store_level_delete_removes_root_admin() {
        let portal = seeded_portal();
        assert_eq!(portal.delete_user("1").unwrap(), 1);
        assert!(portal.get_user_by_id("1").unwrap().is_none());
        assert_eq!(portal.list_users().unwrap().len(), 7);
    }

    #[test]
    fn test_remove_user_refuses_root_admin() {
        let portal = seeded_portal();
        let before = portal.list_users().unwrap();

        let err = portal.remove_user("1").unwrap_err();
        assert!(matches!(
            err,
            PortalError::Validation(ValidationError::ProtectedUser(ref id)) if id == "1"
        ));
        assert_eq!(portal.list_users().unwrap(), before);
    }

    #[test]
    fn test_remove_user_deletes_and_reports_missing() {
        let portal = seeded_portal();
        portal.remove_user("6").unwrap();
        assert!(portal.get_user_by_id("6").unwrap().is_none());

        assert!(matches!(portal.remove_user("6"), Err(PortalError::NotFound(_))));
    }

    #[test]
    fn test_delete_removes_all_duplicates() {
        let portal = PortalStore::in_memory();
        let users = r#"[
            {"id":"7","username":"a","password":"p","role":"student","name":"A"},
            {"id":"7","username":"b","password":"p","role":"student","name":"B"},
            {"id":"8","username":"c","password":"p","role":"student","name":"C"}
        ]"#;
        portal.blobs().set(crate::portal::USERS_KEY, users).unwrap();

        assert_eq!(portal.delete_user("7").unwrap(), 2);
        assert_eq!(portal.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_register_user_validates() {
        let portal = seeded_portal();

        let err = portal
            .register_user(NewUser::new("student1", "x", Role::Student, "Dup"))
            .unwrap_err();
        assert!(matches!(
            err,
            PortalError::Validation(ValidationError::DuplicateUsername(_))
        ));

        let user = portal
            .register_user(
                NewUser::new("student6", "pw", Role::Student, "Finn")
                    .with_class("10-B")
                    .with_subject("ignored"),
            )
            .unwrap();
        assert_eq!(user.class.as_deref(), Some("10-B"));
        assert!(user.subject.is_none());
        assert_eq!(portal.list_users().unwrap().len(), 9);
    }

    #[test]
    fn test_list_classes_and_students_in_class() {
        let portal = seeded_portal();
        assert_eq!(portal.list_classes().unwrap(), vec!["10-A", "10-B"]);

        let ids: Vec<String> = portal
            .list_students_in_class("10-A")
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["4", "5", "8"]);
        assert!(portal.list_students_in_class("12-Z").unwrap().is_empty());
    }
}
