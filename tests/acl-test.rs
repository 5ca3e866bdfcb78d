use workflow_core::models::acl::{Permission, Role, User};
use workflow_core::models::entity::EntityId;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_round_trip() {
        let id = EntityId::new("order", 42);
        assert_eq!(id.to_string(), "order::42");

        let parsed: EntityId = "order::42".parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(parsed.provider(), "order");
        assert_eq!(parsed.identifier(), 42);
    }

    #[test]
    fn test_entity_id_rejects_malformed_forms() {
        assert!("order".parse::<EntityId>().is_err());
        assert!("::42".parse::<EntityId>().is_err());
        assert!("order::nan".parse::<EntityId>().is_err());
        assert!("order::-1".parse::<EntityId>().is_err());
    }

    #[test]
    fn test_permission_identity() {
        let a = Permission::new("publishing", "edit");
        let b = Permission::new("publishing", "edit");
        let c = Permission::new("publishing", "review");
        let d = Permission::new("billing", "edit");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a.to_string(), "publishing:edit");

        let parsed: Permission = "publishing:edit".parse().unwrap();
        assert_eq!(parsed, a);
        assert!("publishing".parse::<Permission>().is_err());
    }

    #[test]
    fn test_role_permission_set_is_idempotent() {
        let edit = Permission::new("publishing", "edit");
        let review = Permission::new("publishing", "review");

        let mut role = Role::new("publishing", "editor");
        assert_eq!(role.full_name(), "publishing::editor");

        role.add_permission(edit.clone());
        role.add_permission(edit.clone());
        assert_eq!(role.permissions().len(), 1);
        assert!(role.has_permission(&edit));
        assert!(!role.has_permission(&review));

        role.remove_permission(&review);
        assert_eq!(role.permissions().len(), 1);
        role.remove_permission(&edit);
        assert!(role.permissions().is_empty());
    }

    #[test]
    fn test_user_grants_through_any_role() {
        let edit = Permission::new("publishing", "edit");
        let review = Permission::new("publishing", "review");

        let mut editor = Role::new("publishing", "editor");
        editor.add_permission(edit.clone());
        let mut reviewer = Role::new("publishing", "reviewer");
        reviewer.add_permission(review.clone());

        let mut user = User::new();
        assert!(!user.has_permission(&edit));

        user.assign_role(editor.clone());
        assert!(user.has_permission(&edit));
        assert!(!user.has_permission(&review));

        user.assign_role(reviewer);
        assert!(user.has_permission(&review));

        user.reject_role(&editor);
        assert!(!user.has_permission(&edit));
    }

    #[test]
    fn test_permission_list_satisfied_across_roles() {
        let edit = Permission::new("publishing", "edit");
        let review = Permission::new("publishing", "review");
        let publish = Permission::new("publishing", "publish");

        let mut editor = Role::new("publishing", "editor");
        editor.add_permission(edit.clone());
        let mut reviewer = Role::new("publishing", "reviewer");
        reviewer.add_permission(review.clone());

        let mut user = User::new();
        user.assign_role(editor);
        user.assign_role(reviewer);

        // Each permission may be granted by a different role.
        assert!(user.has_permissions(&[edit.clone(), review.clone()]));
        // One unmet permission fails the whole list.
        assert!(!user.has_permissions(&[edit, review, publish]));
        // The empty list is trivially satisfied.
        assert!(user.has_permissions(&[]));
    }
}
