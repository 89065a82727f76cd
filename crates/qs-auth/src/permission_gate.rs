//! Permission predicates for conditional rendering.
//!
//! These only decide what the UI shows. The backend re-checks every
//! request against its own copy of the principal's permissions.

pub fn has_permission<S: AsRef<str>>(cached: &[S], permission: &str) -> bool {
    cached.iter().any(|p| p.as_ref() == permission)
}

/// True if at least one requested permission is cached
pub fn has_any_permission<S: AsRef<str>, R: AsRef<str>>(cached: &[S], requested: &[R]) -> bool {
    requested
        .iter()
        .any(|perm| has_permission(cached, perm.as_ref()))
}

/// True if every requested permission is cached. An empty request is satisfied.
pub fn has_all_permissions<S: AsRef<str>, R: AsRef<str>>(cached: &[S], requested: &[R]) -> bool {
    requested
        .iter()
        .all(|perm| has_permission(cached, perm.as_ref()))
}
