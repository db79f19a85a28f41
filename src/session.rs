//! Who is acting, and what they are allowed to do.
use crate::{AccessError, Action, StudentId, UnknownRole, UserId};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Teacher,
    Student,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Teacher => f.write_str("teacher"),
            Role::Student => f.write_str("student"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(UnknownRole(s.to_owned())),
        }
    }
}

/// An authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Principal {
    pub user: UserId,
    pub role: Role,
}

/// The session an operation runs on behalf of. Passed explicitly to every operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Session {
    Authenticated(Principal),
    #[default]
    Anonymous,
}

impl Session {
    pub fn new(user: UserId, role: Role) -> Self {
        Session::Authenticated(Principal { user, role })
    }

    pub fn principal(&self) -> Result<&Principal, AccessError> {
        match self {
            Session::Authenticated(principal) => Ok(principal),
            Session::Anonymous => Err(AccessError::Unauthenticated),
        }
    }

    /// Check whether this session may perform `action`.
    pub fn authorize(&self, action: Action) -> Result<&Principal, AccessError> {
        let principal = self.principal()?;
        let allowed = match (principal.role, &action) {
            (Role::Teacher, _) => true,
            (Role::Student, Action::ImportMarks) => false,
            (Role::Student, Action::ViewMarks(student)) => is_self(principal, student),
        };
        if allowed {
            Ok(principal)
        } else {
            Err(AccessError::Forbidden {
                role: principal.role,
                action,
            })
        }
    }
}

fn is_self(principal: &Principal, student: &StudentId) -> bool {
    principal.user.0 == student.0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn role_from_text() {
        assert_eq!("Teacher".parse(), Ok(Role::Teacher));
        assert_eq!(" student ".parse(), Ok(Role::Student));
        assert_eq!("admin".parse::<Role>(), Err(UnknownRole("admin".into())));
    }

    #[test]
    fn teachers_may_do_anything() {
        let session = Session::new(UserId::from("t-1"), Role::Teacher);
        assert!(session.authorize(Action::ImportMarks).is_ok());
        assert!(session
            .authorize(Action::ViewMarks(StudentId::from("alice")))
            .is_ok());
    }

    #[test]
    fn students_only_see_their_own_marks() {
        let session = Session::new(UserId::from("alice"), Role::Student);
        assert!(session
            .authorize(Action::ViewMarks(StudentId::from("alice")))
            .is_ok());
        let err = session
            .authorize(Action::ViewMarks(StudentId::from("bob")))
            .unwrap_err();
        assert_eq!(err.to_string(), "a student may not view the marks of 'bob'");
        let err = session.authorize(Action::ImportMarks).unwrap_err();
        assert_eq!(err.to_string(), "a student may not import marks");
    }

    #[test]
    fn anonymous_is_rejected() {
        assert_eq!(
            Session::Anonymous.authorize(Action::ImportMarks),
            Err(AccessError::Unauthenticated)
        );
    }
}
