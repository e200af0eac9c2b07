use serde::{Deserialize, Serialize};

/// Stored user record, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password_hash: String,
}

impl From<models::user::Model> for User {
    fn from(m: models::user::Model) -> Self {
        Self { id: m.id, firstname: m.firstname, lastname: m.lastname, username: m.username, password_hash: m.password_hash }
    }
}

/// Client-facing view; never carries the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub username: String,
}

impl From<&User> for UserView {
    fn from(u: &User) -> Self {
        Self { id: u.id.clone(), firstname: u.firstname.clone(), lastname: u.lastname.clone(), username: u.username.clone() }
    }
}

/// Signup input
#[derive(Debug, Clone, Deserialize)]
pub struct SignupInput {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password: String,
}

impl SignupInput {
    pub fn validate(&self) -> Result<(), crate::errors::ServiceError> {
        models::user::validate_required("firstname", &self.firstname)?;
        models::user::validate_required("lastname", &self.lastname)?;
        models::user::validate_required("username", &self.username)?;
        models::user::validate_required("password", &self.password)?;
        Ok(())
    }
}

/// Record handed to a repository; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub firstname: String,
    pub lastname: String,
    pub username: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn with_id(self, id: String) -> User {
        User { id, firstname: self.firstname, lastname: self.lastname, username: self.username, password_hash: self.password_hash }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_record_keeps_hash_and_view_drops_it() {
        let user = NewUser {
            firstname: "Ana".into(),
            lastname: "Diaz".into(),
            username: "ana".into(),
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".into(),
        }
        .with_id("1".into());

        let stored = serde_json::to_value(&user).unwrap();
        assert_eq!(stored["password_hash"], user.password_hash.as_str());

        let view = serde_json::to_value(UserView::from(&user)).unwrap();
        assert!(view.get("password_hash").is_none());
        assert_eq!(view["username"], "ana");
    }
}
