use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;
use time::{macros::format_description, Date};

/// Account role. Stored as the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub date_of_birth: Date,
    pub email: String,
    pub password: String, // Argon2 PHC string, never serialized
    pub role: Role,
    pub is_active: bool,
}

/// Row to insert. Role comes from the caller (registration always passes `Role::User`).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: String,
    pub date_of_birth: Date,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// User as returned to clients: the password hash is dropped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub full_name: String,
    #[serde(serialize_with = "serialize_date")]
    pub date_of_birth: Date,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            date_of_birth: u.date_of_birth,
            email: u.email,
            role: u.role,
            is_active: u.is_active,
        }
    }
}

fn serialize_date<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    let formatted = date
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&formatted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn sample() -> User {
        User {
            id: 7,
            full_name: "Ivan Ivanov".into(),
            date_of_birth: date!(1990 - 01 - 01),
            email: "ivan@mail.ru".into(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            role: Role::User,
            is_active: true,
        }
    }

    #[test]
    fn public_user_has_no_password_key() {
        let json = serde_json::to_value(PublicUser::from(sample())).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("password"));
        assert_eq!(obj["fullName"], "Ivan Ivanov");
        assert_eq!(obj["dateOfBirth"], "1990-01-01");
        assert_eq!(obj["role"], "USER");
        assert_eq!(obj["isActive"], true);
    }

    #[test]
    fn role_uses_uppercase_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let parsed: Role = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(parsed, Role::User);
        assert_eq!(Role::default(), Role::User);
    }
}
