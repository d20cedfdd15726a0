use serde::{Deserialize, Serialize};

// 调用者角色（由上游身份网关签发）
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Admin,   // 管理员 / 评审
    Student, // 学生
}

impl ActorRole {
    pub const ADMIN: &'static str = "admin";
    pub const STUDENT: &'static str = "student";

    pub fn admin_roles() -> &'static [ActorRole] {
        &[ActorRole::Admin]
    }

    pub fn all_roles() -> &'static [ActorRole] {
        &[ActorRole::Admin, ActorRole::Student]
    }
}

impl<'de> Deserialize<'de> for ActorRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActorRole::Admin => write!(f, "{}", ActorRole::ADMIN),
            ActorRole::Student => write!(f, "{}", ActorRole::STUDENT),
        }
    }
}

impl std::str::FromStr for ActorRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ActorRole::ADMIN => Ok(ActorRole::Admin),
            ActorRole::STUDENT => Ok(ActorRole::Student),
            _ => Err(format!(
                "Invalid actor role: '{s}'. Supported roles: admin, student"
            )),
        }
    }
}

/// 当前请求的调用者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub role: ActorRole,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("ADMIN".parse::<ActorRole>(), Ok(ActorRole::Admin));
        assert_eq!(" student ".parse::<ActorRole>(), Ok(ActorRole::Student));
        assert!("teacher".parse::<ActorRole>().is_err());
    }
}
