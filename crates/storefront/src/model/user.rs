//! Account types: profile, registration, credentials and the bearer token.
//!
//! Passwords and tokens are held as [`SecretString`]s so they never show up in `Debug` output
//! or in the tracing fields of the store actors.

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Display;

/// Type-safe identifier for Users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// The signed-in user as returned by the profile endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub avatar: Option<String>,
}

impl Profile {
    /// Copies every field present in `update` onto this profile.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(first_name) = &update.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &update.last_name {
            self.last_name.clone_from(last_name);
        }
        if update.phone.is_some() {
            self.phone.clone_from(&update.phone);
        }
        if update.date_of_birth.is_some() {
            self.date_of_birth = update.date_of_birth;
        }
        if update.avatar.is_some() {
            self.avatar.clone_from(&update.avatar);
        }
        self.full_name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
    }
}

/// Partial profile change. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Sign-up form.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    #[serde(serialize_with = "expose")]
    pub password_confirm: SecretString,
}

/// Email and password for the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Opaque bearer credential.
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// The raw token, for the `Authorization` header and durable storage only.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for AccessToken {}

impl<'de> Deserialize<'de> for AccessToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Body of a successful register or login call.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access: AccessToken,
    #[serde(default)]
    pub refresh: Option<AccessToken>,
    #[serde(default)]
    pub user: Profile,
}

/// Body of a successful refresh call.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access: AccessToken,
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
