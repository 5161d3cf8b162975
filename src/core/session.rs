use crate::domain::ports::{CredentialVerifier, KeyValueStore};
use crate::domain::user::User;
use crate::utils::error::{Result, ScerosError};

pub const SESSION_KEY: &str = "sceros_user";
pub const MOCK_PASSWORD: &str = "password123";

/// Accepts one shared password for every account.
///
/// Stand-in for a real credential check; replace it through
/// [`CredentialVerifier`] rather than extending it.
#[derive(Debug, Clone)]
pub struct MockPasswordVerifier {
    password: String,
}

impl MockPasswordVerifier {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl Default for MockPasswordVerifier {
    fn default() -> Self {
        Self::new(MOCK_PASSWORD)
    }
}

impl CredentialVerifier for MockPasswordVerifier {
    fn verify(&self, _user: &User, password: &str) -> bool {
        password == self.password
    }
}

/// Mock login session backed by a key-value store.
///
/// The store holds at most one serialized [`User`] under the session key; it
/// is replaced wholesale on login and deleted on logout.
pub struct AuthSession<S: KeyValueStore, V: CredentialVerifier> {
    store: S,
    verifier: V,
    users: Vec<User>,
    key: String,
    current: Option<User>,
}

impl<S: KeyValueStore, V: CredentialVerifier> AuthSession<S, V> {
    pub fn new(store: S, verifier: V, users: Vec<User>) -> Self {
        Self {
            store,
            verifier,
            users,
            key: SESSION_KEY.to_string(),
            current: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Reads the stored session once. An entry that does not parse as a user
    /// is logged and treated as signed out.
    pub fn restore(&mut self) -> Result<Option<&User>> {
        self.current = match self.store.get(&self.key)? {
            None => None,
            Some(raw) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    tracing::debug!("Restored session for {}", user.email);
                    Some(user)
                }
                Err(e) => {
                    tracing::warn!("Ignoring unreadable session entry '{}': {}", self.key, e);
                    None
                }
            },
        };
        Ok(self.current.as_ref())
    }

    /// Unknown email and wrong password both fail with
    /// [`ScerosError::InvalidCredentials`] and nothing more specific.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let user = self
            .users
            .iter()
            .find(|u| u.email == email)
            .filter(|u| self.verifier.verify(u, password))
            .cloned()
            .ok_or(ScerosError::InvalidCredentials)?;

        let serialized = serde_json::to_string(&user)?;
        self.store.set(&self.key, &serialized)?;
        tracing::info!("User {} signed in as {}", user.email, user.role);

        self.current = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(&self.key)?;
        if let Some(user) = self.current.take() {
            tracing::info!("User {} signed out", user.email);
        }
        Ok(())
    }

    pub fn user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn require_user(&self) -> Result<&User> {
        self.current.as_ref().ok_or(ScerosError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use serde_json::json;

    fn users() -> Vec<User> {
        serde_json::from_value(json!([
            {"id": 1, "name": "Alex Kim", "email": "alex@campus.edu", "role": "Student",
             "assignedAreas": [1], "status": "Active"},
            {"id": 2, "name": "Riley Park", "email": "riley@campus.edu", "role": "Admin",
             "assignedAreas": [], "status": "Active"}
        ]))
        .unwrap()
    }

    fn session(store: MemoryStore) -> AuthSession<MemoryStore, MockPasswordVerifier> {
        AuthSession::new(store, MockPasswordVerifier::default(), users())
    }

    #[test]
    fn test_login_persists_user() {
        let store = MemoryStore::new();
        let mut auth = session(store.clone());

        let user = auth.login("riley@campus.edu", MOCK_PASSWORD).unwrap();
        assert_eq!(user.name, "Riley Park");
        assert!(auth.is_authenticated());

        let stored = store.get(SESSION_KEY).unwrap().unwrap();
        let stored: User = serde_json::from_str(&stored).unwrap();
        assert_eq!(stored, user);
    }

    #[test]
    fn test_failures_are_indistinguishable() {
        let mut auth = session(MemoryStore::new());

        let unknown = auth.login("nobody@campus.edu", MOCK_PASSWORD).unwrap_err();
        let wrong = auth.login("alex@campus.edu", "hunter2").unwrap_err();

        assert_eq!(unknown.to_string(), "Invalid credentials");
        assert_eq!(wrong.to_string(), unknown.to_string());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_failed_login_keeps_previous_session() {
        let store = MemoryStore::new();
        let mut auth = session(store.clone());
        auth.login("alex@campus.edu", MOCK_PASSWORD).unwrap();

        assert!(auth.login("riley@campus.edu", "nope").is_err());
        assert_eq!(auth.user().unwrap().email, "alex@campus.edu");
        assert!(store.get(SESSION_KEY).unwrap().is_some());
    }

    #[test]
    fn test_restore_and_logout() {
        let store = MemoryStore::new();
        session(store.clone())
            .login("alex@campus.edu", MOCK_PASSWORD)
            .unwrap();

        let mut restored = session(store.clone());
        assert_eq!(
            restored.restore().unwrap().map(|u| u.email.as_str()),
            Some("alex@campus.edu")
        );

        restored.logout().unwrap();
        assert!(!restored.is_authenticated());
        assert!(store.get(SESSION_KEY).unwrap().is_none());
        assert!(matches!(
            restored.require_user(),
            Err(ScerosError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_restore_ignores_garbage() {
        let store = MemoryStore::new();
        store.set(SESSION_KEY, "{not json").unwrap();

        let mut auth = session(store);
        assert!(auth.restore().unwrap().is_none());
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn test_custom_verifier_and_key() {
        struct RejectAll;
        impl CredentialVerifier for RejectAll {
            fn verify(&self, _user: &User, _password: &str) -> bool {
                false
            }
        }

        let store = MemoryStore::new();
        let mut auth = AuthSession::new(store.clone(), RejectAll, users()).with_key("other");
        assert!(auth.login("alex@campus.edu", MOCK_PASSWORD).is_err());

        let mut auth = session(store.clone()).with_key("other");
        auth.login("alex@campus.edu", MOCK_PASSWORD).unwrap();
        assert!(store.get("other").unwrap().is_some());
        assert!(store.get(SESSION_KEY).unwrap().is_none());
    }
}
