//! In-memory stores for exercising the auth core without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use axum::async_trait;
use uuid::Uuid;

use super::{CredentialHasher, HashCost};
use crate::db::{canonical_email, IdentityStore, SessionRecord, SessionStore, User};
use crate::{Result, TurneroError};

pub fn fast_hasher() -> CredentialHasher {
    CredentialHasher::new(HashCost {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    })
    .unwrap()
}

pub fn sample_user(id: i64, email: &str, password_hash: &str) -> User {
    User {
        id,
        email: email.to_string(),
        username: format!("user{id}"),
        phone_number: "1234567890".to_string(),
        password: password_hash.to_string(),
        created_at: "2024-01-01 00:00:00".to_string(),
    }
}

#[derive(Default)]
pub struct MemoryIdentities {
    users: Mutex<Vec<User>>,
}

impl MemoryIdentities {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    pub fn remove(&self, id: i64) {
        self.users.lock().unwrap().retain(|u| u.id != id);
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentities {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = canonical_email(email);
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Default)]
pub struct MemorySessions {
    records: Mutex<HashMap<String, SessionRecord>>,
    fail_destroy: AtomicBool,
}

impl MemorySessions {
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn fail_destroy(&self) {
        self.fail_destroy.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn create(&self, user_id: i64, _ttl: Duration) -> Result<SessionRecord> {
        let record = SessionRecord {
            id: Uuid::new_v4().to_string(),
            user_id,
            created_at: "2024-01-01 00:00:00".to_string(),
            expires_at: "2024-01-02 00:00:00".to_string(),
        };
        self.records
            .lock()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    async fn load(&self, id: &str) -> Result<Option<SessionRecord>> {
        Ok(self.records.lock().unwrap().get(id).cloned())
    }

    async fn destroy(&self, id: &str) -> Result<bool> {
        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(TurneroError::Database("session store unavailable".to_string()));
        }
        Ok(self.records.lock().unwrap().remove(id).is_some())
    }
}
