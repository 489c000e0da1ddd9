//! In-memory member store for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, Timestamp};
use crate::domain::membership::{ActiveMembership, MemberRecord};
use crate::ports::MemberStore;

/// Member rows keyed on email.
#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    members: RwLock<HashMap<String, MemberRecord>>,
    fail_writes: bool,
    fail_reads: bool,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a member row.
    pub fn with_member(self, record: MemberRecord) -> Self {
        self.members
            .write()
            .unwrap()
            .insert(record.email.as_str().to_string(), record);
        self
    }

    /// Makes every `upsert` fail with a database error.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Makes every `find_active` fail with a database error.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn get(&self, email: &EmailAddress) -> Option<MemberRecord> {
        self.members.read().unwrap().get(email.as_str()).cloned()
    }

    pub fn len(&self) -> usize {
        self.members.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn upsert(&self, record: &MemberRecord) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::new(ErrorCode::DatabaseError, "Simulated write failure"));
        }
        self.members
            .write()
            .unwrap()
            .insert(record.email.as_str().to_string(), record.clone());
        Ok(())
    }

    async fn find_active(
        &self,
        email: &EmailAddress,
        now: Timestamp,
    ) -> Result<Option<ActiveMembership>, DomainError> {
        if self.fail_reads {
            return Err(DomainError::new(ErrorCode::DatabaseError, "Simulated read failure"));
        }
        Ok(self
            .members
            .read()
            .unwrap()
            .get(email.as_str())
            .filter(|record| record.is_active_at(&now))
            .map(MemberRecord::to_active))
    }
}
