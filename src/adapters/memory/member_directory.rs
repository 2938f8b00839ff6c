use crate::domain::{Member, MemberId};
use crate::ports::member_directory::{MemberDirectory as MemberDirectoryTrait, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// 会員名簿のインメモリ実装
#[derive(Debug, Default)]
pub struct MemberDirectory {
    members: Mutex<BTreeMap<MemberId, Member>>,
}

impl MemberDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberDirectoryTrait for MemberDirectory {
    async fn find_member_by_id(&self, member_id: &MemberId) -> Result<Option<Member>> {
        let members = self.members.lock().map_err(|_| "member directory lock poisoned")?;
        Ok(members.get(member_id).cloned())
    }

    async fn add(&self, member: Member) -> Result<bool> {
        let mut members = self.members.lock().map_err(|_| "member directory lock poisoned")?;
        if members.contains_key(member.id()) {
            return Ok(false);
        }
        members.insert(member.id().clone(), member);
        Ok(true)
    }

    async fn save(&self, member: Member) -> Result<()> {
        let mut members = self.members.lock().map_err(|_| "member directory lock poisoned")?;
        if !members.contains_key(member.id()) {
            return Err(format!("Member {} is not registered", member.id()).into());
        }
        members.insert(member.id().clone(), member);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Member>> {
        let members = self.members.lock().map_err(|_| "member directory lock poisoned")?;
        Ok(members.values().cloned().collect())
    }
}
