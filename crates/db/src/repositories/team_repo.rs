//! Repository for teams, their members and stored analytics runs.

use serde_json::{json, Value};

use crate::collections::{TEAMS, TEAM_ANALYTICS, TEAM_MEMBERS};
use crate::error::StoreError;
use crate::models::team::{
    CreateTeam, CreateTeamMember, Team, TeamAnalytics, TeamMember, TeamSummary,
};
use crate::repositories::decode_all;
use crate::store::{to_body, DocumentStore, Filter, FindOptions};

pub struct TeamRepo;

fn owned(user_id: &str, id: &str) -> Filter {
    Filter::by_id(id).eq("user_id", user_id)
}

fn members_of(team_id: &str) -> Filter {
    Filter::new().eq("team_id", team_id)
}

impl TeamRepo {
    /// Create a team and its initial members.
    ///
    /// Members are inserted one by one after the team; there is no
    /// transaction spanning them.
    pub async fn create(
        store: &dyn DocumentStore,
        user_id: &str,
        input: &CreateTeam,
    ) -> Result<Team, StoreError> {
        let body = to_body(&json!({
            "user_id": user_id,
            "name": input.name,
            "description": input.description,
        }))?;
        let team: Team = store.insert(TEAMS, body).await?.decode()?;

        for member in &input.members {
            Self::add_member(store, &team.id, member).await?;
        }
        Ok(team)
    }

    /// List a user's teams, newest first, with member counts.
    pub async fn list_for_user(
        store: &dyn DocumentStore,
        user_id: &str,
    ) -> Result<Vec<TeamSummary>, StoreError> {
        let docs = store
            .find(
                TEAMS,
                &Filter::new().eq("user_id", user_id),
                &FindOptions::newest_first(),
            )
            .await?;
        let teams: Vec<Team> = decode_all(docs)?;

        let mut summaries = Vec::with_capacity(teams.len());
        for team in teams {
            let member_count = store.count(TEAM_MEMBERS, &members_of(&team.id)).await?;
            summaries.push(TeamSummary { team, member_count });
        }
        Ok(summaries)
    }

    pub async fn find(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
    ) -> Result<Option<Team>, StoreError> {
        store
            .find_one(TEAMS, &owned(user_id, id))
            .await?
            .map(|doc| doc.decode())
            .transpose()
    }

    /// Delete a team and its members. Returns `false` if the team was not found.
    pub async fn delete(
        store: &dyn DocumentStore,
        user_id: &str,
        id: &str,
    ) -> Result<bool, StoreError> {
        if store.delete(TEAMS, &owned(user_id, id)).await? == 0 {
            return Ok(false);
        }
        store.delete(TEAM_MEMBERS, &members_of(id)).await?;
        Ok(true)
    }

    pub async fn add_member(
        store: &dyn DocumentStore,
        team_id: &str,
        input: &CreateTeamMember,
    ) -> Result<TeamMember, StoreError> {
        let mut body = to_body(input)?;
        body.insert("team_id".into(), Value::String(team_id.to_string()));
        store.insert(TEAM_MEMBERS, body).await?.decode()
    }

    /// Members in the order they were added.
    pub async fn list_members(
        store: &dyn DocumentStore,
        team_id: &str,
    ) -> Result<Vec<TeamMember>, StoreError> {
        let docs = store
            .find(TEAM_MEMBERS, &members_of(team_id), &FindOptions::default())
            .await?;
        decode_all(docs)
    }

    pub async fn remove_member(
        store: &dyn DocumentStore,
        team_id: &str,
        member_id: &str,
    ) -> Result<bool, StoreError> {
        let filter = Filter::by_id(member_id).eq("team_id", team_id);
        Ok(store.delete(TEAM_MEMBERS, &filter).await? > 0)
    }

    pub async fn save_analytics(
        store: &dyn DocumentStore,
        user_id: &str,
        team_id: &str,
        member_count: u64,
        metrics: &[String],
        analytics: &Value,
    ) -> Result<TeamAnalytics, StoreError> {
        let body = to_body(&json!({
            "user_id": user_id,
            "team_id": team_id,
            "member_count": member_count,
            "metrics": metrics,
            "analytics": analytics,
        }))?;
        store.insert(TEAM_ANALYTICS, body).await?.decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryDocumentStore;

    fn member(name: &str) -> CreateTeamMember {
        CreateTeamMember {
            name: name.into(),
            email: None,
            role: Some("Agent".into()),
            skills: vec!["empathy".into()],
        }
    }

    #[tokio::test]
    async fn create_with_members_and_count() {
        let store = MemoryDocumentStore::new();
        let input = CreateTeam {
            name: "Support".into(),
            description: "Tier 1".into(),
            members: vec![member("Ana"), member("Ben")],
        };
        let team = TeamRepo::create(&store, "u1", &input).await.unwrap();

        let listed = TeamRepo::list_for_user(&store, "u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].member_count, 2);

        let members = TeamRepo::list_members(&store, &team.id).await.unwrap();
        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Ben"]);
    }

    #[tokio::test]
    async fn delete_removes_members() {
        let store = MemoryDocumentStore::new();
        let input = CreateTeam {
            name: "Support".into(),
            description: String::new(),
            members: vec![member("Ana")],
        };
        let team = TeamRepo::create(&store, "u1", &input).await.unwrap();

        assert!(!TeamRepo::delete(&store, "u2", &team.id).await.unwrap());
        assert!(TeamRepo::delete(&store, "u1", &team.id).await.unwrap());
        assert!(TeamRepo::list_members(&store, &team.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_member_checks_team() {
        let store = MemoryDocumentStore::new();
        let added = TeamRepo::add_member(&store, "t1", &member("Ana")).await.unwrap();
        assert!(!TeamRepo::remove_member(&store, "t2", &added.id).await.unwrap());
        assert!(TeamRepo::remove_member(&store, "t1", &added.id).await.unwrap());
    }
}
