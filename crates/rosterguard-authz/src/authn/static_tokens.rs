use super::*;
use crate::errors;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Token → actor table. Stands in for the identity provider in demos and tests.
#[derive(Debug, Default)]
pub struct StaticActorProvider {
    actors: RwLock<HashMap<String, Actor>>,
}

impl StaticActorProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actors<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Actor)>,
    {
        Self {
            actors: RwLock::new(entries.into_iter().collect()),
        }
    }

    pub fn insert(&self, token: impl Into<String>, actor: Actor) {
        self.actors.write().insert(token.into(), actor);
    }

    pub fn revoke(&self, token: &str) -> bool {
        self.actors.write().remove(token).is_some()
    }
}

#[async_trait::async_trait]
impl ActorProvider for StaticActorProvider {
    async fn current_actor(&self, credentials: &Credentials) -> Result<Actor, AuthError> {
        let token = credentials
            .token()
            .ok_or_else(|| errors::unauthenticated("no credentials presented"))?;
        self.actors
            .read()
            .get(token)
            .cloned()
            .ok_or_else(|| errors::unauthenticated("unknown session token"))
    }
}
