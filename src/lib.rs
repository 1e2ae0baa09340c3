//! Family Hub
//!
//! Shared-state synchronization layer for a household task/reward
//! tracker. Layered architecture:
//! - domain: Core entities and business rules
//! - remote: The per-collection document store boundary
//! - store: Reactive per-collection mirrors and their operations
//! - session: Local profile selection and PIN lock
//!
//! Every store mirrors one remote collection and mutates it through the
//! injected [`remote::CollectionClient`]; mirrors change only when the
//! subscription echoes a write back, so the UI reflects confirmed remote
//! state rather than optimistic guesses.

pub mod domain;
pub mod remote;
pub mod session;
pub mod store;

use std::sync::Arc;

use domain::DomainResult;
use remote::CollectionClient;
use store::{ChoreStore, EventStore, NoteStore, ProfileStore, ShopStore, ShoppingStore};

/// All stores of one running app, constructed once per session
pub struct FamilyHub {
    pub profiles: Arc<ProfileStore>,
    pub chores: Arc<ChoreStore>,
    pub events: Arc<EventStore>,
    pub shop: Arc<ShopStore>,
    pub shopping: Arc<ShoppingStore>,
    pub notes: Arc<NoteStore>,
}

impl FamilyHub {
    /// Connect every store to the document store client
    pub async fn connect(client: Arc<dyn CollectionClient>) -> DomainResult<Self> {
        let profiles = ProfileStore::connect(Arc::clone(&client)).await?;
        let chores = ChoreStore::connect(Arc::clone(&client), Arc::clone(&profiles)).await?;
        let events = EventStore::connect(Arc::clone(&client)).await?;
        let shop = ShopStore::connect(Arc::clone(&client), Arc::clone(&profiles)).await?;
        let shopping = ShoppingStore::connect(Arc::clone(&client)).await?;
        let notes = NoteStore::connect(client).await?;
        Ok(Self {
            profiles,
            chores,
            events,
            shop,
            shopping,
            notes,
        })
    }

    /// Seed every empty collection with its fixed default set
    pub async fn bootstrap(&self) {
        self.profiles.bootstrap().await;
        self.chores.bootstrap().await;
        self.events.bootstrap().await;
        self.shop.bootstrap().await;
    }
}
