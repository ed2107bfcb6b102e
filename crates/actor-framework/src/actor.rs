//! # Generic Actor Server
//!
//! `ResourceActor` owns one store of entities and serves every request for it
//! from a single task. Requests are handled strictly one at a time, so any
//! single request (including a whole batch) is atomic with respect to all
//! others sent to the same actor.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// This is the server half: it owns the `store` and the receiving end of the
/// channel. No `Mutex` guards the store; exclusive ownership inside the task
/// is what serializes access.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new(buffer)` returns the actor and a client.
/// 2. **Wire**: pass dependencies to `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a tokio task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(32);
/// tokio::spawn(actor.run(()));
/// let id = client.create(ProductCreate { .. }).await?;
/// ```
///
/// # Operations
///
/// * **Create**: takes the next id from the counter, builds the entity with
///   `from_create_params`, runs `on_create`, inserts.
/// * **Get / GetMany**: clone out of the store. `GetMany` keeps the order of
///   the requested ids and skips unknown ones.
/// * **Update**: runs `on_update` in place and returns the new state.
/// * **Delete**: runs `on_delete`, then removes.
/// * **Action**: runs `handle_action` in place.
/// * **Batch**: checks every id exists, runs each action against a staged
///   copy, and commits the staged copies only if every action succeeded.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. Clients wait for
    /// space when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        // "Product" instead of "order_placement::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::GetMany { ids, respond_to } => {
                    let items: Vec<T> = ids
                        .iter()
                        .filter_map(|id| self.store.get(id).cloned())
                        .collect();
                    debug!(entity_type, requested = ids.len(), found = items.len(), "GetMany");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Batch {
                    actions,
                    respond_to,
                } => {
                    debug!(entity_type, ?actions, "Batch");
                    let size = actions.len();
                    let result = self.apply_batch(actions, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, size, "Batch committed"),
                        Err(e) => warn!(entity_type, size, error = %e, "Batch rolled back"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Applies every action to a staged copy; the store is only touched once
    /// all of them have succeeded.
    async fn apply_batch(
        &mut self,
        actions: Vec<(T::Id, T::Action)>,
        context: &T::Context,
    ) -> Result<Vec<T::ActionResult>, FrameworkError> {
        if let Some((missing, _)) = actions.iter().find(|(id, _)| !self.store.contains_key(id)) {
            return Err(FrameworkError::NotFound(missing.to_string()));
        }

        let mut staged: HashMap<T::Id, T> = HashMap::with_capacity(actions.len());
        let mut results = Vec::with_capacity(actions.len());

        for (id, action) in actions {
            // Repeated ids see the effect of the earlier actions in the batch.
            let item = match staged.entry(id.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let current = self
                        .store
                        .get(&id)
                        .cloned()
                        .ok_or_else(|| FrameworkError::NotFound(id.to_string()))?;
                    entry.insert(current)
                }
            };
            let result = item
                .handle_action(action, context)
                .await
                .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
            results.push(result);
        }

        self.store.extend(staged);
        Ok(results)
    }
}
