//! # Mock Stores for Tests
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are
//! answered from a queue of scripted expectations instead of a store. Code
//! under test cannot tell the difference, which makes it cheap to drive a
//! workflow into states that are awkward to reach with real actors (a store
//! that times out, a batch write that conflicts, ...).
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, scripted replies | real store |
//! | **Determinism** | full | subject to the scheduler |
//! | **Error injection** | `return_err(..)` | needs crafted state |
//!
//! ## Testing patterns
//!
//! 1. **Pure mock**: every collaborator is a `MockClient`; asserts on the
//!    sequence of calls a workflow makes.
//! 2. **Single actor**: spawn one `ResourceActor` and drive it directly.
//! 3. **Actor + mocks**: real store for the thing under test, mocks for its
//!    dependencies.
//! 4. **Full system**: everything real (see the `OrderSystem` integration
//!    tests).
//!
//! ```rust,ignore
//! let mut customers = MockClient::<Customer>::new();
//! customers.expect_get(CustomerId(1)).return_ok(None);
//!
//! let client = CustomerClient::new(customers.client());
//! assert!(client.get(CustomerId(1)).await?.is_none());
//! customers.verify();
//! ```
//!
//! Requests that do not match the next expectation (wrong kind or wrong id)
//! are answered by dropping the reply channel, so the caller observes
//! [`FrameworkError::ActorDropped`], and [`MockClient::verify`] fails listing
//! the mismatch.
//!
//! For tests that need to inspect the exact payload of a request, use
//! [`create_mock_client`] and the `expect_*` receiver helpers instead.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    GetMany {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Batch {
        response: Result<Vec<T::ActionResult>, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "get",
            Expectation::GetMany { .. } => "get_many",
            Expectation::Create { .. } => "create",
            Expectation::Delete { .. } => "delete",
            Expectation::Action { .. } => "action",
            Expectation::Batch { .. } => "batch",
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::GetMany { .. } => "get_many",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
        ResourceRequest::Batch { .. } => "batch",
    }
}

fn reply_if_id_matches<R, I: PartialEq + std::fmt::Display>(
    mismatches: &Mutex<Vec<String>>,
    kind: &str,
    expected: I,
    actual: I,
    respond_to: oneshot::Sender<Result<R, FrameworkError>>,
    response: Result<R, FrameworkError>,
) {
    if expected == actual {
        let _ = respond_to.send(response);
    } else {
        // Recorded before `respond_to` is dropped, so `verify` sees it.
        mismatches
            .lock()
            .unwrap()
            .push(format!("{kind}: expected id {expected}, got {actual}"));
    }
}

type Shared<V> = Arc<Mutex<V>>;

/// A scripted store client.
///
/// ```rust,ignore
/// let mut products = MockClient::<Product>::new();
/// products.expect_get_many().return_ok(vec![widget]);
/// products.expect_batch().return_err(FrameworkError::ActorClosed);
///
/// let client = ProductClient::new(products.client());
/// // ... exercise code that uses `client` ...
/// products.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Shared<VecDeque<Expectation<T>>>,
    mismatches: Shared<Vec<String>>,
    batches: Shared<Vec<Vec<(T::Id, T::Action)>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Shared<VecDeque<Expectation<T>>> = Arc::default();
        let mismatches: Shared<Vec<String>> = Arc::default();
        let batches: Shared<Vec<Vec<(T::Id, T::Action)>>> = Arc::default();

        let handle = {
            let expectations = expectations.clone();
            let mismatches = mismatches.clone();
            let batches = batches.clone();
            tokio::spawn(async move {
                while let Some(request) = receiver.recv().await {
                    let expectation = expectations.lock().unwrap().pop_front();

                    match (request, expectation) {
                        (
                            ResourceRequest::Get { id, respond_to },
                            Some(Expectation::Get {
                                id: expected,
                                response,
                            }),
                        ) => reply_if_id_matches(&mismatches, "get", expected, id, respond_to, response),
                        (
                            ResourceRequest::GetMany { respond_to, .. },
                            Some(Expectation::GetMany { response }),
                        ) => {
                            let _ = respond_to.send(response);
                        }
                        (
                            ResourceRequest::Create { respond_to, .. },
                            Some(Expectation::Create { response }),
                        ) => {
                            let _ = respond_to.send(response);
                        }
                        (
                            ResourceRequest::Delete { id, respond_to },
                            Some(Expectation::Delete {
                                id: expected,
                                response,
                            }),
                        ) => reply_if_id_matches(&mismatches, "delete", expected, id, respond_to, response),
                        (
                            ResourceRequest::Action { id, respond_to, .. },
                            Some(Expectation::Action {
                                id: expected,
                                response,
                            }),
                        ) => reply_if_id_matches(&mismatches, "action", expected, id, respond_to, response),
                        (
                            ResourceRequest::Batch {
                                actions,
                                respond_to,
                            },
                            Some(Expectation::Batch { response }),
                        ) => {
                            batches.lock().unwrap().push(actions);
                            let _ = respond_to.send(response);
                        }
                        (request, expectation) => {
                            let reason = match expectation {
                                Some(expectation) => format!(
                                    "unexpected {} request, expected {}",
                                    request_kind(&request),
                                    expectation.kind()
                                ),
                                None => format!(
                                    "unexpected {} request, no expectations left",
                                    request_kind(&request)
                                ),
                            };
                            mismatches.lock().unwrap().push(reason);
                            drop(request);
                        }
                    }
                }
            })
        };

        Self {
            client: ResourceClient::new(sender),
            expectations,
            mismatches,
            batches,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R: 'static>(
        &self,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            make: Box::new(make),
        }
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    /// Expects a `get_many`, whatever ids it carries.
    pub fn expect_get_many(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::GetMany { response })
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    /// Expects a `delete` for `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects a single `perform_action` on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Expects a `perform_batch`. The actions it carries are recorded, see
    /// [`MockClient::received_batches`].
    pub fn expect_batch(&mut self) -> ExpectationBuilder<T, Vec<T::ActionResult>> {
        self.builder(|response| Expectation::Batch { response })
    }

    /// Batches received so far, in arrival order.
    pub fn received_batches(&self) -> Vec<Vec<(T::Id, T::Action)>>
    where
        T::Action: Clone,
    {
        self.batches.lock().unwrap().clone()
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Mock received mismatched requests: {:?}", *mismatches);
        }
        let remaining: Vec<&str> = self
            .expectations
            .lock()
            .unwrap()
            .iter()
            .map(Expectation::kind)
            .collect();
        if !remaining.is_empty() {
            panic!("Not all expectations were met. Remaining: {:?}", remaining);
        }
    }
}

/// Completes an expectation with the response the mock should give.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Shared<VecDeque<Expectation<T>>>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Answer with `Ok(value)`.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer with `Err(error)`.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.make)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiving end of its channel.
///
/// The test plays the actor: it pulls requests off the receiver with the
/// `expect_*` helpers below, asserts on their payloads, and answers through
/// the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request must be a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request must be a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next request must be a GetMany.
pub async fn expect_get_many<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<T::Id>, oneshot::Sender<Result<Vec<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::GetMany { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

/// Next request must be an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next request must be a Batch.
pub async fn expect_batch<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    Vec<(T::Id, T::Action)>,
    oneshot::Sender<Result<Vec<T::ActionResult>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Batch {
            actions,
            respond_to,
        }) => Some((actions, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: u32,
        items: u32,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        items: u32,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum ShelfAction {
        Take(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Shelf error")]
    struct ShelfError;

    #[async_trait]
    impl ActorEntity for Shelf {
        type Id = u32;
        type Create = ShelfCreate;
        type Update = ();
        type Action = ShelfAction;
        type ActionResult = u32;
        type Context = ();
        type Error = ShelfError;

        fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                items: params.items,
            })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, action: ShelfAction, _: &()) -> Result<u32, Self::Error> {
            match action {
                ShelfAction::Take(n) => {
                    self.items -= n;
                    Ok(self.items)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_receiver_helpers_expose_payloads() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);

        let create_task = tokio::spawn(async move { client.create(ShelfCreate { items: 4 }).await });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.items, 4);
        responder.send(Ok(1)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_scripted_responses_in_order() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_create().return_ok(7);
        mock.expect_get_many()
            .return_ok(vec![Shelf { id: 7, items: 3 }]);
        mock.expect_batch().return_ok(vec![1]);
        mock.expect_delete(7).return_ok(());

        let client = mock.client();
        assert_eq!(client.create(ShelfCreate { items: 3 }).await.unwrap(), 7);
        assert_eq!(client.get_many(vec![7, 8]).await.unwrap().len(), 1);
        assert_eq!(
            client.perform_batch(vec![(7, ShelfAction::Take(2))]).await.unwrap(),
            vec![1]
        );
        client.delete(7).await.unwrap();

        assert_eq!(mock.received_batches(), vec![vec![(7, ShelfAction::Take(2))]]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_injected_error_reaches_caller() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_get(1).return_err(FrameworkError::ActorClosed);

        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "get: expected id 1, got 2")]
    async fn test_wrong_id_is_reported_by_verify() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_unconsumed_expectation_fails_verify() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_delete(3).return_ok(());
        mock.verify();
    }
}
