//! # Mock Catalogs
//!
//! Test doubles for code that talks to a [`CatalogClient`] without spawning
//! a real actor.
//!
//! Two styles are available:
//!
//! - [`MockCatalog`] answers requests from a queue of scripted expectations
//!   (fluent `expect_*().return_ok(..)` builders, `verify()` at the end).
//!   Use it to unit-test wrapper logic, including error paths that are hard
//!   to provoke in a live actor.
//! - [`create_mock_client`] hands back the raw request receiver so a test
//!   can inspect each message and answer it by hand.
//!
//! Mocks hold no real state; they replay exactly what the test scripted, in
//! order, and panic on any request they were not told to expect.

use crate::client::CatalogClient;
use crate::entity::CatalogEntity;
use crate::error::CatalogError;
use crate::message::CatalogRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: CatalogEntity> {
    Create {
        response: Result<T::Id, CatalogError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, CatalogError>,
    },
    List {
        response: Result<Vec<T>, CatalogError>,
    },
}

/// A scripted catalog client for unit tests.
///
/// ```ignore
/// let mut mock = MockCatalog::<User>::new();
/// mock.expect_create().return_ok(UserId(1));
/// mock.expect_get(UserId(1)).return_ok(Some(user));
///
/// let client = mock.client();
/// // exercise the code under test...
/// mock.verify();
/// ```
pub struct MockCatalog<T: CatalogEntity> {
    client: CatalogClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: CatalogEntity> Default for MockCatalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CatalogEntity> MockCatalog<T> {
    /// Creates a mock with an empty expectation queue. Must be called from
    /// within a Tokio runtime; the responder runs as a background task.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<CatalogRequest<T>>(64);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let scripted = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = scripted
                    .lock()
                    .expect("expectation queue poisoned")
                    .pop_front();

                match (request, expectation) {
                    (
                        CatalogRequest::Create { reply, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = reply.send(response);
                    }
                    (
                        CatalogRequest::Get { id, reply },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        assert_eq!(id, expected, "get request for unexpected id");
                        let _ = reply.send(response);
                    }
                    (CatalogRequest::List { reply }, Some(Expectation::List { response })) => {
                        let _ = reply.send(response);
                    }
                    _ => {
                        panic!("catalog request did not match the next scripted expectation");
                    }
                }
            }
        });

        Self {
            client: CatalogClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client handle to pass to the code under test.
    pub fn client(&self) -> CatalogClient<T> {
        self.client.clone()
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> CreateExpectation<T> {
        CreateExpectation {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` request for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectation<T> {
        GetExpectation {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list` request.
    pub fn expect_list(&mut self) -> ListExpectation<T> {
        ListExpectation {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any scripted expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("expectation queue poisoned")
            .len();
        if remaining > 0 {
            panic!("{remaining} catalog expectations were never consumed");
        }
    }
}

/// Builder for `create` expectations.
pub struct CreateExpectation<T: CatalogEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: CatalogEntity> CreateExpectation<T> {
    pub fn return_ok(self, id: T::Id) {
        self.push(Ok(id));
    }

    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T::Id, CatalogError>) {
        self.expectations
            .lock()
            .expect("expectation queue poisoned")
            .push_back(Expectation::Create { response });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectation<T: CatalogEntity> {
    id: T::Id,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: CatalogEntity> GetExpectation<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<T>, CatalogError>) {
        self.expectations
            .lock()
            .expect("expectation queue poisoned")
            .push_back(Expectation::Get {
                id: self.id,
                response,
            });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectation<T: CatalogEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: CatalogEntity> ListExpectation<T> {
    pub fn return_ok(self, entries: Vec<T>) {
        self.push(Ok(entries));
    }

    pub fn return_err(self, error: CatalogError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Vec<T>, CatalogError>) {
        self.expectations
            .lock()
            .expect("expectation queue poisoned")
            .push_back(Expectation::List { response });
    }
}

/// Creates a bare mock client plus the raw request receiver, for tests that
/// want to assert on the messages themselves.
pub fn create_mock_client<T: CatalogEntity>(
    mailbox: usize,
) -> (CatalogClient<T>, mpsc::Receiver<CatalogRequest<T>>) {
    let (sender, receiver) = mpsc::channel(mailbox);
    (CatalogClient::new(sender), receiver)
}

/// Receives the next request and asserts it is a `Create`.
pub async fn expect_create<T: CatalogEntity>(
    receiver: &mut mpsc::Receiver<CatalogRequest<T>>,
) -> Option<(T::Create, crate::message::Reply<T::Id>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Create { params, reply }) => Some((params, reply)),
        _ => None,
    }
}

/// Receives the next request and asserts it is a `Get`.
pub async fn expect_get<T: CatalogEntity>(
    receiver: &mut mpsc::Receiver<CatalogRequest<T>>,
) -> Option<(T::Id, crate::message::Reply<Option<T>>)> {
    match receiver.recv().await {
        Some(CatalogRequest::Get { id, reply }) => Some((id, reply)),
        _ => None,
    }
}
