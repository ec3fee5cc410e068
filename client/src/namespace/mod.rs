//! Resource namespaces over a `Session`.
//!
//! Each method builds its endpoint from typed path parameters and loose
//! `Kwargs`, then runs it on the session's transport. The `_async` twin
//! shares the same request builder, so both accept exactly the same
//! arguments.
//!
//! `with_client` / `with_async_client` swap the transport for the calls made
//! through one handle; argument handling stays the same.

use customgpt_core::api::SendMessage;
use customgpt_core::{Endpoint, Response};

use crate::blocking::Client;
use crate::error::Error;
use crate::nonblocking::AsyncClient;
use crate::session::Session;
use crate::stream::{AsyncMessageStream, MessageStream, StreamReply};

/// Where a namespace handle sends its calls.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Target<'a> {
    session: &'a Session,
    client: Option<&'a Client>,
    async_client: Option<&'a AsyncClient>,
}

impl<'a> Target<'a> {
    fn new(session: &'a Session) -> Self {
        Self {
            session,
            client: None,
            async_client: None,
        }
    }

    pub(crate) fn call<E: Endpoint>(&self, endpoint: &E) -> Result<Response<E::Outcome>, Error> {
        match self.client {
            Some(client) => client.call(endpoint),
            None => self.session.call(endpoint),
        }
    }

    pub(crate) async fn call_async<E: Endpoint>(&self, endpoint: &E) -> Result<Response<E::Outcome>, Error> {
        match self.async_client {
            Some(client) => client.call(endpoint).await,
            None => self.session.call_async(endpoint).await,
        }
    }

    pub(crate) fn stream(&self, endpoint: &SendMessage) -> Result<StreamReply<MessageStream>, Error> {
        match self.client {
            Some(client) => client.stream(endpoint),
            None => self.session.stream(endpoint),
        }
    }

    pub(crate) async fn stream_async(
        &self,
        endpoint: &SendMessage,
    ) -> Result<StreamReply<AsyncMessageStream>, Error> {
        match self.async_client {
            Some(client) => client.stream(endpoint).await,
            None => self.session.stream_async(endpoint).await,
        }
    }
}

/// Declare a namespace handle borrowing the session.
macro_rules! namespace {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            target: $crate::namespace::Target<'a>,
        }

        impl<'a> $name<'a> {
            pub(crate) fn new(session: &'a $crate::session::Session) -> Self {
                Self {
                    target: $crate::namespace::Target::new(session),
                }
            }

            /// Send this handle's blocking calls through `client` instead of
            /// the session's default.
            pub fn with_client(mut self, client: &'a $crate::blocking::Client) -> Self {
                self.target.client = Some(client);
                self
            }

            /// Send this handle's `_async` calls through `client` instead of
            /// the session's default.
            pub fn with_async_client(mut self, client: &'a $crate::nonblocking::AsyncClient) -> Self {
                self.target.async_client = Some(client);
                self
            }
        }
    };
}

mod conversations;
mod pages;
mod projects;
mod users;

pub use conversations::{Citations, Conversations};
pub use pages::{PageMetadata, Pages, Sources};
pub use projects::{Plugins, ProjectSettings, Projects};
pub use users::Users;
