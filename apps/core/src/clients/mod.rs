//! External interfaces: the completion proxy, SerpApi, and the local mock
//! generator behind a shared provider trait.

pub mod mock;
pub mod openai;
pub mod serp;
pub mod traits;

pub use mock::MockProvider;
pub use openai::ProxyClient;
pub use serp::{SearchResults, SerpClient};
pub use traits::CompletionProvider;
