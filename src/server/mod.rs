pub mod dispatch;
pub mod http;
pub mod protocol;

pub use dispatch::Dispatcher;
pub use protocol::{PromptRequest, PromptResponse, ProviderInfo, ProvidersListResponse};
