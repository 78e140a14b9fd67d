mod error;
mod relay;
mod services;

pub use error::{ProxyError, Result};
pub use relay::{relay, Relayed};
pub use services::{CollectionProxy, ItemProxy};
