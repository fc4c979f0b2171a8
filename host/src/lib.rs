//! Editor host boundary for the location popup.
//!
//! Everything that touches the untyped host surface lives here: the four
//! read-only queries a pass needs, decoding of location-list records into
//! [`LocationEntry`](locpopup_types::LocationEntry) values, and the one-time
//! event subscription. Transport is injected through [`RpcCall`].

pub mod error;
pub mod nvim;
pub mod query;
pub mod records;
pub mod subscribe;

pub use error::HostError;
pub use nvim::{NvimHost, RpcCall};
pub use query::{EditorHost, HostSnapshot, PassError, Query, QueryClient, SkipReason};
pub use records::{LocationList, decode_location_list};
pub use subscribe::{EventSource, UpdateNotification, autocmd_commands, parse_notification};
