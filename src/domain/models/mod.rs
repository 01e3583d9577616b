pub mod context;
pub mod message;
pub mod options;

pub use context::{RelayContext, RequestOrigin};
pub use message::{
    Attachment, ChatAction, ChatMessage, CommandReference, OutboundMessage, SelectOption,
    SelectOptionGroup,
};
pub use options::{Destination, MessageOptions};
