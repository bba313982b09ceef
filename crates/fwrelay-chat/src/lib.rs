//! fwrelay-chat - Chat front end for the lookup chain
//!
//! Turns chat commands into lookups and lookups into MarkdownV2 messages.
//! Delivering those messages (bot API, polling, tokens) is left to the
//! transport that embeds this crate; every string produced here is meant to
//! be sent with [`PARSE_MODE`].
//!
//! ```ignore
//! let frontend = ChatFrontend::new(Arc::new(chain));
//! for reply in frontend.handle("/query HA29117A").await {
//!     bot.send_message(chat_id, reply).parse_mode(PARSE_MODE).await?;
//! }
//! ```

pub mod command;
pub mod escape;
pub mod frontend;
pub mod render;

pub use command::ChatCommand;
pub use escape::{escape_code, escape_link_url, escape_markdown_v2, escape_or_na};
pub use frontend::{ChatAction, ChatFrontend};

/// Parse mode every rendered message is written for
pub const PARSE_MODE: &str = "MarkdownV2";
