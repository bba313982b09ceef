//! Chat command - answer one chat message the way the bot would

use anyhow::Result;
use fwrelay_chat::ChatFrontend;

use crate::output::OutputContext;

/// Feed a message to the chat front end and print every reply
pub async fn chat(frontend: &ChatFrontend, text: &str, ctx: &OutputContext) -> Result<()> {
    let replies = frontend.handle(text).await;
    if replies.is_empty() {
        ctx.warn(&format!("Not a bot command: {}", text));
    }
    ctx.print_messages(&replies);
    Ok(())
}
