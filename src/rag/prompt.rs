use crate::stack::inference::Message;

pub const NO_CONTEXT_PLACEHOLDER: &str = "No relevant documents found.";
pub const CONTEXT_SEPARATOR: &str = "\n---\n";

pub fn build_context_block(chunks: &[String]) -> String {
    if chunks.is_empty() {
        NO_CONTEXT_PLACEHOLDER.to_string()
    } else {
        chunks.join(CONTEXT_SEPARATOR)
    }
}

pub fn build_system_prompt(context_block: &str) -> String {
    format!(
        "You are a helpful assistant. Answer the user's question using ONLY the context below.\n\n\
         CONTEXT:\n{}\n",
        context_block
    )
}

/// System message first, user message second. The order is fixed.
pub fn build_messages(context_block: &str, query: &str) -> [Message; 2] {
    [
        Message::system(build_system_prompt(context_block)),
        Message::user(query),
    ]
}
