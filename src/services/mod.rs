pub(crate) mod chat_client;
pub(crate) mod completion;
