// Résumé AI: industry-aware critique, rewrite and JD matching on top of the
// chat backend. Prompts are built per industry profile; replies are parsed into
// typed results or relayed as an SSE token stream.

pub mod handlers;
pub mod industry;
pub mod models;
pub mod prompts;
pub mod stream;
