pub mod answer;
pub mod assistant;
pub mod backend;
pub mod embeddings;
pub mod evidence;
pub mod expand;
pub mod llm;
pub mod openai;
pub mod prompts;
pub mod rerank;
pub mod retrieve;
